//! Cart service
//!
//! The cart is a per-user staging area: adding to it never touches
//! catalog stock. Stock is only checked when a line is edited to a target
//! quantity, and only moved at commit time.

use tracing::{info, instrument};

use stockroom_core::entities::{Cart, CartLine};
use stockroom_core::error::DomainError;

use crate::dto::{AddCartLineRequest, CartLineResponse, CartResponse, ItemSlimResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::{parse_id, Actor};

/// Cart service
pub struct CartService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CartService<'a> {
    /// Create a new CartService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the actor's cart with all lines, creating the cart on first use
    #[instrument(skip(self))]
    pub async fn get_cart(&self, actor: Actor) -> ServiceResult<CartResponse> {
        let cart = self.get_or_create_cart(actor).await?;
        let lines = self.ctx.cart_repo().lines(cart.id).await?;

        let mut responses = Vec::with_capacity(lines.len());
        for line in &lines {
            let item = self
                .ctx
                .item_repo()
                .find_by_id(line.item_id)
                .await?
                .ok_or(DomainError::ItemNotFound(line.item_id))?;
            responses.push(CartLineResponse {
                item: ItemSlimResponse::from(&item),
                quantity: line.quantity,
                added_at: line.added_at,
            });
        }

        Ok(CartResponse {
            id: cart.id.to_string(),
            lines: responses,
        })
    }

    /// Add an item to the cart. Re-adding an item increases the existing
    /// line; stock is not reserved until commit.
    #[instrument(skip(self, request))]
    pub async fn add_line(&self, actor: Actor, request: AddCartLineRequest) -> ServiceResult<CartResponse> {
        if request.quantity < 1 {
            return Err(DomainError::QuantityTooSmall.into());
        }

        let item_id = parse_id(&request.item_id, "item_id")?;
        let item = self
            .ctx
            .item_repo()
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item", request.item_id.clone()))?;

        if !item.is_active() {
            return Err(DomainError::ItemRetired.into());
        }

        let cart = self.get_or_create_cart(actor).await?;

        match self.ctx.cart_repo().find_line(cart.id, item_id).await? {
            Some(line) => {
                self.ctx
                    .cart_repo()
                    .set_line_quantity(line.id, line.quantity + request.quantity)
                    .await?;
            }
            None => {
                let line = CartLine::new(self.ctx.generate_id(), cart.id, item_id, request.quantity);
                self.ctx.cart_repo().create_line(&line).await?;
            }
        }

        info!(user_id = %actor.user_id, item_id = %item_id, quantity = request.quantity, "Cart line added");

        self.get_cart(actor).await
    }

    /// Overwrite a line's quantity. Zero removes the line; a target above
    /// the catalog's available stock is refused and leaves the line as is.
    #[instrument(skip(self))]
    pub async fn update_line(
        &self,
        actor: Actor,
        item_id: &str,
        new_quantity: i64,
    ) -> ServiceResult<CartResponse> {
        let id = parse_id(item_id, "item_id")?;
        let cart = self.get_or_create_cart(actor).await?;

        if new_quantity == 0 {
            if !self.ctx.cart_repo().delete_line(cart.id, id).await? {
                return Err(DomainError::CartLineNotFound(id).into());
            }
            return self.get_cart(actor).await;
        }

        let item = self
            .ctx
            .item_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ItemNotFound(id))?;

        if new_quantity > item.quantity {
            return Err(DomainError::InsufficientStock {
                item_id: id,
                requested: new_quantity,
                available: item.quantity,
            }
            .into());
        }

        let line = self
            .ctx
            .cart_repo()
            .find_line(cart.id, id)
            .await?
            .ok_or(DomainError::CartLineNotFound(id))?;

        self.ctx
            .cart_repo()
            .set_line_quantity(line.id, new_quantity)
            .await?;

        info!(user_id = %actor.user_id, item_id = %id, quantity = new_quantity, "Cart line updated");

        self.get_cart(actor).await
    }

    /// Remove the line for an item
    #[instrument(skip(self))]
    pub async fn remove_line(&self, actor: Actor, item_id: &str) -> ServiceResult<CartResponse> {
        let id = parse_id(item_id, "item_id")?;
        let cart = self.get_or_create_cart(actor).await?;

        if !self.ctx.cart_repo().delete_line(cart.id, id).await? {
            return Err(DomainError::CartLineNotFound(id).into());
        }

        info!(user_id = %actor.user_id, item_id = %id, "Cart line removed");

        self.get_cart(actor).await
    }

    /// Remove every line from the actor's cart
    #[instrument(skip(self))]
    pub async fn clear(&self, actor: Actor) -> ServiceResult<CartResponse> {
        let cart = self.get_or_create_cart(actor).await?;
        self.ctx.cart_repo().clear(cart.id).await?;

        info!(user_id = %actor.user_id, "Cart cleared");

        self.get_cart(actor).await
    }

    /// Find the actor's cart, creating it lazily on first access
    pub(crate) async fn get_or_create_cart(&self, actor: Actor) -> ServiceResult<Cart> {
        if let Some(cart) = self.ctx.cart_repo().find_by_user(actor.user_id).await? {
            return Ok(cart);
        }

        let cart = Cart::new(self.ctx.generate_id(), actor.user_id);
        self.ctx.cart_repo().create(&cart).await?;

        // A concurrent first access may have won the race; the stored row wins
        Ok(self
            .ctx
            .cart_repo()
            .find_by_user(actor.user_id)
            .await?
            .unwrap_or(cart))
    }
}
