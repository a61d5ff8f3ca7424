//! Category service
//!
//! Category CRUD, gated on the catalog-manager roles. Deleting a category
//! that items still reference is refused, never cascaded.

use tracing::{info, instrument};

use stockroom_core::entities::ItemCategory;

use crate::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::{parse_id, Actor};

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new category
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        actor: Actor,
        request: CreateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        actor.require_catalog_manager()?;

        if self.ctx.category_repo().name_exists(&request.name).await? {
            return Err(ServiceError::conflict("Category name already exists"));
        }

        let category = ItemCategory::new(self.ctx.generate_id(), request.name);
        self.ctx.category_repo().create(&category).await?;

        info!(category_id = %category.id, name = %category.name, "Category created");

        Ok(CategoryResponse::from(&category))
    }

    /// List all categories
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().list().await?;
        Ok(categories.iter().map(CategoryResponse::from).collect())
    }

    /// Rename a category
    #[instrument(skip(self, request))]
    pub async fn rename(
        &self,
        actor: Actor,
        category_id: &str,
        request: UpdateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        actor.require_catalog_manager()?;

        let id = parse_id(category_id, "category_id")?;
        let mut category = self
            .ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", category_id))?;

        self.ctx.category_repo().rename(id, &request.name).await?;
        category.name = request.name;

        info!(category_id = %id, "Category renamed");

        Ok(CategoryResponse::from(&category))
    }

    /// Delete a category. Fails while any item references it.
    #[instrument(skip(self))]
    pub async fn delete(&self, actor: Actor, category_id: &str) -> ServiceResult<()> {
        actor.require_catalog_manager()?;

        let id = parse_id(category_id, "category_id")?;
        self.ctx.category_repo().delete(id).await?;

        info!(category_id = %id, "Category deleted");

        Ok(())
    }
}
