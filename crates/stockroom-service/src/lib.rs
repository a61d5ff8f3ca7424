//! # stockroom-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the service surface used by the API layer
pub use dto::{
    AddCartLineRequest, ActivityResponse, AuthResponse, CartLineResponse, CartResponse,
    CategoryResponse, CommitReportResponse, CommittedLineResponse, CreateCategoryRequest,
    CreateItemRequest, CurrentUserResponse, DashboardStatsResponse, FailedLineResponse,
    ItemResponse, LedgerEntryResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    ReturnItemRequest, UpdateCartLineRequest, UpdateCategoryRequest, UpdateItemRequest,
};
pub use services::{
    Actor, AuthService, CartService, CatalogService, CategoryService, CheckoutService,
    DashboardService, InventoryService, LowStockNotifier, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
