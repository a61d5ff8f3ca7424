//! Data transfer objects for the service layer

mod mappers;
mod requests;
mod responses;

pub use requests::{
    AddCartLineRequest, CreateCategoryRequest, CreateItemRequest, LoginRequest,
    RefreshTokenRequest, RegisterRequest, ReturnItemRequest, UpdateCartLineRequest,
    UpdateCategoryRequest, UpdateItemRequest,
};
pub use responses::{
    ActivityResponse, AuthResponse, CartLineResponse, CartResponse, CategoryResponse,
    CommitReportResponse, CommittedLineResponse, CurrentUserResponse, DashboardStatsResponse,
    FailedLineResponse, ItemResponse, ItemSlimResponse, LedgerEntryResponse,
};
