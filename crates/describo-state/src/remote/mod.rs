//! # Remote Service Boundary
//!
//! One async method per backend endpoint. Managers only ever talk to a
//! `dyn RemoteService`, so the canned [`MockRemoteService`] and a future HTTP
//! client are interchangeable.
//!
//! ## Endpoints
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                          Trait method                   │
//! │  ──────  ────                          ────────────                   │
//! │  POST    /auth/login                   login                          │
//! │  POST    /auth/register                register                       │
//! │  POST    /auth/reset-password          reset_password                 │
//! │  POST    /auth/validate-token          validate_token (Bearer)        │
//! │  GET     /products                     list_products                  │
//! │  GET     /products/{id}                product_by_id                  │
//! │  GET     /stores                       list_stores                    │
//! │  PUT     /stores/{id}/settings         save_store_settings            │
//! │  PUT     /stores/{id}/integration      save_store_integration         │
//! │  POST    /stores                       create_store                   │
//! │  DELETE  /stores/{id}                  delete_store                   │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```

mod fixtures;
mod mock;

pub use fixtures::demo_profile;
pub use mock::{MockRemoteService, DEMO_EMAIL, DEMO_PASSWORD};

use async_trait::async_trait;
use describo_core::{
    AuthUser, EcommerceIntegration, Product, ProductId, Store, StoreDraft, StoreId,
    StoreSettings,
};
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;

// =============================================================================
// Endpoints
// =============================================================================

/// Every endpoint of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Login,
    Register,
    ResetPassword,
    ValidateToken,
    ListProducts,
    ProductById,
    ListStores,
    SaveStoreSettings,
    SaveStoreIntegration,
    CreateStore,
    DeleteStore,
}

impl Endpoint {
    pub fn method(&self) -> &'static str {
        match self {
            Endpoint::Login
            | Endpoint::Register
            | Endpoint::ResetPassword
            | Endpoint::ValidateToken
            | Endpoint::CreateStore => "POST",
            Endpoint::SaveStoreSettings | Endpoint::SaveStoreIntegration => "PUT",
            Endpoint::DeleteStore => "DELETE",
            Endpoint::ListProducts | Endpoint::ProductById | Endpoint::ListStores => "GET",
        }
    }

    /// Path template relative to the versioned base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Login => "/auth/login",
            Endpoint::Register => "/auth/register",
            Endpoint::ResetPassword => "/auth/reset-password",
            Endpoint::ValidateToken => "/auth/validate-token",
            Endpoint::ListProducts => "/products",
            Endpoint::ProductById => "/products/{id}",
            Endpoint::ListStores | Endpoint::CreateStore => "/stores",
            Endpoint::SaveStoreSettings => "/stores/{id}/settings",
            Endpoint::SaveStoreIntegration => "/stores/{id}/integration",
            Endpoint::DeleteStore => "/stores/{id}",
        }
    }

    /// Path with `{id}` substituted.
    pub fn path_for(&self, id: Option<i64>) -> String {
        match id {
            Some(id) => self.path().replace("{id}", &id.to_string()),
            None => self.path().to_string(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Answer of the login and register endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    pub message: String,
}

// =============================================================================
// Service trait
// =============================================================================

/// The backend as seen by the state managers.
#[async_trait]
pub trait RemoteService: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> ServiceResult<AuthResponse>;

    async fn register(&self, data: &RegisterData) -> ServiceResult<AuthResponse>;

    async fn reset_password(&self, email: &str) -> ServiceResult<ResetPasswordResponse>;

    /// `Ok(false)` means the service answered and refused the token.
    async fn validate_token(&self, token: &str) -> ServiceResult<bool>;

    async fn list_products(&self) -> ServiceResult<Vec<Product>>;

    async fn product_by_id(&self, id: ProductId) -> ServiceResult<Product>;

    async fn list_stores(&self) -> ServiceResult<Vec<Store>>;

    async fn save_store_settings(&self, id: StoreId, settings: &StoreSettings)
        -> ServiceResult<()>;

    /// `None` removes the integration.
    async fn save_store_integration(
        &self,
        id: StoreId,
        integration: Option<&EcommerceIntegration>,
    ) -> ServiceResult<()>;

    async fn create_store(&self, draft: &StoreDraft) -> ServiceResult<()>;

    async fn delete_store(&self, id: StoreId) -> ServiceResult<()>;
}
