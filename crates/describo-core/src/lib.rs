//! # describo-core: Pure Domain Logic for the Describo Dashboard
//!
//! This crate holds the domain model shared by every layer of the dashboard:
//! stores and their description settings, products, user profiles, the
//! authenticated session, form validation and route resolution.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Describo Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard UI (screens)                       │   │
//! │  │    Login ──► Products ──► Product Detail ──► Settings/Profile   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    describo-state                               │   │
//! │  │    SessionManager, StoreManager, ProductCatalog, Profile        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ describo-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  session  │  │  routing  │  │ validation│  │   │
//! │  │   │   Store   │  │  Session  │  │   Route   │  │   forms   │  │   │
//! │  │   │  Product  │  │ AuthUser  │  │Navigation │  │ settings  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Store, StoreSettings, Product, UserProfile)
//! - [`session`] - The authenticated-identity state and its invariant
//! - [`routing`] - Dashboard paths and the authentication guard
//! - [`error`] - Domain error types
//! - [`validation`] - Form and settings validation
//!
//! ## Example Usage
//!
//! ```rust
//! use describo_core::routing::{resolve, Navigation, Route};
//!
//! // Anonymous visitors are sent to the login screen.
//! assert_eq!(resolve("/settings", false), Navigation::Redirect(Route::Login));
//!
//! // Signed-in users land on the requested screen.
//! assert_eq!(resolve("/products/7", true), Navigation::Render(Route::ProductDetail(7)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod routing;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use session::{AuthUser, Session};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Lower bound for `FormatPreferences::max_description_length`.
pub const MIN_DESCRIPTION_LENGTH: u32 = 100;

/// Upper bound for `FormatPreferences::max_description_length`.
pub const MAX_DESCRIPTION_LENGTH: u32 = 5000;

/// Rows shown per page on the products table unless the user picks another size.
pub const DEFAULT_ROWS_PER_PAGE: usize = 5;
