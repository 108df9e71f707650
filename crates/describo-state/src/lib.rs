//! # describo-state: State Holders for the Describo Dashboard
//!
//! Every piece of mutable dashboard state lives here, behind explicit state
//! holders that are built with their dependencies and shared by `Arc`.
//!
//! ## Module Structure
//! ```text
//! describo-state/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── session.rs      ◄─── SessionManager (login, register, restore, logout)
//! ├── stores.rs       ◄─── StoreManager (collection, selection, mutations)
//! ├── products.rs     ◄─── ProductCatalog (list, detail, pagination)
//! ├── profile.rs      ◄─── ProfileManager (profile form, subscription)
//! ├── dashboard.rs    ◄─── Wiring and lifecycle (init, navigate, teardown)
//! ├── pending.rs      ◄─── Loading flag guard, LoadPhase
//! ├── remote/         ◄─── RemoteService trait + MockRemoteService
//! ├── storage.rs      ◄─── KeyValueStorage (memory, JSON file)
//! ├── config.rs       ◄─── DashboardConfig (TOML + env)
//! └── error.rs        ◄─── ServiceError, StorageError, ConfigError
//! ```
//!
//! ## Concurrency
//! Holders use `std::sync::RwLock` internally and never hold a lock across
//! an `.await`: a remote call is awaited first, then its mutation is applied
//! in one short critical section. All holders are `Send + Sync`.
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use describo_state::{MemoryStorage, MockRemoteService, SessionManager};
//!
//! # async fn demo() {
//! let session = SessionManager::new(
//!     Arc::new(MockRemoteService::default()),
//!     Arc::new(MemoryStorage::new()),
//! );
//! if session.login("user@test.com", "password123").await {
//!     println!("signed in as {:?}", session.current_user());
//! }
//! # }
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod pending;
pub mod products;
pub mod profile;
pub mod remote;
pub mod session;
pub mod storage;
pub mod stores;

pub use config::{ApiSettings, DashboardConfig, LatencySettings, StorageSettings};
pub use dashboard::{Dashboard, InitReport};
pub use error::{
    ConfigError, ConfigResult, ServiceError, ServiceResult, StorageError, StorageResult,
};
pub use pending::LoadPhase;
pub use products::{ProductCatalog, ProductEdit, ProductPage};
pub use profile::{ProfileEdit, ProfileManager, SubscriptionChange};
pub use remote::{Endpoint, MockRemoteService, RemoteService};
pub use session::{ResetPasswordOutcome, SessionManager};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use stores::{StoreManager, StoreSnapshot};
