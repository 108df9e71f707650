//! # Dashboard Wiring
//!
//! Builds the state holders from one remote service and one storage, and
//! runs their lifecycle.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dashboard                                            │
//! │                                                                         │
//! │   Arc<dyn RemoteService> ──┬──► SessionManager ◄── Arc<dyn KeyValue..>  │
//! │                            ├──► StoreManager                            │
//! │                            └──► ProductCatalog                          │
//! │                                 ProfileManager (local only)             │
//! │                                                                         │
//! │   init()      restore session + load stores, concurrently              │
//! │   navigate()  route guard against the current session                  │
//! │   teardown()  logout + drop stores and products                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each holder is its own `Arc`, so a consumer keeps only the ones it needs.

use std::sync::Arc;

use describo_core::routing::{self, Navigation};
use describo_core::UserProfile;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::StorageResult;
use crate::products::ProductCatalog;
use crate::profile::ProfileManager;
use crate::remote::{demo_profile, MockRemoteService, RemoteService};
use crate::session::SessionManager;
use crate::storage::{FileStorage, KeyValueStorage};
use crate::stores::StoreManager;

/// What [`Dashboard::init`] ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    pub session_restored: bool,
    pub stores_loaded: bool,
}

/// The dashboard's state holders.
#[derive(Clone)]
pub struct Dashboard {
    pub session: Arc<SessionManager>,
    pub stores: Arc<StoreManager>,
    pub products: Arc<ProductCatalog>,
    pub profile: Arc<ProfileManager>,
}

impl Dashboard {
    pub fn new(
        remote: Arc<dyn RemoteService>,
        storage: Arc<dyn KeyValueStorage>,
        profile: UserProfile,
    ) -> Self {
        Dashboard {
            session: Arc::new(SessionManager::new(remote.clone(), storage)),
            stores: Arc::new(StoreManager::new(remote.clone())),
            products: Arc::new(ProductCatalog::new(remote)),
            profile: Arc::new(ProfileManager::new(profile)),
        }
    }

    /// Mock backend with the configured latencies and file storage at the
    /// configured path.
    pub fn from_config(config: &DashboardConfig) -> StorageResult<Self> {
        let storage = match config.storage_path() {
            Some(path) => FileStorage::new(path),
            None => FileStorage::in_data_dir()?,
        };
        info!(path = ?storage.path(), "Using session storage");

        let remote = Arc::new(
            MockRemoteService::new(config.latency.clone()).with_api(config.api.clone()),
        );
        Ok(Self::new(remote, Arc::new(storage), demo_profile()))
    }

    /// Restores the session and loads the store collection.
    pub async fn init(&self) -> InitReport {
        let (session_restored, stores_loaded) =
            tokio::join!(self.session.restore(), self.stores.load_all());

        info!(session_restored, stores_loaded, "Dashboard initialised");
        InitReport {
            session_restored,
            stores_loaded,
        }
    }

    /// Applies the route guard to a path for the current session.
    pub fn navigate(&self, path: &str) -> Navigation {
        routing::resolve(path, self.session.is_authenticated())
    }

    /// Signs out and drops the per-user collections.
    pub fn teardown(&self) {
        self.session.logout();
        self.stores.reset();
        self.products.clear();
        self.profile.cancel();
        info!("Dashboard torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{DEMO_EMAIL, DEMO_PASSWORD};
    use crate::storage::MemoryStorage;
    use describo_core::routing::Route;

    fn dashboard() -> Dashboard {
        Dashboard::new(
            Arc::new(MockRemoteService::instant()),
            Arc::new(MemoryStorage::new()),
            demo_profile(),
        )
    }

    #[tokio::test]
    async fn test_init_without_stored_session() {
        let dashboard = dashboard();

        let report = dashboard.init().await;

        assert!(!report.session_restored);
        assert!(report.stores_loaded);
        assert_eq!(dashboard.navigate("/settings"), Navigation::Redirect(Route::Login));
    }

    #[tokio::test]
    async fn test_navigation_after_login_and_teardown() {
        let dashboard = dashboard();
        dashboard.init().await;
        assert!(dashboard.session.login(DEMO_EMAIL, DEMO_PASSWORD).await);

        assert_eq!(
            dashboard.navigate("/products/2"),
            Navigation::Render(Route::ProductDetail(2))
        );
        assert_eq!(dashboard.navigate("/unknown"), Navigation::Redirect(Route::Home));

        dashboard.teardown();

        assert!(dashboard.stores.stores().is_empty());
        assert_eq!(dashboard.navigate("/products"), Navigation::Redirect(Route::Login));
    }

    #[test]
    fn test_from_config_uses_storage_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = DashboardConfig::default();
        config.storage.path = Some(dir.path().join("session.json"));

        let dashboard = Dashboard::from_config(&config).unwrap();
        assert!(!dashboard.session.is_authenticated());
    }
}
