//! # Store Configuration Manager
//!
//! Owns the store collection and the selected-store reference.
//!
//! ## Mutation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  call ──► PendingGuard::enter ──► validate ──► remote.await ──► apply   │
//! │                                      │ invalid       │ error       │    │
//! │                                      ▼               ▼             ▼    │
//! │                          last_error, false   last_error, false  replace │
//! │                          (no network call)   (nothing changes)  record  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation holds the guard for its whole run, so the phase goes
//! through `Loading` and back to `Ready` even when the call is rejected
//! before reaching the service.
//!
//! The apply step re-reads the collection under the write lock and replaces
//! a single record. Two mutations on the same store apply in the order their
//! remote calls resolve, so the one resolving last wins even if it was
//! invoked first.
//!
//! ## Selection
//! The selection is an id. [`StoreManager::selected_store`] resolves it
//! against the collection on every read, so updates to the selected store
//! are visible through it immediately.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use describo_core::validation::{validate_integration, validate_store_draft, validate_store_settings};
use describo_core::{CoreError, EcommerceIntegration, Store, StoreDraft, StoreId, StoreSettings};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::pending::{read, write, LoadPhase, PendingCounter, PendingGuard, TracksPending};
use crate::remote::RemoteService;

/// Read-only view of the store manager state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub stores: Vec<Store>,
    pub selected_store: Option<Store>,
    pub phase: LoadPhase,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct StoreState {
    stores: Vec<Store>,
    selected: Option<StoreId>,
    /// Highest id ever seen in this session; new ids go above it.
    highest_id: StoreId,
    last_error: Option<String>,
    pending: PendingCounter,
}

impl TracksPending for StoreState {
    fn counter(&mut self) -> &mut PendingCounter {
        &mut self.pending
    }
}

impl StoreState {
    fn find_mut(&mut self, id: StoreId) -> Option<&mut Store> {
        self.stores.iter_mut().find(|store| store.id == id)
    }

    fn contains(&self, id: StoreId) -> bool {
        self.stores.iter().any(|store| store.id == id)
    }

    fn fail(&mut self, message: impl Into<String>) -> bool {
        self.last_error = Some(message.into());
        false
    }

    fn next_id(&mut self) -> StoreId {
        let current_max = self.stores.iter().map(|store| store.id).max().unwrap_or(0);
        self.highest_id = self.highest_id.max(current_max) + 1;
        self.highest_id
    }
}

/// Next `updated_at` for a record: now, or just past the previous value if
/// the clock hasn't moved.
fn touch(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

/// Store collection state holder.
pub struct StoreManager {
    remote: Arc<dyn RemoteService>,
    state: RwLock<StoreState>,
}

impl StoreManager {
    pub fn new(remote: Arc<dyn RemoteService>) -> Self {
        StoreManager {
            remote,
            state: RwLock::new(StoreState::default()),
        }
    }

    // =========================================================================
    // Readers
    // =========================================================================

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = read(&self.state);
        StoreSnapshot {
            stores: state.stores.clone(),
            selected_store: state
                .selected
                .and_then(|id| state.stores.iter().find(|store| store.id == id).cloned()),
            phase: state.pending.phase(),
            is_loading: state.pending.is_loading(),
            last_error: state.last_error.clone(),
        }
    }

    pub fn stores(&self) -> Vec<Store> {
        read(&self.state).stores.clone()
    }

    pub fn store(&self, id: StoreId) -> Option<Store> {
        read(&self.state)
            .stores
            .iter()
            .find(|store| store.id == id)
            .cloned()
    }

    /// The selected store as it currently is in the collection.
    pub fn selected_store(&self) -> Option<Store> {
        let selected = read(&self.state).selected?;
        self.store(selected)
    }

    pub fn selected_id(&self) -> Option<StoreId> {
        read(&self.state).selected
    }

    pub fn phase(&self) -> LoadPhase {
        read(&self.state).pending.phase()
    }

    pub fn is_loading(&self) -> bool {
        read(&self.state).pending.is_loading()
    }

    pub fn last_error(&self) -> Option<String> {
        read(&self.state).last_error.clone()
    }

    pub fn clear_error(&self) {
        write(&self.state).last_error = None;
    }

    // =========================================================================
    // Load / Select
    // =========================================================================

    /// Fetches the collection. On failure the collection is left empty.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> bool {
        let _pending = self.begin();

        let result = self.remote.list_stores().await;

        let mut state = write(&self.state);
        match result {
            Ok(stores) => {
                let loaded_max = stores.iter().map(|store| store.id).max().unwrap_or(0);
                state.highest_id = state.highest_id.max(loaded_max);
                if let Some(selected) = state.selected {
                    if !stores.iter().any(|store| store.id == selected) {
                        state.selected = None;
                    }
                }
                info!(count = stores.len(), "Stores loaded");
                state.stores = stores;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to load stores");
                state.stores.clear();
                state.selected = None;
                state.fail(format!("Failed to load stores: {}", e.user_message()))
            }
        }
    }

    /// Selects a store. An unknown id keeps the previous selection.
    pub fn select(&self, id: StoreId) -> bool {
        let mut state = write(&self.state);
        if !state.contains(id) {
            debug!(store_id = id, "Select on unknown store");
            return state.fail(CoreError::StoreNotFound(id).to_string());
        }
        state.selected = Some(id);
        state.last_error = None;
        true
    }

    /// Clears the selection.
    pub fn deselect(&self) {
        write(&self.state).selected = None;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces a store's settings once the remote call resolves.
    #[instrument(skip(self, settings))]
    pub async fn update_settings(&self, id: StoreId, settings: StoreSettings) -> bool {
        let _pending = self.begin();
        if let Err(e) = validate_store_settings(&settings) {
            return self.reject(CoreError::from(e));
        }
        if !self.exists_or_fail(id) {
            return false;
        }

        let result = self.remote.save_store_settings(id, &settings).await;

        let mut state = write(&self.state);
        if let Err(e) = result {
            warn!(store_id = id, error = %e, "Failed to save store settings");
            return state.fail(format!("Failed to update store settings: {}", e.user_message()));
        }

        match state.find_mut(id) {
            Some(store) => {
                store.settings = settings;
                store.updated_at = touch(store.updated_at);
                info!(store_id = id, "Store settings updated");
                true
            }
            None => state.fail(CoreError::StoreNotFound(id).to_string()),
        }
    }

    /// Sets or (with `None`) removes a store's marketplace integration.
    #[instrument(skip(self, integration))]
    pub async fn update_integration(
        &self,
        id: StoreId,
        integration: Option<EcommerceIntegration>,
    ) -> bool {
        let _pending = self.begin();
        if let Some(integration) = &integration {
            if let Err(e) = validate_integration(integration) {
                return self.reject(CoreError::from(e));
            }
        }
        if !self.exists_or_fail(id) {
            return false;
        }

        let result = self
            .remote
            .save_store_integration(id, integration.as_ref())
            .await;

        let mut state = write(&self.state);
        if let Err(e) = result {
            warn!(store_id = id, error = %e, "Failed to save store integration");
            return state.fail(format!("Failed to update integration: {}", e.user_message()));
        }

        match state.find_mut(id) {
            Some(store) => {
                let connected = integration.is_some();
                store.ecommerce_integration = integration;
                store.updated_at = touch(store.updated_at);
                info!(store_id = id, connected, "Store integration updated");
                true
            }
            None => state.fail(CoreError::StoreNotFound(id).to_string()),
        }
    }

    /// Adds a store. The id is assigned once the remote call resolves and is
    /// greater than every id seen so far.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: StoreDraft) -> Option<Store> {
        let _pending = self.begin();
        if let Err(e) = validate_store_draft(&draft) {
            self.reject(CoreError::from(e));
            return None;
        }

        let result = self.remote.create_store(&draft).await;

        let mut state = write(&self.state);
        if let Err(e) = result {
            warn!(error = %e, "Failed to create store");
            state.fail(format!("Failed to create store: {}", e.user_message()));
            return None;
        }

        let id = state.next_id();
        let store = Store::from_draft(id, draft, Utc::now());
        state.stores.push(store.clone());
        info!(store_id = id, "Store created");
        Some(store)
    }

    /// Removes a store, clearing the selection if it pointed at it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: StoreId) -> bool {
        let _pending = self.begin();
        if !self.exists_or_fail(id) {
            return false;
        }

        let result = self.remote.delete_store(id).await;

        let mut state = write(&self.state);
        if let Err(e) = result {
            warn!(store_id = id, error = %e, "Failed to delete store");
            return state.fail(format!("Failed to delete store: {}", e.user_message()));
        }

        let Some(index) = state.stores.iter().position(|store| store.id == id) else {
            return state.fail(CoreError::StoreNotFound(id).to_string());
        };
        state.stores.remove(index);
        if state.selected == Some(id) {
            state.selected = None;
        }
        info!(store_id = id, "Store deleted");
        true
    }

    /// Drops the collection and selection, as on sign-out.
    pub fn reset(&self) {
        let mut state = write(&self.state);
        state.stores.clear();
        state.selected = None;
        state.last_error = None;
        state.pending.reset();
        debug!("Store manager reset");
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn begin(&self) -> PendingGuard<'_, StoreState> {
        let guard = PendingGuard::enter(&self.state);
        write(&self.state).last_error = None;
        guard
    }

    fn reject(&self, error: CoreError) -> bool {
        debug!(%error, "Store mutation rejected");
        write(&self.state).fail(error.to_string())
    }

    fn exists_or_fail(&self, id: StoreId) -> bool {
        let mut state = write(&self.state);
        if state.contains(id) {
            return true;
        }
        state.fail(CoreError::StoreNotFound(id).to_string())
    }
}
