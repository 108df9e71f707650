//! # Product Catalog
//!
//! Backs the products table and the product detail screen. Products are
//! fetched from the remote service; edits and deletions stay local.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use describo_core::{CoreError, Product, ProductDescription, ProductId, DEFAULT_ROWS_PER_PAGE};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::pending::{read, write, LoadPhase, PendingCounter, PendingGuard, TracksPending};
use crate::remote::RemoteService;

/// Changes made on the product detail form. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductEdit {
    pub product_name: Option<String>,
    pub store_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<ProductDescription>,
}

/// One page of the products table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    /// Zero-based.
    pub page: usize,
    pub rows_per_page: usize,
    pub total: usize,
    pub page_count: usize,
}

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Product>,
    last_error: Option<String>,
    pending: PendingCounter,
}

impl TracksPending for CatalogState {
    fn counter(&mut self) -> &mut PendingCounter {
        &mut self.pending
    }
}

/// Product list state holder.
pub struct ProductCatalog {
    remote: Arc<dyn RemoteService>,
    state: RwLock<CatalogState>,
}

impl ProductCatalog {
    pub fn new(remote: Arc<dyn RemoteService>) -> Self {
        ProductCatalog {
            remote,
            state: RwLock::new(CatalogState::default()),
        }
    }

    pub fn products(&self) -> Vec<Product> {
        read(&self.state).products.clone()
    }

    /// A product already in the list.
    pub fn product(&self, id: ProductId) -> Option<Product> {
        read(&self.state)
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned()
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

    /// Fetches the product list.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> bool {
        let _pending = self.begin();
        let result = self.remote.list_products().await;

        let mut state = write(&self.state);
        match result {
            Ok(products) => {
                info!(count = products.len(), "Products loaded");
                state.products = products;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to load products");
                state.last_error = Some(format!("Failed to load products: {}", e.user_message()));
                false
            }
        }
    }

    /// Fetches one product for the detail screen and refreshes it in the list.
    #[instrument(skip(self))]
    pub async fn fetch(&self, id: ProductId) -> Option<Product> {
        let _pending = self.begin();
        let result = self.remote.product_by_id(id).await;

        let mut state = write(&self.state);
        match result {
            Ok(product) => {
                if let Some(existing) = state.products.iter_mut().find(|p| p.id == id) {
                    *existing = product.clone();
                }
                Some(product)
            }
            Err(e) => {
                warn!(product_id = id, error = %e, "Failed to fetch product");
                state.last_error = Some(e.user_message());
                None
            }
        }
    }

    /// A zero-based page of the list. Rows per page of 0 means the default (5).
    pub fn page(&self, page: usize, rows_per_page: usize) -> ProductPage {
        let rows_per_page = if rows_per_page == 0 {
            DEFAULT_ROWS_PER_PAGE
        } else {
            rows_per_page
        };

        let state = read(&self.state);
        let total = state.products.len();
        let items = state
            .products
            .iter()
            .skip(page.saturating_mul(rows_per_page))
            .take(rows_per_page)
            .cloned()
            .collect();

        ProductPage {
            items,
            page,
            rows_per_page,
            total,
            page_count: total.div_ceil(rows_per_page),
        }
    }

    /// Applies a local edit and refreshes `updated_at`.
    pub fn edit(&self, id: ProductId, edit: ProductEdit) -> bool {
        let mut state = write(&self.state);
        let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
            state.last_error = Some(CoreError::ProductNotFound(id).to_string());
            return false;
        };

        if let Some(name) = edit.product_name {
            product.product_name = name;
        }
        if let Some(store_name) = edit.store_name {
            product.store_name = store_name;
        }
        if let Some(category) = edit.category {
            product.category = category;
        }
        if let Some(description) = edit.description {
            product.description_generated = Some(description);
        }
        product.updated_at = Utc::now().max(product.updated_at);

        state.last_error = None;
        debug!(product_id = id, "Product edited locally");
        true
    }

    /// Removes a product from the local list.
    pub fn delete(&self, id: ProductId) -> bool {
        let mut state = write(&self.state);
        let before = state.products.len();
        state.products.retain(|product| product.id != id);

        if state.products.len() == before {
            state.last_error = Some(CoreError::ProductNotFound(id).to_string());
            return false;
        }
        debug!(product_id = id, "Product removed locally");
        true
    }

    /// Drops the list, as on sign-out.
    pub fn clear(&self) {
        let mut state = write(&self.state);
        state.products.clear();
        state.last_error = None;
        state.pending.reset();
    }

    fn begin(&self) -> PendingGuard<'_, CatalogState> {
        let guard = PendingGuard::enter(&self.state);
        write(&self.state).last_error = None;
        guard
    }
}
