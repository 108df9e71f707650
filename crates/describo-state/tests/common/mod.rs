//! Shared fixtures for the integration tests.
//!
//! [`SeededRemote`] wraps the mock backend and swaps the store list it
//! serves, so a test can start from an exact collection (e.g. ids 1 and 3)
//! while keeping the mock's latency, offline switch and call log.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use describo_core::{
    EcommerceIntegration, FormatPreferences, Product, ProductId, Store, StoreDraft, StoreId,
    StoreSettings, WritingTone,
};
use describo_state::remote::{
    AuthResponse, LoginCredentials, RegisterData, RemoteService, ResetPasswordResponse,
};
use describo_state::{LatencySettings, MemoryStorage, MockRemoteService, ServiceResult};

pub struct SeededRemote {
    pub inner: Arc<MockRemoteService>,
    stores: Vec<Store>,
}

impl SeededRemote {
    pub fn new(inner: Arc<MockRemoteService>, ids: &[StoreId]) -> Self {
        SeededRemote {
            inner,
            stores: ids.iter().map(|&id| store(id)).collect(),
        }
    }
}

#[async_trait]
impl RemoteService for SeededRemote {
    async fn login(&self, credentials: &LoginCredentials) -> ServiceResult<AuthResponse> {
        self.inner.login(credentials).await
    }

    async fn register(&self, data: &RegisterData) -> ServiceResult<AuthResponse> {
        self.inner.register(data).await
    }

    async fn reset_password(&self, email: &str) -> ServiceResult<ResetPasswordResponse> {
        self.inner.reset_password(email).await
    }

    async fn validate_token(&self, token: &str) -> ServiceResult<bool> {
        self.inner.validate_token(token).await
    }

    async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        self.inner.list_products().await
    }

    async fn product_by_id(&self, id: ProductId) -> ServiceResult<Product> {
        self.inner.product_by_id(id).await
    }

    async fn list_stores(&self) -> ServiceResult<Vec<Store>> {
        self.inner.list_stores().await?;
        Ok(self.stores.clone())
    }

    async fn save_store_settings(
        &self,
        id: StoreId,
        settings: &StoreSettings,
    ) -> ServiceResult<()> {
        self.inner.save_store_settings(id, settings).await
    }

    async fn save_store_integration(
        &self,
        id: StoreId,
        integration: Option<&EcommerceIntegration>,
    ) -> ServiceResult<()> {
        self.inner.save_store_integration(id, integration).await
    }

    async fn create_store(&self, draft: &StoreDraft) -> ServiceResult<()> {
        self.inner.create_store(draft).await
    }

    async fn delete_store(&self, id: StoreId) -> ServiceResult<()> {
        self.inner.delete_store(id).await
    }
}

/// Mock backend with production delays, for tests on a paused clock.
pub fn slow_remote() -> Arc<MockRemoteService> {
    Arc::new(MockRemoteService::new(LatencySettings::default()))
}

pub fn instant_remote() -> Arc<MockRemoteService> {
    Arc::new(MockRemoteService::instant())
}

pub fn memory_storage() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::new())
}

pub fn store(id: StoreId) -> Store {
    let created = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid fixture date");
    Store::from_draft(id, draft(&format!("Loja {id}")), created)
}

pub fn draft(name: &str) -> StoreDraft {
    StoreDraft {
        name: name.to_string(),
        store_type: "general".to_string(),
        owner_user_id: "123".to_string(),
        ..StoreDraft::default()
    }
}

pub fn settings(tone: WritingTone, max_description_length: u32) -> StoreSettings {
    StoreSettings {
        writing_tone: tone,
        format_preferences: FormatPreferences {
            max_description_length,
            ..FormatPreferences::default()
        },
        default_category: Some("Casa".to_string()),
        seo_optimization: true,
    }
}
