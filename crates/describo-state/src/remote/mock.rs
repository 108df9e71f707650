//! # Mock Remote Service
//!
//! In-process backend answering canned JSON payloads after a fixed delay per
//! endpoint. Stands in for the real API until it exists and drives every
//! latency-dependent test.
//!
//! ## Test Hooks
//! - [`MockRemoteService::set_offline`]: every call fails with
//!   [`ServiceError::Unavailable`] once its delay has elapsed
//! - [`MockRemoteService::push_delay`]: one-shot delay for the next call,
//!   used to make a later call resolve first
//! - [`MockRemoteService::revoke_token`]: makes `validate_token` refuse a token
//! - [`MockRemoteService::calls`]: every endpoint hit so far, in call order
//! - [`MockRemoteService::requested_urls`]: the same calls as full URLs built
//!   from [`ApiSettings`]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use describo_core::{
    AuthUser, EcommerceIntegration, Product, ProductId, Store, StoreDraft, StoreId,
    StoreSettings,
};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use super::fixtures;
use super::{
    AuthResponse, Endpoint, LoginCredentials, RegisterData, RemoteService,
    ResetPasswordResponse,
};
use crate::config::{ApiSettings, LatencySettings};
use crate::error::{ServiceError, ServiceResult};

/// Email of the seeded demo account.
pub const DEMO_EMAIL: &str = "user@test.com";

/// Password of the seeded demo account.
pub const DEMO_PASSWORD: &str = "password123";

const FIRST_REGISTERED_USER_ID: u64 = 456;

#[derive(Debug, Clone)]
struct MockAccount {
    password: String,
    user: AuthUser,
}

#[derive(Debug)]
struct MockState {
    /// Keyed by lowercased email.
    accounts: HashMap<String, MockAccount>,
    issued_tokens: HashSet<String>,
    next_user_id: u64,
    delay_overrides: VecDeque<Duration>,
    /// Endpoint and resolved URL of every call.
    calls: Vec<(Endpoint, String)>,
}

/// Canned backend with simulated latency.
#[derive(Debug)]
pub struct MockRemoteService {
    api: ApiSettings,
    latency: LatencySettings,
    offline: AtomicBool,
    state: Mutex<MockState>,
}

impl Default for MockRemoteService {
    fn default() -> Self {
        Self::new(LatencySettings::default())
    }
}

impl MockRemoteService {
    /// Mock with the given per-endpoint delays and the demo account seeded.
    pub fn new(latency: LatencySettings) -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(
            DEMO_EMAIL.to_string(),
            MockAccount {
                password: DEMO_PASSWORD.to_string(),
                user: AuthUser {
                    id: "123".to_string(),
                    name: "Test User".to_string(),
                    email: DEMO_EMAIL.to_string(),
                },
            },
        );

        MockRemoteService {
            api: ApiSettings::default(),
            latency,
            offline: AtomicBool::new(false),
            state: Mutex::new(MockState {
                accounts,
                issued_tokens: HashSet::new(),
                next_user_id: FIRST_REGISTERED_USER_ID,
                delay_overrides: VecDeque::new(),
                calls: Vec::new(),
            }),
        }
    }

    /// Mock that answers without delay.
    pub fn instant() -> Self {
        Self::new(LatencySettings::instant())
    }

    /// Resolves logged request URLs against `api` instead of the defaults.
    pub fn with_api(mut self, api: ApiSettings) -> Self {
        self.api = api;
        self
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every following call fail (or succeed again) as if the network dropped.
    pub fn set_offline(&self, offline: bool) {
        info!(offline, "Mock backend connectivity changed");
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Queues a delay that replaces the endpoint delay of the next call.
    pub fn push_delay(&self, delay: Duration) {
        self.lock().delay_overrides.push_back(delay);
    }

    /// Makes `validate_token` refuse a previously issued token.
    pub fn revoke_token(&self, token: &str) -> bool {
        self.lock().issued_tokens.remove(token)
    }

    /// Endpoints hit so far, in call order.
    pub fn calls(&self) -> Vec<Endpoint> {
        self.lock().calls.iter().map(|(endpoint, _)| *endpoint).collect()
    }

    /// URLs requested so far, in call order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.lock().calls.iter().map(|(_, url)| url.clone()).collect()
    }

    /// How many times an endpoint was hit.
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .count()
    }

    /// Records the call, waits out its delay and fails if offline.
    async fn respond(&self, endpoint: Endpoint, id: Option<i64>) -> ServiceResult<()> {
        let url = match self.api.endpoint_url(endpoint, id) {
            Ok(url) => url.to_string(),
            Err(_) => endpoint.path_for(id),
        };
        let delay = {
            let mut state = self.lock();
            state.calls.push((endpoint, url.clone()));
            state
                .delay_overrides
                .pop_front()
                .unwrap_or_else(|| self.latency.for_endpoint(endpoint))
        };

        debug!(
            method = endpoint.method(),
            %url,
            delay_ms = delay.as_millis() as u64,
            "Mock request"
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.offline.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable(format!("{endpoint}: network offline")));
        }
        Ok(())
    }

    fn issue_token(&self, user: AuthUser) -> ServiceResult<AuthResponse> {
        let token = format!("mock-{}", Uuid::new_v4());
        self.lock().issued_tokens.insert(token.clone());

        let body = json!({ "token": token, "user": user });
        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl RemoteService for MockRemoteService {
    async fn login(&self, credentials: &LoginCredentials) -> ServiceResult<AuthResponse> {
        self.respond(Endpoint::Login, None).await?;

        let account = self
            .lock()
            .accounts
            .get(&credentials.email.trim().to_lowercase())
            .cloned();

        match account {
            Some(account) if account.password == credentials.password => {
                self.issue_token(account.user)
            }
            _ => Err(ServiceError::Unauthorized),
        }
    }

    async fn register(&self, data: &RegisterData) -> ServiceResult<AuthResponse> {
        self.respond(Endpoint::Register, None).await?;

        let email = data.email.trim().to_lowercase();
        let user = {
            let mut state = self.lock();
            if state.accounts.contains_key(&email) {
                return Err(ServiceError::Conflict("Email already registered".to_string()));
            }

            let user = AuthUser {
                id: state.next_user_id.to_string(),
                name: data.name.trim().to_string(),
                email: email.clone(),
            };
            state.next_user_id += 1;
            state.accounts.insert(
                email,
                MockAccount {
                    password: data.password.clone(),
                    user: user.clone(),
                },
            );
            user
        };

        self.issue_token(user)
    }

    async fn reset_password(&self, email: &str) -> ServiceResult<ResetPasswordResponse> {
        self.respond(Endpoint::ResetPassword, None).await?;

        let body = json!({
            "message": format!("Password reset instructions sent to {}", email.trim())
        });
        Ok(serde_json::from_value(body)?)
    }

    async fn validate_token(&self, token: &str) -> ServiceResult<bool> {
        self.respond(Endpoint::ValidateToken, None).await?;
        Ok(self.lock().issued_tokens.contains(token))
    }

    async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        self.respond(Endpoint::ListProducts, None).await?;
        Ok(serde_json::from_value(fixtures::products_payload())?)
    }

    async fn product_by_id(&self, id: ProductId) -> ServiceResult<Product> {
        self.respond(Endpoint::ProductById, Some(id)).await?;

        let products: Vec<Product> = serde_json::from_value(fixtures::products_payload())?;
        products
            .into_iter()
            .find(|product| product.id == id)
            .ok_or_else(|| ServiceError::NotFound {
                resource: "Product".to_string(),
                id: id.to_string(),
            })
    }

    async fn list_stores(&self) -> ServiceResult<Vec<Store>> {
        self.respond(Endpoint::ListStores, None).await?;
        Ok(serde_json::from_value(fixtures::stores_payload())?)
    }

    async fn save_store_settings(
        &self,
        id: StoreId,
        _settings: &StoreSettings,
    ) -> ServiceResult<()> {
        self.respond(Endpoint::SaveStoreSettings, Some(id)).await?;
        debug!(store_id = id, "Mock accepted store settings");
        Ok(())
    }

    async fn save_store_integration(
        &self,
        id: StoreId,
        integration: Option<&EcommerceIntegration>,
    ) -> ServiceResult<()> {
        self.respond(Endpoint::SaveStoreIntegration, Some(id)).await?;
        debug!(
            store_id = id,
            platform = ?integration.map(|i| i.platform),
            "Mock accepted store integration"
        );
        Ok(())
    }

    async fn create_store(&self, draft: &StoreDraft) -> ServiceResult<()> {
        self.respond(Endpoint::CreateStore, None).await?;
        debug!(name = %draft.name, "Mock accepted new store");
        Ok(())
    }

    async fn delete_store(&self, id: StoreId) -> ServiceResult<()> {
        self.respond(Endpoint::DeleteStore, Some(id)).await?;
        debug!(store_id = id, "Mock accepted store deletion");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn demo_credentials() -> LoginCredentials {
        LoginCredentials {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_auth_latency() {
        let mock = MockRemoteService::default();
        let started = Instant::now();

        let response = mock.login(&demo_credentials()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(response.user.id, "123");
        assert!(mock.validate_token(&response.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let mock = MockRemoteService::instant();
        let result = mock
            .login(&LoginCredentials {
                email: DEMO_EMAIL.to_string(),
                password: "wrong".to_string(),
            })
            .await;
        assert_eq!(result, Err(ServiceError::Unauthorized));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let mock = MockRemoteService::instant();
        let data = RegisterData {
            name: "Ana".to_string(),
            email: "Ana@Shop.com".to_string(),
            password: "secret1".to_string(),
        };

        let registered = mock.register(&data).await.unwrap();
        assert_eq!(registered.user.id, "456");
        assert_eq!(registered.user.email, "ana@shop.com");

        assert!(matches!(
            mock.register(&data).await,
            Err(ServiceError::Conflict(_))
        ));

        let login = mock
            .login(&LoginCredentials {
                email: "ana@shop.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        assert_ne!(login.token, registered.token);
    }

    #[tokio::test]
    async fn test_revoked_token_is_refused() {
        let mock = MockRemoteService::instant();
        let response = mock.login(&demo_credentials()).await.unwrap();

        assert!(mock.revoke_token(&response.token));
        assert!(!mock.validate_token(&response.token).await.unwrap());
        assert!(!mock.validate_token("never-issued").await.unwrap());
    }

    #[tokio::test]
    async fn test_offline_fails_every_call() {
        let mock = MockRemoteService::instant();
        mock.set_offline(true);

        let err = mock.list_stores().await.unwrap_err();
        assert!(err.is_retryable());

        mock.set_offline(false);
        assert_eq!(mock.list_stores().await.unwrap().len(), 2);
        assert_eq!(mock.call_count(Endpoint::ListStores), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_override_applies_once() {
        let mock = MockRemoteService::default();
        mock.push_delay(Duration::from_millis(10));

        let started = Instant::now();
        mock.delete_store(1).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(100));

        let started = Instant::now();
        mock.delete_store(1).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_product_by_id() {
        let mock = MockRemoteService::instant();
        assert_eq!(mock.product_by_id(2).await.unwrap().product_name, "Fone Bluetooth X200");
        assert!(matches!(
            mock.product_by_id(99).await,
            Err(ServiceError::NotFound { .. })
        ));
        assert_eq!(
            mock.calls(),
            vec![Endpoint::ProductById, Endpoint::ProductById]
        );
    }

    #[tokio::test]
    async fn test_requests_resolve_against_api_settings() {
        let api = ApiSettings {
            protocol: "https".to_string(),
            host: "api.describo.dev".to_string(),
            version: "v2".to_string(),
        };
        let mock = MockRemoteService::instant().with_api(api);

        mock.product_by_id(2).await.unwrap();
        mock.validate_token("tok").await.unwrap();
        mock.delete_store(4).await.unwrap();

        assert_eq!(
            mock.requested_urls(),
            vec![
                "https://api.describo.dev/api/v2/products/2",
                "https://api.describo.dev/api/v2/auth/validate-token",
                "https://api.describo.dev/api/v2/stores/4",
            ]
        );
    }
}
