//! Session lifecycle against the mock backend: login, register, reload
//! (restore), logout.

mod common;

use std::sync::Arc;
use std::time::Duration;

use describo_core::validation::validate_registration_form;
use describo_state::remote::{Endpoint, DEMO_EMAIL, DEMO_PASSWORD};
use describo_state::storage::{AUTH_TOKEN_KEY, AUTH_USER_KEY};
use describo_state::{FileStorage, KeyValueStorage, SessionManager};

#[tokio::test]
async fn test_login_accepts_only_known_credentials() {
    let remote = common::instant_remote();
    let storage = common::memory_storage();
    let session = SessionManager::new(remote.clone(), storage.clone());

    assert!(session.register("Ana", "ana@shop.com", "secret1").await);
    session.logout();

    let accepted = [(DEMO_EMAIL, DEMO_PASSWORD), ("ana@shop.com", "secret1")];
    for (email, password) in accepted {
        assert!(session.login(email, password).await, "{email} should sign in");
        let snapshot = session.snapshot();
        assert!(snapshot.is_authenticated());
        assert!(snapshot.auth_token().is_some());
        session.logout();
    }

    let refused = [
        (DEMO_EMAIL, "password12"),
        ("ana@shop.com", DEMO_PASSWORD),
        ("nobody@shop.com", "secret1"),
        ("", ""),
    ];
    for (email, password) in refused {
        assert!(!session.login(email, password).await, "{email} should be refused");
        let snapshot = session.snapshot();
        assert!(!snapshot.is_authenticated());
        assert!(snapshot.last_error().is_some());
        assert!(storage.get(AUTH_TOKEN_KEY).unwrap().is_none());
    }
}

#[tokio::test(start_paused = true)]
async fn test_loading_flag_spans_the_request() {
    let session = SessionManager::new(common::slow_remote(), common::memory_storage());

    let watch = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        session.is_loading()
    };
    let (signed_in, loading_midway) =
        tokio::join!(session.login(DEMO_EMAIL, DEMO_PASSWORD), watch);

    assert!(signed_in);
    assert!(loading_midway);
    assert!(!session.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_dropped_login_clears_loading() {
    let session = SessionManager::new(common::slow_remote(), common::memory_storage());

    let result =
        tokio::time::timeout(Duration::from_millis(100), session.login(DEMO_EMAIL, DEMO_PASSWORD))
            .await;

    assert!(result.is_err());
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_restore_after_reload() {
    let remote = common::instant_remote();
    let storage = common::memory_storage();

    let first = SessionManager::new(remote.clone(), storage.clone());
    assert!(first.login(DEMO_EMAIL, DEMO_PASSWORD).await);
    let token = first.snapshot().auth_token().map(str::to_string);

    let reloaded = SessionManager::new(remote.clone(), storage.clone());
    assert!(reloaded.restore().await);

    let snapshot = reloaded.snapshot();
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.auth_token().map(str::to_string), token);
    assert_eq!(snapshot.display_name(), Some("Test User"));
    assert!(!snapshot.is_loading());
}

#[tokio::test]
async fn test_logout_then_restore_stays_signed_out() {
    let remote = common::instant_remote();
    let storage = common::memory_storage();
    let session = SessionManager::new(remote.clone(), storage.clone());
    assert!(session.login(DEMO_EMAIL, DEMO_PASSWORD).await);

    session.logout();
    let reloaded = SessionManager::new(remote.clone(), storage.clone());
    assert!(!reloaded.restore().await);

    assert!(!reloaded.is_authenticated());
    assert!(storage.get(AUTH_TOKEN_KEY).unwrap().is_none());
    assert!(storage.get(AUTH_USER_KEY).unwrap().is_none());
    // Nothing stored, so there was nothing to validate.
    assert_eq!(remote.call_count(Endpoint::ValidateToken), 0);
}

#[tokio::test]
async fn test_refused_token_is_cleaned_up_silently() {
    let remote = common::instant_remote();
    let storage = common::memory_storage();
    let session = SessionManager::new(remote.clone(), storage.clone());
    assert!(session.login(DEMO_EMAIL, DEMO_PASSWORD).await);

    let token = storage.get(AUTH_TOKEN_KEY).unwrap().unwrap();
    assert!(remote.revoke_token(&token));

    let reloaded = SessionManager::new(remote.clone(), storage.clone());
    assert!(!reloaded.restore().await);

    let snapshot = reloaded.snapshot();
    assert!(!snapshot.is_authenticated());
    assert!(snapshot.last_error().is_none());
    assert!(storage.is_empty());
    assert_eq!(remote.call_count(Endpoint::ValidateToken), 1);
}

#[tokio::test(start_paused = true)]
async fn test_logout_during_restore_wins() {
    let remote = common::slow_remote();
    let storage = common::memory_storage();
    let first = SessionManager::new(remote.clone(), storage.clone());
    assert!(first.login(DEMO_EMAIL, DEMO_PASSWORD).await);

    let reloaded = SessionManager::new(remote.clone(), storage.clone());
    let sign_out = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        reloaded.logout();
    };
    let (restored, ()) = tokio::join!(reloaded.restore(), sign_out);

    assert!(!restored);
    assert!(!reloaded.is_authenticated());
    assert!(!reloaded.is_loading());
    assert!(storage.get(AUTH_TOKEN_KEY).unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_login_during_restore_of_stale_token_is_kept() {
    let remote = common::slow_remote();
    let storage = common::memory_storage();
    storage.set(AUTH_TOKEN_KEY, "expired-token").unwrap();
    storage
        .set(
            AUTH_USER_KEY,
            r#"{"id":"123","email":"user@test.com","name":"Test User"}"#,
        )
        .unwrap();

    let session = SessionManager::new(remote.clone(), storage.clone());
    remote.push_delay(Duration::from_millis(1500));
    let (restored, signed_in) =
        tokio::join!(session.restore(), session.login(DEMO_EMAIL, DEMO_PASSWORD));

    assert!(!restored);
    assert!(signed_in);
    assert!(session.is_authenticated());
    let token = session.snapshot().auth_token().map(str::to_string);
    assert!(token.is_some());
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), token);
    assert!(storage.get(AUTH_USER_KEY).unwrap().is_some());
}

#[tokio::test]
async fn test_token_without_user_record_is_discarded() {
    let remote = common::instant_remote();
    let storage = common::memory_storage();
    storage.set(AUTH_TOKEN_KEY, "orphan-token").unwrap();

    let session = SessionManager::new(remote.clone(), storage.clone());
    assert!(!session.restore().await);

    assert!(storage.is_empty());
    assert!(session.last_error().is_none());
}

#[tokio::test]
async fn test_session_survives_reload_with_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let remote = common::instant_remote();

    let first = SessionManager::new(remote.clone(), Arc::new(FileStorage::new(&path)));
    assert!(first.login(DEMO_EMAIL, DEMO_PASSWORD).await);

    let reloaded = SessionManager::new(remote.clone(), Arc::new(FileStorage::new(&path)));
    assert!(reloaded.restore().await);
    assert_eq!(
        reloaded.current_user().map(|user| user.id),
        Some("123".to_string())
    );

    reloaded.logout();
    let storage = FileStorage::new(&path);
    assert!(storage.get(AUTH_TOKEN_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_registration_form_checked_before_request() {
    let remote = common::instant_remote();
    let session = SessionManager::new(remote.clone(), common::memory_storage());

    let form = ("Bia", "bia@shop.com", "12345", "12345");
    if validate_registration_form(form.0, form.1, form.2, form.3).is_ok() {
        session.register(form.0, form.1, form.2).await;
    }

    assert!(remote.calls().is_empty());
    assert!(!session.is_authenticated());
}
