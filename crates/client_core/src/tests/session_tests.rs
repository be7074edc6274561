use std::{sync::Arc, time::Duration};

use shared::{
    domain::AdminRole,
    error::{AdminError, ErrorCode},
};
use storage::{FileStore, LocalStore, MemoryStore, SESSION_KEY, TOKEN_KEY};

use crate::session::{AdminAccount, SessionStore};

const EMAIL: &str = "hradmin@cloudutility.in";
const PASSWORD: &str = "hradmin@1234";

fn session(store: Arc<dyn LocalStore>) -> SessionStore {
    SessionStore::new(store, AdminAccount::default(), Duration::ZERO)
}

#[tokio::test]
async fn valid_login_persists_principal_without_password() {
    let store = Arc::new(MemoryStore::new());
    let session = session(store.clone());

    let principal = session.login(EMAIL, PASSWORD).await.expect("login");
    assert_eq!(principal.id.as_str(), "1");
    assert_eq!(principal.name, "HR Admin");
    assert_eq!(principal.role, AdminRole::SuperAdmin);
    assert!(session.is_authenticated());
    assert!(!session.is_loading());

    let persisted = store.get(SESSION_KEY).expect("get").expect("persisted");
    assert!(!persisted.contains(PASSWORD));
    assert!(!persisted.contains("password"));
    assert_eq!(
        serde_json::from_str::<shared::domain::Principal>(&persisted).expect("decode"),
        principal
    );
}

#[tokio::test]
async fn invalid_login_leaves_prior_state_untouched() {
    let store = Arc::new(MemoryStore::new());
    let session = session(store.clone());

    let err = session
        .login(EMAIL, "wrong")
        .await
        .expect_err("bad password");
    assert_eq!(err, AdminError::InvalidCredentials);
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!session.is_authenticated());
    assert_eq!(store.get(SESSION_KEY).expect("get"), None);

    session.login(EMAIL, PASSWORD).await.expect("login");
    let before = store.get(SESSION_KEY).expect("get");
    session
        .login("someone@else.in", PASSWORD)
        .await
        .expect_err("unknown email");
    assert!(session.is_authenticated());
    assert_eq!(store.get(SESSION_KEY).expect("get"), before);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn login_reports_loading_while_delayed() {
    let store = Arc::new(MemoryStore::new());
    let session = Arc::new(SessionStore::new(
        store,
        AdminAccount::default(),
        Duration::from_millis(200),
    ));

    let pending = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.login(EMAIL, PASSWORD).await }
    });
    for _ in 0..50 {
        if session.is_loading() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(session.is_loading());

    pending.await.expect("join").expect("login");
    assert!(!session.is_loading());
}

#[tokio::test]
async fn logout_clears_session_but_keeps_token() {
    let store = Arc::new(MemoryStore::with_entry(TOKEN_KEY, "tok"));
    let session = session(store.clone());
    session.login(EMAIL, PASSWORD).await.expect("login");

    session.logout();
    assert!(!session.is_authenticated());
    assert_eq!(store.get(SESSION_KEY).expect("get"), None);
    assert_eq!(store.get(TOKEN_KEY).expect("get").as_deref(), Some("tok"));

    session.logout();
    assert!(session.current().is_none());
}

#[test]
fn restore_reads_a_valid_persisted_principal() {
    let raw = r#"{"id":"1","email":"hradmin@cloudutility.in","name":"HR Admin","role":"super_admin"}"#;
    let store = Arc::new(MemoryStore::with_entry(SESSION_KEY, raw));
    let session = session(store);

    let principal = session.restore_session().expect("restored");
    assert_eq!(principal.email, EMAIL);
    assert_eq!(session.require_principal(), Ok(principal));
}

#[test]
fn restore_discards_corrupt_value() {
    let store = Arc::new(MemoryStore::with_entry(SESSION_KEY, "{not json"));
    let session = session(store.clone());

    assert_eq!(session.restore_session(), None);
    assert!(!session.is_authenticated());
    assert_eq!(store.get(SESSION_KEY).expect("get"), None);
}

#[test]
fn restore_with_nothing_stored_is_unauthenticated() {
    let session = session(Arc::new(MemoryStore::new()));
    assert_eq!(session.restore_session(), None);
    assert_eq!(session.require_principal(), Err(AdminError::NotSignedIn));
}

#[test]
fn token_round_trips_through_the_store() {
    let store = Arc::new(MemoryStore::new());
    let session = session(store.clone());

    session.set_token("tok-9").expect("set");
    assert_eq!(store.get(TOKEN_KEY).expect("get").as_deref(), Some("tok-9"));
    session.clear_token().expect("clear");
    assert_eq!(store.get(TOKEN_KEY).expect("get"), None);
}

#[tokio::test]
async fn file_backed_session_survives_reopen() {
    let temp = tempfile::tempdir().expect("tempdir");
    {
        let store = Arc::new(FileStore::in_dir(temp.path()).expect("open"));
        session(store).login(EMAIL, PASSWORD).await.expect("login");
    }

    let reopened = session(Arc::new(FileStore::in_dir(temp.path()).expect("reopen")));
    let principal = reopened.restore_session().expect("restored");
    assert_eq!(principal.role, AdminRole::SuperAdmin);
}
