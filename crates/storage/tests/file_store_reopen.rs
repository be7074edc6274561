use storage::{FileStore, LocalStore, SESSION_KEY, TOKEN_KEY};

#[test]
fn values_survive_reopening_the_store() {
    let temp_root = tempfile::tempdir().expect("tempdir");

    {
        let store = FileStore::in_dir(temp_root.path()).expect("open");
        store
            .set(SESSION_KEY, r#"{"id":"1","email":"a@b.c","name":"A","role":"admin"}"#)
            .expect("session");
        store.set(TOKEN_KEY, "bearer-123").expect("token");
    }

    let reopened = FileStore::in_dir(temp_root.path()).expect("reopen");
    assert_eq!(
        reopened.get(TOKEN_KEY).expect("token").as_deref(),
        Some("bearer-123")
    );
    assert!(reopened
        .get(SESSION_KEY)
        .expect("session")
        .is_some_and(|raw| raw.contains("\"role\":\"admin\"")));

    reopened.remove(SESSION_KEY).expect("remove");
    let again = FileStore::in_dir(temp_root.path()).expect("reopen again");
    assert_eq!(again.get(SESSION_KEY).expect("session"), None);
    assert_eq!(again.get(TOKEN_KEY).expect("token").as_deref(), Some("bearer-123"));
}
