use super::*;
use crate::db::Store;

#[test]
fn hash_is_salted_and_verifiable() {
    let a = hash_password("hunter2").unwrap();
    let b = hash_password("hunter2").unwrap();
    assert_ne!(a, b, "two hashes of one password must differ by salt");
    assert!(a.starts_with("$argon2id$"));
    assert!(verify_password("hunter2", &a));
    assert!(verify_password("hunter2", &b));
    assert!(!verify_password("hunter3", &a));
}

#[test]
fn malformed_hash_never_verifies() {
    assert!(!verify_password("x", "not-a-phc-string"));
    assert!(!verify_password("", ""));
}

#[test]
fn register_then_authenticate() {
    let store = Store::open_in_memory().unwrap();
    let user = register_user(store.conn(), "ada", "s3cret").unwrap();
    assert_eq!(user.username, "ada");
    assert_ne!(user.hashed_password, "s3cret");

    let found = authenticate(store.conn(), "ada", "s3cret").unwrap();
    assert_eq!(found.id, user.id);
}

#[test]
fn duplicate_username_is_precondition_error() {
    let store = Store::open_in_memory().unwrap();
    register_user(store.conn(), "ada", "one").unwrap();
    let err = register_user(store.conn(), "ada", "two").unwrap_err();
    assert!(matches!(err, Error::Precondition(_)), "got {err:?}");
}

#[test]
fn empty_credentials_rejected() {
    let store = Store::open_in_memory().unwrap();
    assert!(matches!(
        register_user(store.conn(), "  ", "pw").unwrap_err(),
        Error::Precondition(_)
    ));
    assert!(matches!(
        register_user(store.conn(), "ada", "").unwrap_err(),
        Error::Precondition(_)
    ));
}

#[test]
fn wrong_password_and_unknown_user_are_auth_errors() {
    let store = Store::open_in_memory().unwrap();
    register_user(store.conn(), "ada", "right").unwrap();
    assert!(matches!(
        authenticate(store.conn(), "ada", "wrong").unwrap_err(),
        Error::Auth
    ));
    assert!(matches!(
        authenticate(store.conn(), "nobody", "right").unwrap_err(),
        Error::Auth
    ));
}

#[test]
fn run_register_rejects_second_registration() {
    let store = Store::open_in_memory().unwrap();
    run_register(&store, "grace", "pw", false).unwrap();
    let err = run_register(&store, "grace", "pw", true).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
