//! Tests for the account service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockSecretHasher, MockUserRepository};
use crate::domain::{ContactHandle, DisplayName};
use mockall::predicate::eq;
use rstest::rstest;

const STORED_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$stored";

fn stored_user() -> User {
    User::new(
        UserId::random(),
        ContactHandle::new("a@x.com"),
        DisplayName::new("Ada"),
        SecretHash::new(STORED_HASH).expect("non-empty hash"),
    )
}

fn make_service(repo: MockUserRepository, hasher: MockSecretHasher) -> AccountServiceImpl {
    AccountServiceImpl::new(Arc::new(repo), Arc::new(hasher))
}

#[tokio::test]
async fn register_persists_hash_instead_of_plaintext() {
    let mut hasher = MockSecretHasher::new();
    hasher
        .expect_hash()
        .withf(|secret| secret.expose() == "pw123")
        .times(1)
        .return_once(|_| Ok(SecretHash::new(STORED_HASH).expect("non-empty hash")));

    let mut repo = MockUserRepository::new();
    repo.expect_save()
        .withf(|user| {
            user.contact_handle().as_ref() == "a@x.com"
                && user.display_name().as_ref() == "Ada"
                && user.secret_hash().as_str() == STORED_HASH
        })
        .times(1)
        .returning(|user| Ok(user.clone()));

    let service = make_service(repo, hasher);
    let user = service
        .register(&Registration::new("a@x.com", "Ada", "pw123"))
        .await
        .expect("registration succeeds");

    assert_eq!(user.display_name().as_ref(), "Ada");
    assert_ne!(user.secret_hash().as_str(), "pw123");
}

#[rstest]
#[case(UserPersistenceError::conflict("a@x.com"), AccountError::DuplicateAccount)]
#[case(
    UserPersistenceError::connection("refused"),
    AccountError::unexpected("user repository unavailable: refused")
)]
#[case(
    UserPersistenceError::query("syntax"),
    AccountError::unexpected("user repository error: syntax")
)]
#[tokio::test]
async fn register_maps_store_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: AccountError,
) {
    let mut hasher = MockSecretHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(SecretHash::new(STORED_HASH).expect("non-empty hash")));
    let mut repo = MockUserRepository::new();
    repo.expect_save().return_once(move |_| Err(failure));

    let err = make_service(repo, hasher)
        .register(&Registration::new("a@x.com", "Ada", "pw123"))
        .await
        .expect_err("store failure must surface");

    assert_eq!(err, expected);
}

#[tokio::test]
async fn register_does_not_touch_store_when_hashing_fails() {
    let mut hasher = MockSecretHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(SecretHashError::hashing("bad params")));
    let mut repo = MockUserRepository::new();
    repo.expect_save().never();

    let err = make_service(repo, hasher)
        .register(&Registration::new("a@x.com", "Ada", "pw123"))
        .await
        .expect_err("hashing failure must surface");

    assert!(matches!(err, AccountError::Unexpected { .. }));
}

#[tokio::test]
async fn login_returns_matched_record() {
    let user = stored_user();
    let expected = user.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_contact_handle()
        .with(eq(ContactHandle::new("a@x.com")))
        .times(1)
        .return_once(move |_| Ok(Some(user)));
    let mut hasher = MockSecretHasher::new();
    hasher
        .expect_verify()
        .withf(|secret, hash| secret.expose() == "pw123" && hash.as_str() == STORED_HASH)
        .times(1)
        .return_once(|_, _| Ok(true));

    let found = make_service(repo, hasher)
        .login(&LoginCredentials::new("a@x.com", "pw123"))
        .await
        .expect("login succeeds");

    assert_eq!(found, expected);
}

#[tokio::test]
async fn login_rejects_wrong_secret() {
    let user = stored_user();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_contact_handle()
        .return_once(move |_| Ok(Some(user)));
    let mut hasher = MockSecretHasher::new();
    hasher.expect_verify().return_once(|_, _| Ok(false));

    let err = make_service(repo, hasher)
        .login(&LoginCredentials::new("a@x.com", "wrong"))
        .await
        .expect_err("wrong secret must fail");

    assert_eq!(err, AccountError::InvalidCredential);
}

#[tokio::test]
async fn login_unknown_handle_is_not_found_after_decoy_verification() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_contact_handle()
        .times(2)
        .returning(|_| Ok(None));
    let mut hasher = MockSecretHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok(SecretHash::new("$argon2id$decoy").expect("non-empty hash")));
    hasher
        .expect_verify()
        .withf(|_, hash| hash.as_str() == "$argon2id$decoy")
        .times(2)
        .returning(|_, _| Ok(false));

    let service = make_service(repo, hasher);
    for _ in 0..2 {
        let err = service
            .login(&LoginCredentials::new("ghost@x.com", "pw123"))
            .await
            .expect_err("unknown handle must fail");
        assert_eq!(err, AccountError::NotFound);
    }
}

#[tokio::test]
async fn login_unknown_handle_is_not_found_even_without_decoy() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_contact_handle()
        .return_once(|_| Ok(None));
    let mut hasher = MockSecretHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(SecretHashError::hashing("rng unavailable")));
    hasher.expect_verify().never();

    let err = make_service(repo, hasher)
        .login(&LoginCredentials::new("ghost@x.com", "pw123"))
        .await
        .expect_err("unknown handle must fail");

    assert_eq!(err, AccountError::NotFound);
}

#[tokio::test]
async fn login_maps_malformed_stored_hash_to_unexpected() {
    let user = stored_user();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_contact_handle()
        .return_once(move |_| Ok(Some(user)));
    let mut hasher = MockSecretHasher::new();
    hasher
        .expect_verify()
        .return_once(|_, _| Err(SecretHashError::malformed_hash("missing salt")));

    let err = make_service(repo, hasher)
        .login(&LoginCredentials::new("a@x.com", "pw123"))
        .await
        .expect_err("malformed hash must fail");

    assert!(matches!(err, AccountError::Unexpected { .. }));
}

#[tokio::test]
async fn login_maps_lookup_failure_to_unexpected() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_contact_handle()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));
    let mut hasher = MockSecretHasher::new();
    hasher.expect_verify().never();

    let err = make_service(repo, hasher)
        .login(&LoginCredentials::new("a@x.com", "pw123"))
        .await
        .expect_err("lookup failure must fail");

    assert_eq!(
        err,
        AccountError::unexpected("user repository unavailable: refused")
    );
}

/// Hasher whose blocking task never returns a value.
struct PanickingHasher;

impl SecretHasher for PanickingHasher {
    fn hash(&self, _secret: &PlaintextSecret) -> Result<SecretHash, SecretHashError> {
        panic!("hasher exploded");
    }

    fn verify(
        &self,
        _secret: &PlaintextSecret,
        _hash: &SecretHash,
    ) -> Result<bool, SecretHashError> {
        panic!("verifier exploded");
    }
}

#[tokio::test]
async fn register_maps_hashing_task_failure_to_unexpected() {
    let mut repo = MockUserRepository::new();
    repo.expect_save().never();

    let err = AccountServiceImpl::new(Arc::new(repo), Arc::new(PanickingHasher))
        .register(&Registration::new("a@x.com", "Ada", "pw123"))
        .await
        .expect_err("task failure must surface");

    match err {
        AccountError::Unexpected { message } => {
            assert!(message.starts_with("secret hashing task failed"), "{message}");
        }
        other => panic!("expected an unexpected error, got {other:?}"),
    }
}

#[tokio::test]
async fn login_maps_verification_task_failure_to_unexpected() {
    let user = stored_user();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_contact_handle()
        .return_once(move |_| Ok(Some(user)));

    let err = AccountServiceImpl::new(Arc::new(repo), Arc::new(PanickingHasher))
        .login(&LoginCredentials::new("a@x.com", "pw123"))
        .await
        .expect_err("task failure must surface");

    assert!(matches!(err, AccountError::Unexpected { .. }));
}

#[tokio::test]
async fn hasher_sees_the_callers_trace_id() {
    let trace_id = TraceId::generate();
    let mut hasher = MockSecretHasher::new();
    hasher.expect_hash().times(1).return_once(move |_| {
        assert_eq!(TraceId::current(), Some(trace_id));
        Ok(SecretHash::new(STORED_HASH).expect("non-empty hash"))
    });
    let mut repo = MockUserRepository::new();
    repo.expect_save().returning(|user| Ok(user.clone()));

    let service = make_service(repo, hasher);
    TraceId::scope(trace_id, async move {
        service
            .register(&Registration::new("a@x.com", "Ada", "pw123"))
            .await
            .expect("registration succeeds");
    })
    .await;
}

#[tokio::test]
async fn primed_decoy_leaves_one_verification_per_unknown_login() {
    let mut hasher = MockSecretHasher::new();
    hasher
        .expect_hash()
        .withf(|secret| secret.expose() == DECOY_SECRET)
        .times(1)
        .returning(|_| Ok(SecretHash::new("$argon2id$decoy").expect("non-empty hash")));
    hasher
        .expect_verify()
        .withf(|secret, hash| secret.expose() == "pw123" && hash.as_str() == "$argon2id$decoy")
        .times(1)
        .returning(|_, _| Ok(false));
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_contact_handle()
        .times(1)
        .returning(|_| Ok(None));

    let service = make_service(repo, hasher).with_primed_decoy();
    let err = service
        .login(&LoginCredentials::new("ghost@x.com", "pw123"))
        .await
        .expect_err("unknown handle must fail");

    assert_eq!(err, AccountError::NotFound);
}
