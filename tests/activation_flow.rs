// Signup and activation flows end to end over in-memory storage

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use storefront_auth_server::async_trait;
use storefront_auth_server::error::{AuthError, Result};
use storefront_auth_server::models::VerificationRecord;
use storefront_auth_server::server::app_state::AppState;
use storefront_auth_server::services::{Mailer, OtpService};
use storefront_auth_server::storage::memory::MemoryStorage;
use storefront_auth_server::storage::Storage;
use storefront_auth_server::utils::crypto::hash_secret;

#[tokio::test]
async fn signup_activate_login_end_to_end() {
    let (state, storage, mailer) = common::app_state_with_memory();

    let account_id = state
        .accounts
        .begin_signup("Ana", "ana@x.com", "secret1")
        .await
        .unwrap();

    // One pending account, one verification record, one mail
    let account = storage
        .get_account_by_id(&account_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!account.activated);

    let record = storage
        .latest_verification_for(&account_id)
        .await
        .unwrap()
        .unwrap();
    assert!(record.expires_at > Utc::now());

    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "ana@x.com");
    let code = sent[0].1.clone();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    state
        .accounts
        .complete_activation(&account_id, &code)
        .await
        .unwrap();

    // Activated, and no verification records remain
    let account = storage
        .get_account_by_id(&account_id)
        .await
        .unwrap()
        .unwrap();
    assert!(account.activated);
    assert!(storage
        .latest_verification_for(&account_id)
        .await
        .unwrap()
        .is_none());

    let (token, user) = state
        .accounts
        .authenticate("ana@x.com", "secret1")
        .await
        .unwrap();
    assert!(!token.is_empty());
    assert_eq!(user.id, account_id);
}

#[tokio::test]
async fn wrong_code_can_be_retried_before_the_window_closes() {
    let (state, _storage, mailer) = common::app_state_with_memory();

    let account_id = state
        .accounts
        .begin_signup("Ana", "ana@x.com", "secret1")
        .await
        .unwrap();
    let code = mailer.sent().await[0].1.clone();

    let wrong = if code == "999999" { "111111" } else { "999999" };
    let err = state.accounts.complete_activation(&account_id, wrong).await;
    assert!(matches!(err, Err(AuthError::InvalidOtp)));

    // The record survived the failed attempt
    state
        .accounts
        .complete_activation(&account_id, &code)
        .await
        .unwrap();
}

#[tokio::test]
async fn reissued_code_supersedes_the_first() {
    let (state, storage, mailer) = common::app_state_with_memory();

    let account_id = state
        .accounts
        .begin_signup("Ana", "ana@x.com", "secret1")
        .await
        .unwrap();
    let first_code = mailer.sent().await[0].1.clone();

    // A resend stacks a second record; only the newest one counts
    let otp = OtpService::new(storage.clone() as Arc<dyn Storage>);
    let (second_code, _) = otp.issue(&account_id).await.unwrap();

    if first_code != second_code {
        let err = state
            .accounts
            .complete_activation(&account_id, &first_code)
            .await;
        assert!(matches!(err, Err(AuthError::InvalidOtp)));
    }

    state
        .accounts
        .complete_activation(&account_id, &second_code)
        .await
        .unwrap();

    let account = storage
        .get_account_by_id(&account_id)
        .await
        .unwrap()
        .unwrap();
    assert!(account.activated);
}

#[tokio::test]
async fn expired_code_is_rejected_and_removed() {
    let (state, storage, _mailer) = common::app_state_with_memory();

    let account_id = state
        .accounts
        .begin_signup("Ana", "ana@x.com", "secret1")
        .await
        .unwrap();
    storage.purge_verifications(&account_id).await.unwrap();

    // A record issued eleven minutes ago, one minute past its window
    let record = VerificationRecord {
        id: Uuid::new_v4().to_string(),
        account_id: account_id.clone(),
        code_hash: hash_secret("482913").unwrap(),
        created_at: Utc::now() - Duration::minutes(11),
        expires_at: Utc::now() - Duration::minutes(1),
    };
    storage.create_verification(&record).await.unwrap();

    let err = state
        .accounts
        .complete_activation(&account_id, "482913")
        .await;
    assert!(matches!(err, Err(AuthError::OtpExpired)));

    // The expired record was deleted on sight; nothing is left to try
    let err = state
        .accounts
        .complete_activation(&account_id, "482913")
        .await;
    assert!(matches!(err, Err(AuthError::NoRecordFound)));
}

struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_verification(&self, _to: &str, _code: &str) -> Result<()> {
        Err(AuthError::delivery("SMTP connection refused"))
    }
}

#[tokio::test]
async fn delivery_failure_leaves_the_pending_account_behind() {
    let storage = Arc::new(MemoryStorage::new());
    let state = AppState::with_collaborators(
        common::test_config(),
        storage.clone() as Arc<dyn Storage>,
        Arc::new(FailingMailer) as Arc<dyn Mailer>,
    );

    let err = state
        .accounts
        .begin_signup("Ana", "ana@x.com", "secret1")
        .await;
    assert!(matches!(err, Err(AuthError::Delivery(_))));

    // No rollback: the pending account and its record stay for manual recovery
    let account = storage
        .get_account_by_email("ana@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!account.activated);
    assert!(storage
        .latest_verification_for(&account.id)
        .await
        .unwrap()
        .is_some());
}
