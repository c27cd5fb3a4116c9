// Login and token behavior over in-memory storage

mod common;

use storefront_auth_server::auth::JwtService;
use storefront_auth_server::error::AuthError;
use storefront_auth_server::server::app_state::AppState;
use storefront_auth_server::services::MemoryMailer;
use storefront_auth_server::storage::Storage;

async fn signup_and_activate(
    state: &AppState,
    mailer: &MemoryMailer,
    name: &str,
    email: &str,
    password: &str,
) -> String {
    let account_id = state
        .accounts
        .begin_signup(name, email, password)
        .await
        .unwrap();
    let code = mailer.sent().await.last().unwrap().1.clone();
    state
        .accounts
        .complete_activation(&account_id, &code)
        .await
        .unwrap();
    account_id
}

#[tokio::test]
async fn issued_token_identifies_the_account() {
    let (state, _storage, mailer) = common::app_state_with_memory();
    let account_id = signup_and_activate(&state, &mailer, "Ana", "ana@x.com", "secret1").await;

    let (token, user) = state
        .accounts
        .authenticate("ana@x.com", "secret1")
        .await
        .unwrap();
    assert_eq!(user.id, account_id);

    let jwt = JwtService::new(&state.config.auth).unwrap();
    let claims = jwt.verify_token(&token).unwrap();
    assert_eq!(claims.sub, account_id);
    assert_eq!(claims.email, "ana@x.com");
    assert_eq!(claims.iss, "storefront-auth");
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let (state, _storage, mailer) = common::app_state_with_memory();
    signup_and_activate(&state, &mailer, "Ana", "ana@x.com", "secret1").await;

    let (token, _) = state
        .accounts
        .authenticate("ana@x.com", "secret1")
        .await
        .unwrap();

    let mut tampered = token.clone();
    tampered.push('x');

    let jwt = JwtService::new(&state.config.auth).unwrap();
    assert!(matches!(
        jwt.verify_token(&tampered),
        Err(AuthError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn login_accepts_any_email_casing() {
    let (state, storage, mailer) = common::app_state_with_memory();
    signup_and_activate(&state, &mailer, "Ana", "Ana@X.com", "secret1").await;

    // Stored lowercased once at signup
    assert!(storage
        .get_account_by_email("ana@x.com")
        .await
        .unwrap()
        .is_some());

    state
        .accounts
        .authenticate("ana@x.com", "secret1")
        .await
        .unwrap();
    state
        .accounts
        .authenticate("ANA@X.COM", "secret1")
        .await
        .unwrap();
}

#[tokio::test]
async fn unverified_account_cannot_log_in() {
    let (state, _storage, _mailer) = common::app_state_with_memory();
    state
        .accounts
        .begin_signup("Ana", "ana@x.com", "secret1")
        .await
        .unwrap();

    let err = state.accounts.authenticate("ana@x.com", "secret1").await;
    assert!(matches!(err, Err(AuthError::NotVerified)));
}
