use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::auth::JwtService;
use crate::config::settings::AuthConfig;
use crate::error::{AuthError, Result};
use crate::models::Account;
use crate::services::mail_service::Mailer;
use crate::services::otp_service::OtpService;
use crate::storage::Storage;
use crate::utils::crypto::{hash_secret, verify_secret};
use crate::validation::{is_valid_email, is_valid_password, normalize_email};

/// Orchestrates the signup, activation and login flows.
///
/// Signup creates a pending account and mails out a verification code;
/// activation consumes the code and flips the account to activated;
/// authentication only ever succeeds against an activated account.
#[derive(Clone)]
pub struct AccountService {
    storage: Arc<dyn Storage>,
    otp: OtpService,
    mailer: Arc<dyn Mailer>,
    auth_config: AuthConfig,
}

impl AccountService {
    pub fn new(
        storage: Arc<dyn Storage>,
        mailer: Arc<dyn Mailer>,
        auth_config: AuthConfig,
    ) -> Self {
        let otp = OtpService::new(Arc::clone(&storage));
        Self {
            storage,
            otp,
            mailer,
            auth_config,
        }
    }

    /// Create a pending account, issue a verification code and mail it out.
    ///
    /// Returns the new account id. A delivery failure propagates after the
    /// account and record are already persisted; the pending account stays
    /// behind and recovery is manual.
    pub async fn begin_signup(&self, name: &str, email: &str, password: &str) -> Result<String> {
        crate::ensure!(
            !name.trim().is_empty() && !email.trim().is_empty() && !password.is_empty(),
            AuthError::validation("All fields are required")
        );
        crate::ensure!(
            is_valid_email(email),
            AuthError::validation("Invalid email address")
        );
        crate::ensure!(
            is_valid_password(password),
            AuthError::validation("Password must be at least 6 characters")
        );

        let email = normalize_email(email);
        if self.storage.get_account_by_email(&email).await?.is_some() {
            crate::bail!(AuthError::EmailInUse);
        }

        let password_hash = hash_secret(password)?;
        let account = Account::new(name.trim(), &email, &password_hash);

        // A concurrent signup for the same email loses here on the unique
        // key and surfaces as the same conflict as the lookup above.
        self.storage.create_account(&account).await?;
        info!("Created pending account {} for {}", account.id, email);

        let (code, _record) = self.otp.issue(&account.id).await?;
        self.mailer.send_verification(&email, &code).await?;
        debug!("Verification code delivered for account {}", account.id);

        Ok(account.id)
    }

    /// Validate a submitted code and activate the account.
    ///
    /// The record is consumed atomically, so two concurrent submissions of
    /// the same valid code activate at most once; the loser is told no
    /// record was found. All remaining records for the account are purged
    /// after activation.
    pub async fn complete_activation(&self, account_id: &str, code: &str) -> Result<()> {
        crate::ensure!(
            !account_id.trim().is_empty() && !code.trim().is_empty(),
            AuthError::validation("Empty OTP details are not allowed")
        );

        let record = self.otp.validate(account_id, code).await?;
        if !self.otp.consume(&record.id).await? {
            // Another submission consumed the record first
            crate::bail!(AuthError::NoRecordFound);
        }

        if !self.storage.set_account_activated(account_id, true).await? {
            crate::bail!(AuthError::internal(format!(
                "Account {} missing during activation",
                account_id
            )));
        }
        info!("Account {} activated", account_id);

        // Leftover records are useless once the account is activated.
        // Failing to remove them is not worth failing the request over.
        if let Err(err) = self.otp.purge_all(account_id).await {
            warn!(
                "Failed to purge verification records for {}: {}",
                account_id, err
            );
        }

        Ok(())
    }

    /// Check credentials against an activated account and mint a token
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(String, Account)> {
        // Token signing must be possible before credentials are looked at
        let jwt = JwtService::new(&self.auth_config)?;

        crate::ensure!(
            !email.trim().is_empty() && !password.is_empty(),
            AuthError::validation("Email and password are required")
        );

        let email = normalize_email(email);
        let account = self
            .storage
            .get_account_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Activation is checked first so an unverified user is told to
        // verify instead of being left guessing at their password
        crate::ensure!(account.activated, AuthError::NotVerified);

        crate::ensure!(
            verify_secret(password, &account.password_hash)?,
            AuthError::InvalidCredentials
        );

        let token = jwt.create_token(&account)?;
        debug!("Issued login token for account {}", account.id);

        Ok((token, account))
    }
}
