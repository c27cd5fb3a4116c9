use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::settings::AuthConfig;
use crate::error::{AuthError, Result};
use crate::models::Account;

/// JWT claims carried by every issued token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // account id
    pub email: String, // for logging/debugging
    pub iat: i64,      // issued at timestamp
    pub exp: i64,      // expiration timestamp
    pub iss: String,   // issuer
}

/// Creates and verifies JWT tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expiry_hours: i64,
}

impl JwtService {
    /// Build the service from auth settings.
    ///
    /// Fails when no signing secret is configured, so callers surface a
    /// server configuration error instead of signing with an empty key.
    pub fn new(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.is_empty() {
            return Err(AuthError::config("JWT_SECRET is not set"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.token_issuer.clone(),
            expiry_hours: config.token_expiry_hours,
        })
    }

    /// Create a signed token for an account
    pub fn create_token(&self, account: &Account) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(self.expiry_hours);

        let claims = Claims {
            sub: account.id.clone(),
            email: account.email.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.issuer.clone(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify signature, expiry and issuer; return the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::unauthorized(format!("Token rejected: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    fn test_account() -> Account {
        Account::new("Ana", "ana@example.com", "hash")
    }

    #[test]
    fn create_and_verify_round_trip() {
        let service = JwtService::new(&test_config("test_secret_key")).unwrap();
        let account = test_account();

        let token = service.create_token(&account).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.iss, "storefront-auth");
    }

    #[test]
    fn empty_secret_is_a_config_error() {
        let result = JwtService::new(&test_config(""));
        assert!(matches!(result, Err(AuthError::Config(_))));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = JwtService::new(&test_config("test_secret_key")).unwrap();
        assert!(matches!(
            service.verify_token("not-a-token"),
            Err(AuthError::Unauthorized(_))
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signer = JwtService::new(&test_config("secret1")).unwrap();
        let verifier = JwtService::new(&test_config("secret2")).unwrap();

        let token = signer.create_token(&test_account()).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new(&test_config("test_secret_key")).unwrap();

        let now = chrono::Utc::now().timestamp();
        let stale = Claims {
            sub: "acct-1".to_string(),
            email: "ana@example.com".to_string(),
            iat: now - 25 * 3600,
            exp: now - 3600,
            iss: "storefront-auth".to_string(),
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(b"test_secret_key"),
        )
        .unwrap();

        assert!(matches!(
            service.verify_token(&token),
            Err(AuthError::Unauthorized(_))
        ));
    }

    #[test]
    fn token_expires_in_twenty_four_hours() {
        let service = JwtService::new(&test_config("test_secret_key")).unwrap();
        let token = service.create_token(&test_account()).unwrap();
        let claims = service.verify_token(&token).unwrap();

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 24 * 3600);
    }
}
