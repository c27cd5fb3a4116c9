use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, Version};
use rand::Rng;

use crate::config::constants::{OTP_CODE_MAX, OTP_CODE_MIN};
use crate::error::{AuthError, Result};

fn argon2() -> Result<Argon2<'static>> {
    let params = Params::new(
        32_768, // 32 MB
        3,      // iterations
        1,      // parallelism
        None,
    )
    .map_err(|e| AuthError::Internal(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a credential (password or verification code) with a fresh random salt
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2()?;

    let hash = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("Failed to hash credential: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Compare a candidate credential against a stored hash
pub fn verify_secret(candidate: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Invalid credential hash format: {}", e)))?;

    let argon2 = argon2()?;

    match argon2.verify_password(candidate.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Internal(format!(
            "Credential verification failed: {}",
            e
        ))),
    }
}

/// 6-digit verification code, uniform over [100000, 999999]
pub fn generate_otp_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(OTP_CODE_MIN..=OTP_CODE_MAX);
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_secret("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_secret("secret1", &hash).unwrap());
        assert!(!verify_secret("secret2", &hash).unwrap());
    }

    #[test]
    fn same_secret_hashes_differently() {
        let first = hash_secret("482913").unwrap();
        let second = hash_secret("482913").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn otp_codes_are_six_digits_without_leading_zero() {
        for _ in 0..100 {
            let code = generate_otp_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.as_bytes()[0], b'0');
        }
    }

    #[test]
    fn garbage_hash_is_an_error_not_a_mismatch() {
        assert!(verify_secret("secret1", "not-a-phc-string").is_err());
    }
}
