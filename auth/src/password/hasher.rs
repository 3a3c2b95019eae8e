use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Password hashing implementation.
///
/// New hashes are always Argon2id with the crate's default parameters.
/// Verification reads the scheme and parameters from the stored PHC string,
/// so hashes produced under older Argon2 parameters, and legacy bcrypt
/// hashes, keep verifying after the policy changes.
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a password hasher with the current hashing policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` for a mismatch and for any hash that cannot be parsed.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if is_bcrypt(hash) {
            return bcrypt::verify(password, hash).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "Unreadable bcrypt hash");
                false
            });
        }

        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "Unreadable password hash");
                return false;
            }
        };

        // Argon2 picks the variant, version and cost from the parsed hash.
        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Whether a stored hash was produced under a different policy than the
    /// one `hash` currently applies.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        if is_bcrypt(hash) {
            return true;
        }

        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return true;
        };

        if parsed_hash.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        if parsed_hash.version != Some(Version::V0x13.into()) {
            return true;
        }

        match Params::try_from(&parsed_hash) {
            Ok(params) => {
                let current = self.argon2.params();
                params.m_cost() != current.m_cost()
                    || params.t_cost() != current.t_cost()
                    || params.p_cost() != current.p_cost()
            }
            Err(_) => true,
        }
    }
}

fn is_bcrypt(hash: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_password").expect("Failed to hash");
        let second = hasher.hash("same_password").expect("Failed to hash");

        assert_ne!(first, second);
        assert!(hasher.verify("same_password", &first));
        assert!(hasher.verify("same_password", &second));
    }

    #[test]
    fn test_hash_is_self_describing() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password").expect("Failed to hash");

        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(!hasher.needs_rehash(&hash));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$2b$not-really-bcrypt"));
    }

    #[test]
    fn test_verify_hash_with_older_argon2_parameters() {
        let params = Params::new(8 * 1024, 1, 1, None).expect("Invalid params");
        let legacy = Argon2::new(Algorithm::Argon2i, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let hash = legacy
            .hash_password(b"password", &salt)
            .expect("Failed to hash")
            .to_string();

        let hasher = PasswordHasher::new();
        assert!(hasher.verify("password", &hash));
        assert!(!hasher.verify("other", &hash));
        assert!(hasher.needs_rehash(&hash));
    }

    #[test]
    fn test_verify_legacy_bcrypt_hash() {
        let hash = bcrypt::hash("password", 4).expect("Failed to hash");

        let hasher = PasswordHasher::new();
        assert!(hasher.verify("password", &hash));
        assert!(!hasher.verify("other", &hash));
        assert!(hasher.needs_rehash(&hash));
    }
}
