use crate::credentials::CredentialRecord;
use crate::credentials::CredentialStore;
use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Verifies a username/password pair against the credential store.
///
/// The `disabled` flag is not consulted here; see `AuthService::login`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    store: CredentialStore,
    // Verified against for unknown usernames so both failure paths cost one hash.
    dummy_hash: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled: {0}")]
    AccountDisabled(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator over a credential store.
    ///
    /// # Errors
    /// * `PasswordError` - The placeholder hash for unknown users could not be computed
    pub fn new(store: CredentialStore) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        let dummy_hash = password_hasher.hash("unknown-account-placeholder")?;

        if store.is_empty() {
            tracing::warn!("Credential store is empty; every login will be rejected");
        }

        Ok(Self {
            password_hasher,
            store,
            dummy_hash,
        })
    }

    /// Verify credentials.
    ///
    /// # Returns
    /// The matching credential record
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or password mismatch
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<&CredentialRecord, AuthenticationError> {
        let Some(record) = self.store.find(username) else {
            let _ = self.password_hasher.verify(password, &self.dummy_hash);
            tracing::info!(username, "Login rejected: unknown username");
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, &record.password_hash) {
            tracing::info!(username, "Login rejected: password mismatch");
            return Err(AuthenticationError::InvalidCredentials);
        }

        if self.password_hasher.needs_rehash(&record.password_hash) {
            tracing::warn!(username, "Stored password hash uses an outdated scheme");
        }

        Ok(record)
    }
}
