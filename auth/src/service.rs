use chrono::Duration;
use chrono::Utc;

use crate::authenticator::AuthenticationError;
use crate::authenticator::Authenticator;
use crate::credentials::CredentialRecord;
use crate::credentials::CredentialStore;
use crate::guard::AccessGuard;
use crate::guard::GuardError;
use crate::guard::Identity;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::session::SessionIssuer;
use crate::session::TokenPair;
use crate::settings::AuthSettings;

/// Username of the built-in account seeded from configuration.
pub const ADMIN_USERNAME: &str = "admin";

/// Errors that prevent the authentication layer from starting.
#[derive(Debug, thiserror::Error)]
pub enum AuthSetupError {
    #[error("auth.secret_key is not configured")]
    MissingSecret,

    #[error("auth.default_admin_password is not configured")]
    MissingAdminPassword,

    #[error("Invalid token lifetime: {0}")]
    InvalidLifetime(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),
}

/// Login, refresh and request authorization over one credential store and
/// one signing secret.
///
/// Built once at startup and shared read-only by every request.
pub struct AuthService {
    authenticator: Authenticator,
    issuer: SessionIssuer,
    guard: AccessGuard,
}

impl AuthService {
    /// Assemble the service from its parts.
    ///
    /// # Errors
    /// * `PasswordError` - Authenticator setup failed
    pub fn new(
        codec: TokenCodec,
        store: CredentialStore,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, PasswordError> {
        Ok(Self {
            authenticator: Authenticator::new(store)?,
            issuer: SessionIssuer::new(codec.clone(), access_ttl, refresh_ttl),
            guard: AccessGuard::new(codec),
        })
    }

    /// Build the service from settings, seeding the `admin` account.
    ///
    /// # Errors
    /// * `MissingSecret` / `MissingAdminPassword` - Required setting is empty
    /// * `InvalidLifetime` - A token lifetime is not a positive duration
    /// * `JwtError` - Algorithm is not a supported HMAC algorithm
    /// * `PasswordError` - Admin password could not be hashed
    pub fn from_settings(settings: &AuthSettings) -> Result<Self, AuthSetupError> {
        if settings.secret_key.is_empty() {
            return Err(AuthSetupError::MissingSecret);
        }
        if settings.default_admin_password.is_empty() {
            return Err(AuthSetupError::MissingAdminPassword);
        }

        let access_ttl = positive_lifetime(
            Duration::try_minutes(settings.access_token_ttl_minutes),
            "access_token_ttl_minutes",
            settings.access_token_ttl_minutes,
        )?;
        let refresh_ttl = positive_lifetime(
            Duration::try_days(settings.refresh_token_ttl_days),
            "refresh_token_ttl_days",
            settings.refresh_token_ttl_days,
        )?;

        let codec = TokenCodec::from_name(settings.secret_key.as_bytes(), &settings.algorithm)?;

        let admin_hash = PasswordHasher::new().hash(&settings.default_admin_password)?;
        let store =
            CredentialStore::new().with_record(CredentialRecord::new(ADMIN_USERNAME, admin_hash));

        let algorithm = codec.algorithm();
        let accounts = store.len();
        let service = Self::new(codec, store, access_ttl, refresh_ttl)?;

        tracing::info!(
            algorithm = ?algorithm,
            access_ttl_minutes = service.issuer.access_ttl().num_minutes(),
            refresh_ttl_days = service.issuer.refresh_ttl().num_days(),
            accounts,
            "Authentication configured"
        );

        Ok(service)
    }

    /// Check credentials and mint an access/refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `AccountDisabled` - Credentials match a disabled account
    /// * `JwtError` - Token generation failed
    pub fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthenticationError> {
        let record = self.authenticator.authenticate(username, password)?;

        if record.disabled {
            tracing::info!(username, "Login rejected: account disabled");
            return Err(AuthenticationError::AccountDisabled(
                record.username.clone(),
            ));
        }

        let tokens = self.issuer.issue_pair(&record.username)?;
        tracing::info!(username, "Login succeeded");

        Ok(tokens)
    }

    /// Mint a fresh access token for an identity resolved by `authorize`.
    pub fn refresh(&self, identity: &Identity) -> Result<String, JwtError> {
        self.issuer.issue_access(identity.as_str())
    }

    /// Resolve the caller from the raw `Authorization` header value.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<Identity, GuardError> {
        self.guard.authorize(authorization)
    }
}

fn positive_lifetime(
    duration: Option<Duration>,
    name: &str,
    value: i64,
) -> Result<Duration, AuthSetupError> {
    match duration {
        Some(duration) if duration > Duration::zero() => {
            // Expiry must stay representable for every token minted from now on.
            if Utc::now().checked_add_signed(duration).is_none() {
                return Err(AuthSetupError::InvalidLifetime(format!(
                    "{} is too large, got {}",
                    name, value
                )));
            }
            Ok(duration)
        }
        _ => Err(AuthSetupError::InvalidLifetime(format!(
            "{} must be positive, got {}",
            name, value
        ))),
    }
}
