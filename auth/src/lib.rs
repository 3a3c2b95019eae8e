//! Authentication library for the book catalog API
//!
//! Provides the OAuth2 password flow building blocks:
//! - Password hashing (Argon2id, with legacy bcrypt verification)
//! - Session token signing and verification (HMAC JWT)
//! - Credential store and authenticator
//! - Session issuer (access + refresh tokens) and bearer access guard
//!
//! `AuthService` ties these together and is the single value a server
//! builds at startup.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SessionClaims, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::from_name(b"secret_key_at_least_32_bytes_long!", "HS256").unwrap();
//! let claims = SessionClaims::expiring_in("admin", Duration::minutes(30));
//! let token = codec.encode(&claims).unwrap();
//! assert_eq!(codec.decode(&token).unwrap(), claims);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthService, AuthSettings};
//!
//! let settings = AuthSettings {
//!     secret_key: "secret_key_at_least_32_bytes_long!".to_string(),
//!     algorithm: "HS256".to_string(),
//!     access_token_ttl_minutes: 30,
//!     refresh_token_ttl_days: 7,
//!     default_admin_password: "change-me".to_string(),
//! };
//! let auth = AuthService::from_settings(&settings).unwrap();
//!
//! let tokens = auth.login("admin", "change-me").unwrap();
//! let header = format!("Bearer {}", tokens.access_token);
//! let identity = auth.authorize(Some(&header)).unwrap();
//! assert_eq!(identity.as_str(), "admin");
//! ```

pub mod authenticator;
pub mod credentials;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod service;
pub mod session;
pub mod settings;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use credentials::CredentialRecord;
pub use credentials::CredentialStore;
pub use guard::AccessGuard;
pub use guard::GuardError;
pub use guard::Identity;
pub use jwt::JwtError;
pub use jwt::SessionClaims;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use service::AuthService;
pub use service::AuthSetupError;
pub use service::ADMIN_USERNAME;
pub use session::SessionIssuer;
pub use session::TokenPair;
pub use settings::AuthSettings;
