use std::fmt;

use crate::jwt::JwtError;
use crate::jwt::TokenCodec;

/// Caller identity resolved from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(String);

impl Identity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reasons a request stays unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("Missing Authorization header")]
    MissingCredentials,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),
}

/// Per-request bearer token check.
///
/// Shared by protected resources and the refresh endpoint.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    codec: TokenCodec,
}

impl AccessGuard {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    /// Resolve the caller from the raw `Authorization` header value.
    ///
    /// # Errors
    /// * `MissingCredentials` - No header was sent
    /// * `MalformedHeader` - Header is not `Bearer <token>`
    /// * `InvalidToken` - Token failed signature, format or expiry checks
    pub fn authorize(&self, authorization: Option<&str>) -> Result<Identity, GuardError> {
        let authorization = authorization.ok_or(GuardError::MissingCredentials)?;
        let token = bearer_token(authorization).ok_or(GuardError::MalformedHeader)?;
        self.verify(token)
    }

    /// Resolve the caller from a bare token.
    pub fn verify(&self, token: &str) -> Result<Identity, GuardError> {
        let claims = self.codec.decode(token)?;
        Ok(Identity(claims.sub))
    }
}

/// Token part of a `Bearer <token>` header; the scheme is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
