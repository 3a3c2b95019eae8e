use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload carried by every session token.
///
/// Access and refresh tokens share this shape; only `exp` differs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (username)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl SessionClaims {
    /// Claims for `subject` issued at `now` and valid for `ttl`.
    pub fn new(subject: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Claims for `subject` issued now and valid for `ttl`.
    pub fn expiring_in(subject: impl Into<String>, ttl: Duration) -> Self {
        Self::new(subject, Utc::now(), ttl)
    }

    /// Check if token is expired.
    ///
    /// A token is no longer valid at the second its `exp` is reached.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
