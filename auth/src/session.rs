use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::SessionClaims;
use crate::jwt::TokenCodec;

/// Access and refresh tokens minted together at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Mints session tokens for an already authenticated identity.
///
/// Access and refresh tokens carry identical claims apart from `exp`; there
/// is no token type claim.
#[derive(Debug, Clone)]
pub struct SessionIssuer {
    codec: TokenCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SessionIssuer {
    pub fn new(codec: TokenCodec, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            codec,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Token valid for the access lifetime.
    pub fn issue_access(&self, subject: &str) -> Result<String, JwtError> {
        self.issue(subject, self.access_ttl)
    }

    /// Token valid for the refresh lifetime.
    pub fn issue_refresh(&self, subject: &str) -> Result<String, JwtError> {
        self.issue(subject, self.refresh_ttl)
    }

    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.issue_access(subject)?,
            refresh_token: self.issue_refresh(subject)?,
        })
    }

    fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        let now = Utc::now();
        if now.checked_add_signed(ttl).is_none() {
            return Err(JwtError::EncodingFailed(format!(
                "token lifetime of {} days overflows the expiry timestamp",
                ttl.num_days()
            )));
        }

        let claims = SessionClaims::new(subject, now, ttl);
        self.codec.encode(&claims)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;

    use super::*;

    fn setup() -> (SessionIssuer, TokenCodec) {
        let codec = TokenCodec::new(b"test_secret_key_at_least_32_bytes!", Algorithm::HS256)
            .unwrap();
        let issuer = SessionIssuer::new(codec.clone(), Duration::minutes(30), Duration::days(7));
        (issuer, codec)
    }

    #[test]
    fn test_issue_access() {
        let (issuer, codec) = setup();

        let token = issuer.issue_access("admin").expect("Failed to issue token");
        let claims = codec.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_issue_refresh_lives_in_days() {
        let (issuer, codec) = setup();

        let token = issuer.issue_refresh("admin").expect("Failed to issue token");
        let claims = codec.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_issue_pair_tokens_differ() {
        let (issuer, _) = setup();

        let pair = issuer.issue_pair("admin").expect("Failed to issue tokens");

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_issue_with_unrepresentable_expiry() {
        let (_, codec) = setup();
        let issuer = SessionIssuer::new(codec, Duration::minutes(30), Duration::days(100_000_000));

        assert!(matches!(
            issuer.issue_refresh("admin"),
            Err(JwtError::EncodingFailed(_))
        ));
        assert!(issuer.issue_access("admin").is_ok());
    }
}
