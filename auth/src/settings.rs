use serde::Deserialize;

/// Authentication settings, read once at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub secret_key: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
    pub default_admin_password: String,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_ttl_minutes() -> i64 {
    30
}

fn default_refresh_token_ttl_days() -> i64 {
    7
}
