use std::collections::HashMap;

/// Stored account: the username, its password hash, and whether the account
/// may still sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    pub password_hash: String,
    pub disabled: bool,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Read-only username → credential map, filled once at startup.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    records: HashMap<String, CredentialRecord>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, replacing any earlier record with the same username.
    pub fn with_record(mut self, record: CredentialRecord) -> Self {
        self.records.insert(record.username.clone(), record);
        self
    }

    pub fn find(&self, username: &str) -> Option<&CredentialRecord> {
        self.records.get(username)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<CredentialRecord> for CredentialStore {
    fn from_iter<I: IntoIterator<Item = CredentialRecord>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |store, record| store.with_record(record))
    }
}
