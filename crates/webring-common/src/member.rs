use serde::{Deserialize, Serialize};

/// A site taking part in the ring.
///
/// `url` is the member's identity; two members with the same normalized URL
/// cannot coexist in one registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub url: String,
}

impl Member {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The identity under which this member is indexed.
    pub fn identity(&self) -> &str {
        normalize_identity(&self.url)
    }
}

/// Normalizes a member identity for lookup.
///
/// Comparison stays case-sensitive; only trailing slashes are dropped so that
/// `https://a.test/` and `https://a.test` name the same member.
pub fn normalize_identity(identity: &str) -> &str {
    identity.trim_end_matches('/')
}
