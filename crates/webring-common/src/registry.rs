use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, WebringError};
use crate::member::{normalize_identity, Member};

/// Immutable, ordered set of ring members with a reverse index.
///
/// The registry is built once at startup and only read afterwards, so it can
/// be shared across request handlers behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Registry {
    members: Vec<Member>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Builds a registry that accepts any non-empty member list.
    pub fn build(members: Vec<Member>) -> Result<Self> {
        Self::with_min_members(members, 1)
    }

    /// Builds a registry that requires at least `min_members` entries.
    ///
    /// A minimum below one is raised to one; a ring can never be empty.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if there are fewer members than required
    /// - `DuplicateMember` if two members normalize to the same identity
    pub fn with_min_members(members: Vec<Member>, min_members: usize) -> Result<Self> {
        let min_members = min_members.max(1);
        if members.len() < min_members {
            return Err(WebringError::InvalidConfiguration(format!(
                "webring needs at least {} member(s), found {}",
                min_members,
                members.len()
            )));
        }

        let mut index = HashMap::with_capacity(members.len());
        for (position, member) in members.iter().enumerate() {
            let identity = member.identity().to_string();
            if let Some(&existing) = index.get(&identity) {
                let first: &Member = &members[existing];
                return Err(WebringError::DuplicateMember {
                    url: identity,
                    first: first.name.clone(),
                    second: member.name.clone(),
                });
            }
            index.insert(identity, position);
        }

        debug!("Built registry with {} members", members.len());
        Ok(Self { members, index })
    }

    /// Resolves an identity to its ring position.
    pub fn lookup(&self, identity: &str) -> Option<usize> {
        self.index.get(normalize_identity(identity)).copied()
    }

    pub fn get(&self, position: usize) -> Option<&Member> {
        self.members.get(position)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for a successfully built registry.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Member> {
        vec![
            Member::new("A", "https://a.test"),
            Member::new("B", "https://b.test"),
            Member::new("C", "https://c.test"),
        ]
    }

    #[test]
    fn test_build_indexes_every_member() {
        let registry = Registry::build(abc()).unwrap();
        assert_eq!(registry.len(), 3);
        for (i, member) in registry.iter().enumerate() {
            assert_eq!(registry.lookup(&member.url), Some(i));
        }
    }

    #[test]
    fn test_build_empty_fails() {
        let err = Registry::build(vec![]).unwrap_err();
        assert!(matches!(err, WebringError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_strict_minimum_rejects_single_member() {
        let members = vec![Member::new("A", "https://a.test")];
        let err = Registry::with_min_members(members.clone(), 2).unwrap_err();
        assert!(matches!(err, WebringError::InvalidConfiguration(_)));

        assert!(Registry::with_min_members(members, 1).is_ok());
    }

    #[test]
    fn test_zero_minimum_still_rejects_empty() {
        assert!(Registry::with_min_members(vec![], 0).is_err());
    }

    #[test]
    fn test_duplicate_urls_rejected() {
        let members = vec![
            Member::new("A", "https://a.test"),
            Member::new("B", "https://b.test"),
            Member::new("A again", "https://a.test/"),
        ];
        match Registry::build(members) {
            Err(WebringError::DuplicateMember { url, first, second }) => {
                assert_eq!(url, "https://a.test");
                assert_eq!(first, "A");
                assert_eq!(second, "A again");
            }
            other => panic!("Expected DuplicateMember, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let registry = Registry::build(abc()).unwrap();
        assert_eq!(registry.lookup("https://d.test"), None);
        assert_eq!(registry.lookup(""), None);
        assert_eq!(registry.lookup("a.test"), None);
    }

    #[test]
    fn test_lookup_ignores_trailing_slash() {
        let registry = Registry::build(abc()).unwrap();
        assert_eq!(registry.lookup("https://b.test/"), Some(1));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = Registry::build(abc()).unwrap();
        assert_eq!(registry.lookup("HTTPS://A.TEST"), None);
    }

    #[test]
    fn test_order_preserved() {
        let registry = Registry::build(abc()).unwrap();
        let names: Vec<_> = registry.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(registry.get(2).map(|m| m.name.as_str()), Some("C"));
        assert!(registry.get(3).is_none());
        assert!(!registry.is_empty());
    }
}
