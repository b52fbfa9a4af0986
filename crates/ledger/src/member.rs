use serde::{Deserialize, Serialize};

use splitledger_core::{DomainError, DomainResult, ValueObject};

/// A group member, identified by name.
///
/// Names are case-sensitive and stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Member(String);

impl ValueObject for Member {}

impl Member {
    /// Build a member from raw user input.
    ///
    /// Surrounding whitespace is dropped; an empty result is rejected.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DomainError::validation("member name must not be empty"));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Member {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Member {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl core::fmt::Display for Member {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let member = Member::parse("  Asha \t").unwrap();
        assert_eq!(member.as_str(), "Asha");
    }

    #[test]
    fn whitespace_only_is_rejected() {
        assert!(matches!(Member::parse("   "), Err(DomainError::Validation(_))));
        assert!(Member::parse("").is_err());
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_ne!(Member::parse("bob").unwrap(), Member::parse("Bob").unwrap());
    }
}
