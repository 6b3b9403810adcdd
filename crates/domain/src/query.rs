use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::record_type::RecordType;

/// One resolution question. Immutable once created; the constructor
/// canonicalizes the name to a lowercase FQDN with a trailing dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
}

impl Query {
    pub fn new(name: &str, record_type: RecordType) -> Result<Self, DomainError> {
        let name = canonicalize(name)?;
        Ok(Self { name, record_type })
    }

    /// Build a question for a name that already passed canonicalization
    /// (walk-internal retargets after a CNAME).
    pub fn retarget(name: String, record_type: RecordType) -> Self {
        Self { name, record_type }
    }
}

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

fn canonicalize(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." {
        return Err(DomainError::InvalidDomainName(raw.to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    let without_root = lower.strip_suffix('.').unwrap_or(&lower);

    if without_root.len() > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(raw.to_string()));
    }

    for label in without_root.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(raw.to_string()));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidDomainName(raw.to_string()));
        }
    }

    Ok(format!("{}.", without_root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_trailing_dot() {
        let q = Query::new("www.example.com", RecordType::A).unwrap();
        assert_eq!(q.name, "www.example.com.");
    }

    #[test]
    fn test_preserves_existing_trailing_dot() {
        let q = Query::new("example.com.", RecordType::AAAA).unwrap();
        assert_eq!(q.name, "example.com.");
    }

    #[test]
    fn test_lowercases() {
        let q = Query::new("WWW.Example.COM", RecordType::A).unwrap();
        assert_eq!(q.name, "www.example.com.");
    }

    #[test]
    fn test_rejects_empty_and_root() {
        assert!(Query::new("", RecordType::A).is_err());
        assert!(Query::new("   ", RecordType::A).is_err());
        assert!(Query::new(".", RecordType::A).is_err());
    }

    #[test]
    fn test_rejects_empty_label() {
        assert!(Query::new("foo..bar.com", RecordType::A).is_err());
    }

    #[test]
    fn test_rejects_bad_characters() {
        assert!(Query::new("exa mple.com", RecordType::A).is_err());
        assert!(Query::new("exam!ple.com", RecordType::A).is_err());
    }

    #[test]
    fn test_rejects_oversized_label() {
        let label = "a".repeat(64);
        assert!(Query::new(&format!("{}.com", label), RecordType::A).is_err());
    }

    #[test]
    fn test_rejects_oversized_name() {
        let name = vec!["abcdefgh"; 32].join(".");
        assert!(Query::new(&name, RecordType::A).is_err());
    }
}
