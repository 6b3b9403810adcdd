use serde::{Deserialize, Serialize};

/// One record value inside an RRset. Wraps the text form so the wire shape
/// stays `{"value": "..."}` for every record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValue {
    pub value: String,
}

impl RecordValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A set of records sharing owner name and type, as returned in one response
/// section. `rdtype` is the wire type text — answer sets are limited to the
/// supported query types, but authority/additional sets carry whatever the
/// server sent (NS, SOA, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub name: String,
    pub rdtype: String,
    pub ttl: u32,
    pub records: Vec<RecordValue>,
}

impl RecordSet {
    pub fn new(name: impl Into<String>, rdtype: impl Into<String>, ttl: u32) -> Self {
        Self {
            name: name.into(),
            rdtype: rdtype.into(),
            ttl,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.records.push(RecordValue::new(value));
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.value.as_str())
    }
}

/// Minimum TTL across a group of record sets. `None` for an empty group.
pub fn min_ttl(sets: &[RecordSet]) -> Option<u32> {
    sets.iter().map(|s| s.ttl).min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_ttl_over_sets() {
        let mut a = RecordSet::new("example.com.", "A", 300);
        a.push("192.0.2.1");
        let mut b = RecordSet::new("example.com.", "AAAA", 60);
        b.push("2001:db8::1");

        assert_eq!(min_ttl(&[a, b]), Some(60));
        assert_eq!(min_ttl(&[]), None);
    }
}
