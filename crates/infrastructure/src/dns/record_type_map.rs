//! Mapping between `tracewalk_domain::RecordType` and `hickory_proto::rr::RecordType`
//!
//! The domain set is closed (A, AAAA, CNAME); the reverse direction is only
//! needed for classifying answer sections and so returns `Option`.

use hickory_proto::rr::RecordType as HickoryRecordType;
use tracewalk_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
        }
    }

    /// Convert hickory RecordType → domain RecordType. `None` for types the
    /// trace carries only as opaque section text (NS, SOA, ...).
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        match hickory_type {
            HickoryRecordType::A => Some(RecordType::A),
            HickoryRecordType::AAAA => Some(RecordType::AAAA),
            HickoryRecordType::CNAME => Some(RecordType::CNAME),
            _ => None,
        }
    }
}
