//! Parses wire responses into the record-set groups the engine walks on.
//!
//! Unlike a plain resolver we keep all three sections verbatim: the trace
//! shows the caller exactly what each server said, including referral NS
//! sets and glue.

use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record, RecordType as HickoryRecordType};
use tracewalk_application::ports::ResponseStatus;
use tracewalk_domain::{DomainError, RecordSet};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub status: ResponseStatus,
    pub answer: Vec<RecordSet>,
    pub authority: Vec<RecordSet>,
    pub additional: Vec<RecordSet>,
}

pub struct ResponseParser;

impl ResponseParser {
    /// Parse response bytes, checking the message ID against the query's.
    pub fn parse(response_bytes: &[u8], expected_id: u16) -> Result<ParsedResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.id() != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                message.id(),
                expected_id
            )));
        }

        let status = match message.response_code() {
            ResponseCode::NoError => ResponseStatus::NoError,
            ResponseCode::NXDomain => ResponseStatus::NxDomain,
            _ => ResponseStatus::ServerFailure,
        };

        let answer = group_into_sets(message.answers());
        let authority = group_into_sets(message.name_servers());
        let additional = group_into_sets(message.additionals());

        debug!(
            rcode = ?message.response_code(),
            answer = answer.len(),
            authority = authority.len(),
            additional = additional.len(),
            "DNS response parsed"
        );

        Ok(ParsedResponse {
            status,
            answer,
            authority,
            additional,
        })
    }
}

/// Group individual records into RRsets keyed by (owner, type), preserving
/// first-appearance order. The EDNS0 OPT pseudo-record is not data.
fn group_into_sets(records: &[Record]) -> Vec<RecordSet> {
    let mut sets: Vec<RecordSet> = Vec::new();

    for record in records {
        if record.record_type() == HickoryRecordType::OPT {
            continue;
        }

        let name = record.name().to_utf8();
        let rdtype = record.record_type().to_string();
        let value = rdata_text(record.data());

        match sets
            .iter_mut()
            .find(|set| set.name == name && set.rdtype == rdtype)
        {
            Some(set) => {
                set.ttl = set.ttl.min(record.ttl());
                set.push(value);
            }
            None => {
                let mut set = RecordSet::new(name, rdtype, record.ttl());
                set.push(value);
                sets.push(set);
            }
        }
    }

    sets
}

fn rdata_text(data: &RData) -> String {
    match data {
        RData::A(a) => a.0.to_string(),
        RData::AAAA(aaaa) => aaaa.0.to_string(),
        RData::CNAME(cname) => cname.0.to_utf8(),
        RData::NS(ns) => ns.0.to_utf8(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::{Message, MessageType, OpCode};
    use hickory_proto::rr::rdata;
    use hickory_proto::rr::{DNSClass, Name, RecordType};
    use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn encode(message: &Message) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).unwrap();
        buf
    }

    fn a_record(name: &str, ttl: u32, addr: [u8; 4]) -> Record {
        Record::from_rdata(
            Name::from_str(name).unwrap(),
            ttl,
            RData::A(rdata::A(Ipv4Addr::from(addr))),
        )
    }

    fn response(id: u16) -> Message {
        let mut message = Message::new(id, MessageType::Response, OpCode::Query);
        let mut query = hickory_proto::op::Query::new();
        query.set_name(Name::from_str("www.example.com.").unwrap());
        query.set_query_type(RecordType::A);
        query.set_query_class(DNSClass::IN);
        message.add_query(query);
        message
    }

    #[test]
    fn test_groups_same_owner_records_into_one_set() {
        let mut message = response(7);
        message.add_answer(a_record("www.example.com.", 300, [192, 0, 2, 1]));
        message.add_answer(a_record("www.example.com.", 120, [192, 0, 2, 2]));

        let parsed = ResponseParser::parse(&encode(&message), 7).unwrap();
        assert_eq!(parsed.answer.len(), 1);
        let set = &parsed.answer[0];
        assert_eq!(set.name, "www.example.com.");
        assert_eq!(set.rdtype, "A");
        assert_eq!(set.ttl, 120, "set TTL is the minimum member TTL");
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].value, "192.0.2.1");
    }

    #[test]
    fn test_referral_sections_preserved() {
        let mut message = response(9);
        message.add_name_server(Record::from_rdata(
            Name::from_str("com.").unwrap(),
            172_800,
            RData::NS(rdata::NS(Name::from_str("a.gtld-servers.net.").unwrap())),
        ));
        message.add_additional(a_record("a.gtld-servers.net.", 172_800, [192, 5, 6, 30]));

        let parsed = ResponseParser::parse(&encode(&message), 9).unwrap();
        assert_eq!(parsed.status, ResponseStatus::NoError);
        assert_eq!(parsed.authority.len(), 1);
        assert_eq!(parsed.authority[0].rdtype, "NS");
        assert_eq!(parsed.authority[0].records[0].value, "a.gtld-servers.net.");
        assert_eq!(parsed.additional[0].records[0].value, "192.5.6.30");
    }

    #[test]
    fn test_nxdomain_status() {
        let mut message = response(3);
        message.set_response_code(ResponseCode::NXDomain);

        let parsed = ResponseParser::parse(&encode(&message), 3).unwrap();
        assert_eq!(parsed.status, ResponseStatus::NxDomain);
        assert!(parsed.answer.is_empty());
    }

    #[test]
    fn test_servfail_and_refused_are_server_failures() {
        for code in [ResponseCode::ServFail, ResponseCode::Refused] {
            let mut message = response(4);
            message.set_response_code(code);
            let parsed = ResponseParser::parse(&encode(&message), 4).unwrap();
            assert_eq!(parsed.status, ResponseStatus::ServerFailure);
        }
    }

    #[test]
    fn test_mismatched_id_rejected() {
        let message = response(100);
        let result = ResponseParser::parse(&encode(&message), 200);
        assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = ResponseParser::parse(&[0x00, 0x01, 0x02], 1);
        assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
    }
}
