//! The production query primitive: build → send over UDP → parse, measuring
//! the round trip.

use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use super::transport::UdpTransport;
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use tracewalk_application::ports::{QueryClient, QueryExchange};
use tracewalk_domain::{DomainError, RecordType};
use tracing::debug;

const DNS_PORT: u16 = 53;

#[derive(Default)]
pub struct WireQueryClient;

impl WireQueryClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QueryClient for WireQueryClient {
    async fn query(
        &self,
        server: IpAddr,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<QueryExchange, DomainError> {
        let (id, bytes) = MessageBuilder::build_iterative_query(name, record_type)?;
        let transport = UdpTransport::new(SocketAddr::new(server, DNS_PORT));

        let start = Instant::now();
        let response_bytes = transport.send(&bytes, timeout).await?;
        let rtt_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            server = %server,
            domain = name,
            record_type = %record_type,
            rtt_ms = rtt_ms,
            "query exchanged"
        );

        let parsed = ResponseParser::parse(&response_bytes, id)?;

        Ok(QueryExchange {
            status: parsed.status,
            answer: parsed.answer,
            authority: parsed.authority,
            additional: parsed.additional,
            rtt_ms,
        })
    }
}
