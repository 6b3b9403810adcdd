use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use tracewalk_domain::{DomainError, RecordSet, RecordType};

/// Response-code classes the walk branches on. Anything that is neither a
/// clean answer nor an authoritative denial is a server failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    NoError,
    NxDomain,
    ServerFailure,
}

/// One parsed query/response exchange as seen by the engine: the three
/// response sections grouped into record sets, plus the measured round trip.
#[derive(Debug, Clone)]
pub struct QueryExchange {
    pub status: ResponseStatus,
    pub answer: Vec<RecordSet>,
    pub authority: Vec<RecordSet>,
    pub additional: Vec<RecordSet>,
    pub rtt_ms: f64,
}

/// The query primitive the engine walks with: send one non-recursive DNS
/// query to a specific server and return the parsed response within the
/// deadline. Retries are the engine's decision, not the client's.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn query(
        &self,
        server: IpAddr,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<QueryExchange, DomainError>;
}
