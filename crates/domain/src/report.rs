use serde::{Deserialize, Serialize};

use crate::query::Query;
use crate::trace::{CnameLink, Hop};

/// Aggregates derived from a completed trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub final_ips: Vec<String>,
    pub total_ms: f64,
    pub hops: u32,
    pub cache_saved_ms: f64,
}

/// The complete outcome of one resolution call: the ordered hop trace, the
/// alias chain, and the summary. Produced exactly once per call and owned by
/// the caller afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveReport {
    pub query: Query,
    pub use_cache: bool,
    pub summary: Summary,
    pub trace: Vec<Hop>,
    pub cname_chain: Vec<CnameLink>,
}

/// Shape a finished walk into the caller-facing report.
///
/// Pure aggregation: sums RTTs (a timed-out hop counts as the full query
/// deadline), counts hops, and carries the extracted addresses through.
/// An empty trace is a contract violation by the engine, not a DNS failure.
pub fn assemble(
    query: Query,
    use_cache: bool,
    trace: Vec<Hop>,
    cname_chain: Vec<CnameLink>,
    final_ips: Vec<String>,
    timeout_ms: f64,
    cache_saved_ms: f64,
) -> ResolveReport {
    assert!(!trace.is_empty(), "a completed walk records at least one hop");

    let total_ms = trace
        .iter()
        .map(|hop| hop.rtt_ms.unwrap_or(timeout_ms))
        .sum::<f64>();

    ResolveReport {
        query,
        use_cache,
        summary: Summary {
            final_ips,
            total_ms: round_ms(total_ms),
            hops: trace.len() as u32,
            cache_saved_ms: round_ms(cache_saved_ms),
        },
        trace,
        cname_chain,
    }
}

pub fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
