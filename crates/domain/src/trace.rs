use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::query::Query;
use crate::record_set::RecordSet;

/// Where a hop's server sits in the delegation hierarchy. Derived from the
/// server IP and the hop's own sections — never an independent source of
/// truth that could drift from the recorded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HopRole {
    Root,
    Tld,
    Auth,
    Cache,
}

impl HopRole {
    /// Classification rule: IP in the configured root set → `Root`; else an
    /// authority NS set owned by a single-label zone (a top-level zone like
    /// `com.`) → `Tld`; else `Auth`.
    pub fn classify(server: &str, authority: &[RecordSet], roots: &[IpAddr]) -> HopRole {
        if let Ok(ip) = server.parse::<IpAddr>() {
            if roots.contains(&ip) {
                return HopRole::Root;
            }
        }

        let delegates_top_level = authority
            .iter()
            .filter(|set| set.rdtype == "NS")
            .any(|set| is_single_label(&set.name));

        if delegates_top_level {
            HopRole::Tld
        } else {
            HopRole::Auth
        }
    }
}

fn is_single_label(name: &str) -> bool {
    let stripped = name.strip_suffix('.').unwrap_or(name);
    !stripped.is_empty() && !stripped.contains('.')
}

/// Why a walk stopped without an answer. Carried on the terminal hop so the
/// caller reads failures out of the trace, never out of an error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Server unresponsive after the retry.
    Timeout,
    /// Authoritative denial: the name does not exist.
    NxDomain,
    /// SERVFAIL, REFUSED, or another server-side error code.
    ServFail,
    /// Every candidate server for this step was already visited.
    ReferralLoop,
    /// The walk hit the maximum hop budget.
    HopBudgetExhausted,
    /// Referral without glue, and side-resolution produced no address.
    NoUsableServers,
}

/// One query/response exchange. Append-only once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hop {
    pub step: u32,
    pub server: String,
    pub role: HopRole,
    pub question: Query,
    pub answer: Vec<RecordSet>,
    pub additional: Vec<RecordSet>,
    pub authority: Vec<RecordSet>,
    pub rtt_ms: Option<f64>,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
}

/// One alias hop followed during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnameLink {
    pub from: String,
    pub to: String,
}
