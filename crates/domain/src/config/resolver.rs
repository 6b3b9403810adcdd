use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// The fixed IANA root server set (IPv4). Injected into the engine at
/// construction so tests can substitute a fake root set.
pub const ROOT_SERVERS: [&str; 13] = [
    "198.41.0.4",
    "199.9.14.201",
    "192.33.4.12",
    "199.7.91.13",
    "192.203.230.10",
    "192.5.5.241",
    "192.112.36.4",
    "198.97.190.53",
    "192.36.148.17",
    "192.58.128.30",
    "193.0.14.129",
    "199.7.83.42",
    "202.12.27.33",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Starting server pool for every walk.
    #[serde(default = "default_root_servers")]
    pub root_servers: Vec<IpAddr>,

    /// Per-query deadline. One retry is attempted on timeout.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Hard ceiling on hops per walk; guarantees termination.
    #[serde(default = "default_max_hops")]
    pub max_hops: u32,

    /// Recursion limit for glue-less referral side-resolution.
    #[serde(default = "default_side_resolution_depth")]
    pub side_resolution_depth: u32,

    /// Cache NXDOMAIN outcomes.
    #[serde(default = "default_false")]
    pub cache_negative: bool,

    /// TTL for cached negative outcomes, seconds.
    #[serde(default = "default_negative_ttl")]
    pub negative_ttl: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_servers: default_root_servers(),
            query_timeout_ms: default_query_timeout_ms(),
            max_hops: default_max_hops(),
            side_resolution_depth: default_side_resolution_depth(),
            cache_negative: false,
            negative_ttl: default_negative_ttl(),
        }
    }
}

fn default_root_servers() -> Vec<IpAddr> {
    ROOT_SERVERS
        .iter()
        .map(|s| s.parse().expect("static root server literal"))
        .collect()
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_max_hops() -> u32 {
    20
}

fn default_side_resolution_depth() -> u32 {
    2
}

fn default_negative_ttl() -> u32 {
    300
}

fn default_false() -> bool {
    false
}
