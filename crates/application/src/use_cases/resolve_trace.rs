use crate::ports::{
    CachedAnswer, CachedData, QueryClient, QueryExchange, ResponseStatus, TraceCache,
};
use std::collections::HashSet;
use std::future::Future;
use std::net::IpAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracewalk_domain::config::ResolverConfig;
use tracewalk_domain::record_set::min_ttl;
use tracewalk_domain::report::{assemble, round_ms};
use tracewalk_domain::{
    CnameLink, DomainError, FailureReason, Hop, HopRole, Query, RecordSet, RecordType,
    ResolveReport,
};
use tracing::{debug, info, warn};

const CACHE_SERVER_LABEL: &str = "cache";

/// The iterative resolution engine.
///
/// Walks the delegation hierarchy one query at a time, following referrals
/// and CNAME chains, and records every exchange as a hop. DNS-level failures
/// never raise: they terminate the walk with a tagged failure on the final
/// hop so the caller always gets the partial trace. Only malformed caller
/// input returns an error.
pub struct ResolveTraceUseCase {
    client: Arc<dyn QueryClient>,
    cache: Arc<dyn TraceCache>,
    config: ResolverConfig,
}

impl ResolveTraceUseCase {
    pub fn new(
        client: Arc<dyn QueryClient>,
        cache: Arc<dyn TraceCache>,
        config: ResolverConfig,
    ) -> Self {
        info!(
            roots = config.root_servers.len(),
            timeout_ms = config.query_timeout_ms,
            max_hops = config.max_hops,
            "Resolution engine created"
        );

        Self {
            client,
            cache,
            config,
        }
    }

    pub async fn execute(
        &self,
        query: Query,
        use_cache: bool,
    ) -> Result<ResolveReport, DomainError> {
        info!(
            domain = %query.name,
            record_type = %query.record_type,
            cache = use_cache,
            "Resolving"
        );
        self.walk(query, use_cache, 0).await
    }

    /// One full walk for one target name. Side-resolutions of glue-less NS
    /// targets re-enter here with `depth + 1`, bounded by configuration.
    fn walk<'a>(
        &'a self,
        query: Query,
        use_cache: bool,
        depth: u32,
    ) -> Pin<Box<dyn Future<Output = Result<ResolveReport, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let qtype = query.record_type;

            if use_cache {
                if let Some(data) = self.cache.get(&query.name, qtype) {
                    debug!(domain = %query.name, "cache hit, short-circuiting walk");
                    return Ok(self.replay_cached(query, data));
                }
            }

            let timeout = Duration::from_millis(self.config.query_timeout_ms);
            let timeout_ms = self.config.query_timeout_ms as f64;
            let max_hops = self.config.max_hops as usize;

            let mut current = query.name.clone();
            let mut pool: Vec<IpAddr> = self.config.root_servers.clone();
            let mut visited: HashSet<IpAddr> = HashSet::new();
            let mut trace: Vec<Hop> = Vec::new();
            let mut cname_chain: Vec<CnameLink> = Vec::new();
            let mut final_sets: Vec<RecordSet> = Vec::new();
            let mut final_ips: Vec<String> = Vec::new();
            let mut completed = false;

            while trace.len() < max_hops {
                let Some(server) = pick_server(&pool, &visited) else {
                    warn!(domain = %current, "all candidate servers already visited");
                    set_failure(&mut trace, FailureReason::ReferralLoop);
                    break;
                };
                visited.insert(server);

                let question = Query::retarget(current.clone(), qtype);
                let exchange = match self.query_with_retry(server, &question, timeout).await {
                    Ok(exchange) => exchange,
                    Err(e) => {
                        warn!(server = %server, error = %e, "server unresponsive after retry");
                        trace.push(Hop {
                            step: (trace.len() + 1) as u32,
                            server: server.to_string(),
                            role: HopRole::classify(
                                &server.to_string(),
                                &[],
                                &self.config.root_servers,
                            ),
                            question,
                            answer: vec![],
                            additional: vec![],
                            authority: vec![],
                            rtt_ms: None,
                            cached: false,
                            failure: Some(FailureReason::Timeout),
                        });
                        break;
                    }
                };

                debug!(
                    server = %server,
                    domain = %current,
                    rtt_ms = exchange.rtt_ms,
                    answer = exchange.answer.len(),
                    authority = exchange.authority.len(),
                    "hop recorded"
                );

                trace.push(Hop {
                    step: (trace.len() + 1) as u32,
                    server: server.to_string(),
                    role: HopRole::classify(
                        &server.to_string(),
                        &exchange.authority,
                        &self.config.root_servers,
                    ),
                    question,
                    answer: exchange.answer.clone(),
                    additional: exchange.additional.clone(),
                    authority: exchange.authority.clone(),
                    rtt_ms: Some(round_ms(exchange.rtt_ms)),
                    cached: false,
                    failure: None,
                });

                match exchange.status {
                    ResponseStatus::NxDomain => {
                        set_failure(&mut trace, FailureReason::NxDomain);
                        if use_cache && self.config.cache_negative {
                            let walk_ms = trace_total_ms(&trace, timeout_ms);
                            self.cache.put(
                                &query.name,
                                qtype,
                                CachedData::Negative { walk_ms },
                                self.config.negative_ttl,
                            );
                        }
                        break;
                    }
                    ResponseStatus::ServerFailure => {
                        set_failure(&mut trace, FailureReason::ServFail);
                        break;
                    }
                    ResponseStatus::NoError => {}
                }

                if exchange
                    .answer
                    .iter()
                    .any(|set| set.rdtype == qtype.as_str())
                {
                    final_ips = extract_final_ips(&exchange.answer);
                    final_sets = exchange.answer;
                    completed = true;
                    break;
                }

                if qtype != RecordType::CNAME {
                    if let Some(target) = first_cname_target(&exchange.answer) {
                        debug!(from = %current, to = %target, "following CNAME");
                        cname_chain.push(CnameLink {
                            from: current.clone(),
                            to: target.clone(),
                        });
                        // The alias target may live in a different zone:
                        // restart from the roots with a fresh visited set.
                        current = target;
                        pool = self.config.root_servers.clone();
                        visited.clear();
                        continue;
                    }
                }

                let ns_hosts = ns_targets(&exchange.authority);
                if ns_hosts.is_empty() {
                    warn!(domain = %current, "response neither answers nor delegates");
                    set_failure(&mut trace, FailureReason::NoUsableServers);
                    break;
                }

                let mut next = glue_pool(&ns_hosts, &exchange.additional);
                if next.is_empty() {
                    next = self
                        .side_resolve_ns(&ns_hosts, use_cache, depth)
                        .await;
                }
                if next.is_empty() {
                    set_failure(&mut trace, FailureReason::NoUsableServers);
                    break;
                }
                pool = next;
            }

            if !completed && trace.len() >= max_hops && last_failure(&trace).is_none() {
                set_failure(&mut trace, FailureReason::HopBudgetExhausted);
            }

            let report = assemble(
                query.clone(),
                use_cache,
                trace,
                cname_chain,
                final_ips,
                timeout_ms,
                0.0,
            );

            if completed && use_cache {
                if let Some(ttl) = min_ttl(&final_sets) {
                    self.cache.put(
                        &query.name,
                        qtype,
                        CachedData::Answer(CachedAnswer {
                            answer: final_sets,
                            final_ips: report.summary.final_ips.clone(),
                            cname_chain: report.cname_chain.clone(),
                            walk_ms: report.summary.total_ms,
                        }),
                        ttl,
                    );
                }
            }

            info!(
                domain = %query.name,
                hops = report.summary.hops,
                total_ms = report.summary.total_ms,
                final_ips = report.summary.final_ips.len(),
                failure = ?last_failure(&report.trace),
                "walk finished"
            );

            Ok(report)
        })
    }

    /// Issue one query with a single retry after a timeout or transport
    /// fault. A second failure is reported to the caller as the hop failing.
    async fn query_with_retry(
        &self,
        server: IpAddr,
        question: &Query,
        timeout: Duration,
    ) -> Result<QueryExchange, DomainError> {
        match self
            .client
            .query(server, &question.name, question.record_type, timeout)
            .await
        {
            Ok(exchange) => Ok(exchange),
            Err(first) => {
                debug!(server = %server, error = %first, "query failed, retrying once");
                self.client
                    .query(server, &question.name, question.record_type, timeout)
                    .await
            }
        }
    }

    /// Resolve NS target hosts to addresses when a referral carried no glue.
    /// Re-enters the walk depth-limited; the first host that yields addresses
    /// wins.
    async fn side_resolve_ns(
        &self,
        ns_hosts: &[String],
        use_cache: bool,
        depth: u32,
    ) -> Vec<IpAddr> {
        if depth >= self.config.side_resolution_depth {
            warn!(depth, "side-resolution depth exhausted");
            return Vec::new();
        }

        for host in ns_hosts {
            let Ok(ns_query) = Query::new(host, RecordType::A) else {
                continue;
            };
            debug!(host = %ns_query.name, depth, "side-resolving glue-less NS target");
            match self.walk(ns_query, use_cache, depth + 1).await {
                Ok(report) if !report.summary.final_ips.is_empty() => {
                    return report
                        .summary
                        .final_ips
                        .iter()
                        .filter_map(|ip| ip.parse().ok())
                        .collect();
                }
                Ok(_) => continue,
                Err(e) => {
                    debug!(host = %host, error = %e, "side-resolution failed");
                    continue;
                }
            }
        }

        Vec::new()
    }

    /// Synthesize the single-hop trace for a cache hit.
    fn replay_cached(&self, query: Query, data: CachedData) -> ResolveReport {
        let (answer, final_ips, cname_chain, walk_ms, failure) = match data {
            CachedData::Answer(cached) => (
                cached.answer,
                cached.final_ips,
                cached.cname_chain,
                cached.walk_ms,
                None,
            ),
            CachedData::Negative { walk_ms } => {
                (vec![], vec![], vec![], walk_ms, Some(FailureReason::NxDomain))
            }
        };

        let hop = Hop {
            step: 1,
            server: CACHE_SERVER_LABEL.to_string(),
            role: HopRole::Cache,
            question: query.clone(),
            answer,
            additional: vec![],
            authority: vec![],
            rtt_ms: Some(0.0),
            cached: true,
            failure,
        };

        assemble(
            query,
            true,
            vec![hop],
            cname_chain,
            final_ips,
            self.config.query_timeout_ms as f64,
            walk_ms,
        )
    }
}

/// Deterministic candidate pick: first unvisited IPv4 in pool order, falling
/// back to the first unvisited address of any family.
fn pick_server(pool: &[IpAddr], visited: &HashSet<IpAddr>) -> Option<IpAddr> {
    pool.iter()
        .copied()
        .find(|ip| ip.is_ipv4() && !visited.contains(ip))
        .or_else(|| pool.iter().copied().find(|ip| !visited.contains(ip)))
}

fn set_failure(trace: &mut [Hop], reason: FailureReason) {
    if let Some(last) = trace.last_mut() {
        last.failure = Some(reason);
    }
}

fn last_failure(trace: &[Hop]) -> Option<FailureReason> {
    trace.last().and_then(|hop| hop.failure)
}

fn trace_total_ms(trace: &[Hop], timeout_ms: f64) -> f64 {
    trace
        .iter()
        .map(|hop| hop.rtt_ms.unwrap_or(timeout_ms))
        .sum()
}

/// Addresses from A/AAAA answer sets, in answer order. The value text may
/// carry trailing rdata tokens; the address is the first.
fn extract_final_ips(answer: &[RecordSet]) -> Vec<String> {
    answer
        .iter()
        .filter(|set| set.rdtype == "A" || set.rdtype == "AAAA")
        .flat_map(|set| set.values())
        .filter_map(|value| value.split_whitespace().next())
        .map(|ip| ip.to_string())
        .collect()
}

fn first_cname_target(answer: &[RecordSet]) -> Option<String> {
    answer
        .iter()
        .find(|set| set.rdtype == "CNAME")
        .and_then(|set| set.values().next())
        .map(canonical_name)
}

/// NS target host names from the authority section, in section order.
fn ns_targets(authority: &[RecordSet]) -> Vec<String> {
    authority
        .iter()
        .filter(|set| set.rdtype == "NS")
        .flat_map(|set| set.values())
        .map(canonical_name)
        .collect()
}

/// Next candidate pool from additional-section glue matching the NS targets,
/// order-preserving and de-duplicated.
fn glue_pool(ns_hosts: &[String], additional: &[RecordSet]) -> Vec<IpAddr> {
    let mut seen: HashSet<IpAddr> = HashSet::new();
    let mut pool = Vec::new();

    for host in ns_hosts {
        let glue = additional
            .iter()
            .filter(|set| set.rdtype == "A" || set.rdtype == "AAAA")
            .filter(|set| canonical_name(&set.name) == *host)
            .flat_map(|set| set.values())
            .filter_map(|value| value.parse::<IpAddr>().ok());

        for ip in glue {
            if seen.insert(ip) {
                pool.push(ip);
            }
        }
    }

    pool
}

fn canonical_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let stripped = lower.strip_suffix('.').unwrap_or(&lower);
    format!("{}.", stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_server_prefers_ipv4() {
        let pool: Vec<IpAddr> = vec![
            "2001:db8::1".parse().unwrap(),
            "192.0.2.1".parse().unwrap(),
            "192.0.2.2".parse().unwrap(),
        ];
        let visited = HashSet::new();
        assert_eq!(
            pick_server(&pool, &visited),
            Some("192.0.2.1".parse().unwrap())
        );
    }

    #[test]
    fn test_pick_server_falls_back_to_ipv6() {
        let pool: Vec<IpAddr> = vec!["2001:db8::1".parse().unwrap()];
        let visited = HashSet::new();
        assert_eq!(
            pick_server(&pool, &visited),
            Some("2001:db8::1".parse().unwrap())
        );
    }

    #[test]
    fn test_pick_server_skips_visited() {
        let pool: Vec<IpAddr> = vec!["192.0.2.1".parse().unwrap(), "192.0.2.2".parse().unwrap()];
        let mut visited = HashSet::new();
        visited.insert("192.0.2.1".parse::<IpAddr>().unwrap());
        assert_eq!(
            pick_server(&pool, &visited),
            Some("192.0.2.2".parse().unwrap())
        );
        visited.insert("192.0.2.2".parse::<IpAddr>().unwrap());
        assert_eq!(pick_server(&pool, &visited), None);
    }

    #[test]
    fn test_glue_pool_preserves_order_and_dedupes() {
        let mut ns1 = RecordSet::new("ns1.example.net.", "A", 300);
        ns1.push("192.0.2.10");
        let mut ns2 = RecordSet::new("ns2.example.net.", "A", 300);
        ns2.push("192.0.2.20");
        ns2.push("192.0.2.10");

        let hosts = vec!["ns1.example.net.".to_string(), "ns2.example.net.".to_string()];
        let pool = glue_pool(&hosts, &[ns1, ns2]);
        let expected: Vec<IpAddr> = vec![
            "192.0.2.10".parse().unwrap(),
            "192.0.2.20".parse().unwrap(),
        ];
        assert_eq!(pool, expected);
    }

    #[test]
    fn test_glue_pool_matches_names_case_insensitively() {
        let mut glue = RecordSet::new("NS1.Example.NET.", "A", 300);
        glue.push("192.0.2.10");
        let hosts = vec!["ns1.example.net.".to_string()];
        assert_eq!(glue_pool(&hosts, &[glue]).len(), 1);
    }

    #[test]
    fn test_extract_final_ips_ignores_non_address_sets() {
        let mut a = RecordSet::new("example.com.", "A", 300);
        a.push("93.184.216.34");
        let mut cname = RecordSet::new("www.example.com.", "CNAME", 300);
        cname.push("example.com.");

        assert_eq!(extract_final_ips(&[cname, a]), vec!["93.184.216.34"]);
    }

    #[test]
    fn test_ns_targets_canonicalized() {
        let mut ns = RecordSet::new("com.", "NS", 172_800);
        ns.push("A.GTLD-SERVERS.NET.");
        ns.push("b.gtld-servers.net");
        assert_eq!(
            ns_targets(&[ns]),
            vec!["a.gtld-servers.net.", "b.gtld-servers.net."]
        );
    }
}
