use serde::{Deserialize, Serialize};
use tracewalk_domain::{CnameLink, Hop, ResolveReport, Summary};

#[derive(Deserialize, Debug)]
pub struct ResolveParams {
    pub name: String,

    #[serde(rename = "type", default = "default_record_type")]
    pub record_type: String,

    #[serde(default = "default_cache")]
    pub cache: String,
}

fn default_record_type() -> String {
    "A".to_string()
}

fn default_cache() -> String {
    "on".to_string()
}

impl ResolveParams {
    pub fn use_cache(&self) -> bool {
        self.cache == "on"
    }
}

/// The query as the caller posed it, echoed with the cache toggle.
#[derive(Serialize, Debug, Clone)]
pub struct QueryEcho {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub cache: &'static str,
}

/// Wire shape of one resolution. The hop and record-set layouts come from
/// the domain types; this wrapper fixes the envelope.
#[derive(Serialize, Debug, Clone)]
pub struct ResolveResponse {
    pub query: QueryEcho,
    pub summary: Summary,
    pub trace: Vec<Hop>,
    pub cname_chain: Vec<CnameLink>,
}

impl From<ResolveReport> for ResolveResponse {
    fn from(report: ResolveReport) -> Self {
        Self {
            query: QueryEcho {
                name: report.query.name.clone(),
                record_type: report.query.record_type.to_string(),
                cache: if report.use_cache { "on" } else { "off" },
            },
            summary: report.summary,
            trace: report.trace,
            cname_chain: report.cname_chain,
        }
    }
}
