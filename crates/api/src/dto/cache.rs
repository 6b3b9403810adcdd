use serde::Serialize;
use tracewalk_application::ports::CacheStatsSnapshot;

#[derive(Serialize, Debug, Clone)]
pub struct CacheStatsResponse {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
}

impl From<CacheStatsSnapshot> for CacheStatsResponse {
    fn from(snapshot: CacheStatsSnapshot) -> Self {
        Self {
            entries: snapshot.entries,
            hits: snapshot.hits,
            misses: snapshot.misses,
            insertions: snapshot.insertions,
            evictions: snapshot.evictions,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CacheClearResponse {
    pub cleared: bool,
}
