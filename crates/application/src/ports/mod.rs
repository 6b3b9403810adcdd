pub mod query_client;
pub mod trace_cache;

pub use query_client::{QueryClient, QueryExchange, ResponseStatus};
pub use trace_cache::{CacheStatsSnapshot, CachedAnswer, CachedData, TraceCache};
