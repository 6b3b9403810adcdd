use std::sync::Arc;
use tracewalk_api::AppState;
use tracewalk_application::ports::TraceCache;
use tracewalk_application::ResolveTraceUseCase;
use tracewalk_domain::Config;
use tracewalk_infrastructure::{TtlCache, WireQueryClient};

/// Wire the process-wide dependencies: one shared cache, one wire client,
/// one resolution engine.
pub fn build_state(config: &Config) -> AppState {
    let cache: Arc<dyn TraceCache> = if config.cache.enabled {
        Arc::new(TtlCache::new(config.cache.max_entries))
    } else {
        Arc::new(TtlCache::disabled())
    };

    let client = Arc::new(WireQueryClient::new());

    let resolve = Arc::new(ResolveTraceUseCase::new(
        client,
        cache.clone(),
        config.resolver.clone(),
    ));

    AppState { resolve, cache }
}
