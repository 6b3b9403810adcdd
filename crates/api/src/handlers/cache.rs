use crate::{
    dto::{CacheClearResponse, CacheStatsResponse},
    state::AppState,
};
use axum::{extract::State, Json};
use tracing::{debug, info, instrument};

#[instrument(skip(state), name = "api_get_cache_stats")]
pub async fn get_cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let snapshot = state.cache.stats();

    debug!(
        entries = snapshot.entries,
        hits = snapshot.hits,
        misses = snapshot.misses,
        "Cache statistics retrieved"
    );

    Json(CacheStatsResponse::from(snapshot))
}

#[instrument(skip(state), name = "api_clear_cache")]
pub async fn clear_cache(State(state): State<AppState>) -> Json<CacheClearResponse> {
    let dropped = state.cache.len();
    state.cache.clear();

    info!(dropped, "Cache cleared");

    Json(CacheClearResponse { cleared: true })
}
