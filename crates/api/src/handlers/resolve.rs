use crate::{
    dto::{ResolveParams, ResolveResponse},
    errors::ApiError,
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use tracewalk_domain::{Query as TraceQuery, RecordType};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_resolve")]
pub async fn resolve(
    State(state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<ResolveResponse>, ApiError> {
    debug!(name = %params.name, record_type = %params.record_type, cache = %params.cache, "Resolve requested");

    let record_type: RecordType = params.record_type.parse()?;
    let query = TraceQuery::new(&params.name, record_type)?;

    let report = state.resolve.execute(query, params.use_cache()).await?;

    debug!(
        hops = report.summary.hops,
        total_ms = report.summary.total_ms,
        "Resolve completed"
    );

    Ok(Json(ResolveResponse::from(report)))
}
