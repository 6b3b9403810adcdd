use std::sync::Arc;
use tracewalk_application::ports::TraceCache;
use tracewalk_application::ResolveTraceUseCase;

#[derive(Clone)]
pub struct AppState {
    pub resolve: Arc<ResolveTraceUseCase>,
    pub cache: Arc<dyn TraceCache>,
}
