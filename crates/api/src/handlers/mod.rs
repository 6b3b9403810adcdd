pub mod cache;
pub mod health;
pub mod resolve;

pub use cache::{clear_cache, get_cache_stats};
pub use health::healthz;
pub use resolve::resolve;
