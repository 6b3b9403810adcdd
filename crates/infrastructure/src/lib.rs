//! Tracewalk Infrastructure Layer
//!
//! Wire DNS adapters (hickory-proto message build/parse, UDP transport) and
//! the TTL cache backing the application ports.
pub mod cache;
pub mod dns;

pub use cache::TtlCache;
pub use dns::wire_client::WireQueryClient;
