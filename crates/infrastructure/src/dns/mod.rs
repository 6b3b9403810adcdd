pub mod message_builder;
pub mod record_type_map;
pub mod response_parser;
pub mod transport;
pub mod wire_client;
