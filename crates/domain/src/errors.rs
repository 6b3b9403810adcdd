use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout from {server}")]
    QueryTimeout { server: String },

    #[error("Transport error from {server}: {detail}")]
    Transport { server: String, detail: String },
}

impl DomainError {
    /// Input errors are the caller's fault and the only failures that leave
    /// the trace channel and surface as hard errors.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidDomainName(_) | DomainError::UnsupportedRecordType(_)
        )
    }
}
