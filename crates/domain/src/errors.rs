use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed address: {0:?}")]
    MalformedAddress(String),

    #[error("Not a multicast address: {0}")]
    NotMulticast(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("DNS message too large: {0} bytes (max 65535)")]
    MessageTooLarge(usize),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Transport I/O error with {server}: {detail}")]
    TransportIo { server: String, detail: String },

    #[error("Empty response from {server}")]
    EmptyResponse { server: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for every failure raised by the upstream transport, including
    /// a resolver that closed the connection without answering.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::TransportTimeout { .. }
                | Self::TransportConnectionRefused { .. }
                | Self::TransportConnectionReset { .. }
                | Self::TransportIo { .. }
                | Self::EmptyResponse { .. }
        )
    }
}

/// Per-session failures of an intercepted DNS exchange. None of these leave
/// the session task; they only end up in the logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Failed to read query datagram: {0}")]
    ReadFailed(String),

    #[error("Failed to decode DNS query: {0}")]
    DecodeFailed(String),

    #[error("DNS query has no question")]
    EmptyQuestion,

    #[error("Upstream resolution failed: {0}")]
    ResolveFailed(#[source] DomainError),

    #[error("Failed to encode DNS response: {0}")]
    EncodeFailed(String),

    #[error("Failed to write response datagram: {0}")]
    WriteFailed(String),
}
