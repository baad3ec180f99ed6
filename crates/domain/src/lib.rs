//! tunrelay Domain Layer
pub mod config;
pub mod errors;
pub mod multicast;

pub use config::{
    CliOverrides, Config, ConfigError, RelayConfig, DEFAULT_QUERY_TIMEOUT_SECS,
    DEFAULT_READ_BUFFER_SIZE, DEFAULT_UPSTREAM_ADDR,
};
pub use errors::{DomainError, SessionError};
pub use multicast::{parse_multicast_groups, MulticastAddr};
