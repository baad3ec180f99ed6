mod errors;
mod logging;
mod multicast;
mod relay;
mod root;
mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use multicast::MulticastConfig;
pub use relay::{
    RelayConfig, DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_READ_BUFFER_SIZE, DEFAULT_UPSTREAM_ADDR,
};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
