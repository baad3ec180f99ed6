use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_UPSTREAM_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53);
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_READ_BUFFER_SIZE: usize = 2048;

/// Settings of the UDP-to-TCP DNS relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Upstream resolver reached over TCP, as `ip:port`.
    #[serde(default = "default_upstream")]
    pub upstream: String,

    /// Bound on the whole upstream exchange (connect, write and read), in
    /// seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Largest query datagram read from a client.
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream: default_upstream(),
            query_timeout: default_query_timeout(),
            read_buffer_size: default_read_buffer_size(),
        }
    }
}

impl RelayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }
}

fn default_upstream() -> String {
    DEFAULT_UPSTREAM_ADDR.to_string()
}

fn default_query_timeout() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

fn default_read_buffer_size() -> usize {
    DEFAULT_READ_BUFFER_SIZE
}
