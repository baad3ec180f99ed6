//! DNS over TCP upstream (RFC 1035 §4.2.2)
//!
//! Every exchange opens its own connection, writes one length-prefixed
//! query, reads one length-prefixed response and drops the stream. Connect,
//! write and read share a single deadline set by the configured timeout.

use async_trait::async_trait;
use hickory_proto::op::Message;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Instant};
use tracing::debug;
use tunrelay_application::ports::UpstreamResolver;
use tunrelay_application::services::dns_codec::{decode_message, encode_message};
use tunrelay_domain::{
    DomainError, RelayConfig, DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_UPSTREAM_ADDR,
};

const MAX_TCP_MESSAGE_SIZE: usize = 65535;

pub struct TcpUpstreamResolver {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl Default for TcpUpstreamResolver {
    fn default() -> Self {
        Self::new(
            DEFAULT_UPSTREAM_ADDR,
            Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
        )
    }
}

impl TcpUpstreamResolver {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, DomainError> {
        let server_addr = config.upstream.parse().map_err(|_| {
            DomainError::ConfigError(format!(
                "Upstream '{}' is not an ip:port address",
                config.upstream
            ))
        })?;
        Ok(Self::new(server_addr, config.timeout()))
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn connect(&self, deadline: Instant) -> Result<TcpStream, DomainError> {
        let stream = timeout_at(deadline, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error(e))?;

        stream.set_nodelay(true).map_err(|e| self.io_error(e))?;

        Ok(stream)
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    fn io_error(&self, e: io::Error) -> DomainError {
        let server = self.server_addr.to_string();
        match e.kind() {
            io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused { server },
            io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
                DomainError::TransportConnectionReset { server }
            }
            _ => DomainError::TransportIo {
                server,
                detail: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl UpstreamResolver for TcpUpstreamResolver {
    async fn exchange(&self, query: &Message) -> Result<Message, DomainError> {
        let message_bytes = encode_message(query)?;
        if message_bytes.len() > MAX_TCP_MESSAGE_SIZE {
            return Err(DomainError::MessageTooLarge(message_bytes.len()));
        }

        let deadline = Instant::now() + self.timeout;
        let mut stream = self.connect(deadline).await?;

        timeout_at(deadline, send_with_length_prefix(&mut stream, &message_bytes))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error(e))?;

        debug!(
            server = %self.server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

        let response_bytes = timeout_at(deadline, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error(e))?
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| DomainError::EmptyResponse {
                server: self.server_addr.to_string(),
            })?;

        debug!(
            server = %self.server_addr,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        let response = decode_message(&response_bytes)?;
        if response.id() != query.id() {
            return Err(DomainError::InvalidDnsMessage(format!(
                "Response id {} does not match query id {}",
                response.id(),
                query.id()
            )));
        }

        Ok(response)
    }

    fn server(&self) -> String {
        self.server_addr.to_string()
    }
}

pub async fn send_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "DNS message exceeds 65535 bytes"))?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

/// Read one length-prefixed frame. `Ok(None)` means the peer closed the
/// connection before sending a complete length prefix.
pub async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Option<Vec<u8>>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    match stream.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let response_len = u16::from_be_bytes(len_buf) as usize;
    let mut response = vec![0u8; response_len];
    stream.read_exact(&mut response).await?;

    Ok(Some(response))
}
