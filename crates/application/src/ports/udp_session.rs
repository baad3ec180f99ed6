use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;

/// One client's UDP exchange as handed over by the tunnel engine.
///
/// The session is owned by exactly one task for the lifetime of the exchange
/// and is released through [`UdpSession::close`].
#[async_trait]
pub trait UdpSession: Send {
    /// Read one datagram, returning its length and the sender's address.
    async fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)>;

    /// Write one datagram to `target`.
    async fn send_to(&mut self, buf: &[u8], target: SocketAddr) -> io::Result<usize>;

    /// Release the session. Called exactly once by the owning use case.
    fn close(&mut self);
}
