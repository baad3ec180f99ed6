//! tokio-backed [`UdpSession`] implementations

use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::trace;
use tunrelay_application::ports::UdpSession;

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "UDP session closed")
}

/// A session that exclusively owns its socket; closing drops the socket.
pub struct SocketUdpSession {
    socket: Option<UdpSocket>,
}

impl SocketUdpSession {
    pub fn new(socket: UdpSocket) -> Self {
        Self {
            socket: Some(socket),
        }
    }

    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        Ok(Self::new(UdpSocket::bind(addr).await?))
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.as_ref().ok_or_else(closed_error)?.local_addr()
    }

    pub fn is_closed(&self) -> bool {
        self.socket.is_none()
    }
}

#[async_trait]
impl UdpSession for SocketUdpSession {
    async fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.socket
            .as_ref()
            .ok_or_else(closed_error)?
            .recv_from(buf)
            .await
    }

    async fn send_to(&mut self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        self.socket
            .as_ref()
            .ok_or_else(closed_error)?
            .send_to(buf, target)
            .await
    }

    fn close(&mut self) {
        if self.socket.take().is_some() {
            trace!("UDP socket session closed");
        }
    }
}

/// One datagram already received on a shared listener socket. The reply goes
/// out through the same socket; closing only detaches this session from it.
pub struct DatagramSession {
    datagram: Option<Vec<u8>>,
    peer: SocketAddr,
    socket: Option<Arc<UdpSocket>>,
}

impl DatagramSession {
    pub fn new(datagram: Vec<u8>, peer: SocketAddr, socket: Arc<UdpSocket>) -> Self {
        Self {
            datagram: Some(datagram),
            peer,
            socket: Some(socket),
        }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn is_closed(&self) -> bool {
        self.socket.is_none()
    }
}

#[async_trait]
impl UdpSession for DatagramSession {
    async fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        if self.socket.is_none() {
            return Err(closed_error());
        }
        let datagram = self.datagram.take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "datagram already consumed")
        })?;

        // Same truncation a recv_from on a short buffer would apply.
        let n = datagram.len().min(buf.len());
        buf[..n].copy_from_slice(&datagram[..n]);
        Ok((n, self.peer))
    }

    async fn send_to(&mut self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        self.socket
            .as_ref()
            .ok_or_else(closed_error)?
            .send_to(buf, target)
            .await
    }

    fn close(&mut self) {
        self.datagram = None;
        if self.socket.take().is_some() {
            trace!(peer = %self.peer, "Datagram session closed");
        }
    }
}
