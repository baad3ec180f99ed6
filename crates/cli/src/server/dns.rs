use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};
use tunrelay_application::services::DnsInterceptor;
use tunrelay_infrastructure::session::DatagramSession;

const RECV_BUFFER_SIZE: usize = 65535;

/// Receive datagrams on `bind_addr` and hand each one to the interceptor as
/// its own single-shot session.
pub async fn start_dns_relay(bind_addr: String, interceptor: DnsInterceptor) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = Arc::new(UdpSocket::bind(socket_addr).await?);

    info!(bind_address = %socket.local_addr()?, "DNS relay ready");

    let mut recv_buf = vec![0u8; RECV_BUFFER_SIZE];

    loop {
        match socket.recv_from(&mut recv_buf).await {
            Ok((n, from)) => {
                debug!(client = %from, len = n, "Datagram intercepted");
                let session = DatagramSession::new(recv_buf[..n].to_vec(), from, socket.clone());
                interceptor.spawn(session);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            // ICMP port-unreachable from an earlier reply surfaces here on some platforms.
            Err(e) if e.kind() == io::ErrorKind::ConnectionReset => continue,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                return Err(e.into());
            }
        }
    }
}
