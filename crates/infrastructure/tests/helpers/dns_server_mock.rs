#![allow(dead_code)]
use super::builders::{MessageBuilder, ANSWER_IP};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::oneshot;
use tunrelay_application::services::dns_codec::{decode_message, encode_message};
use tunrelay_infrastructure::dns::transport::{read_with_length_prefix, send_with_length_prefix};

#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Answer every query with an A record for `ANSWER_IP`.
    Answer,
    /// Read the query, then close without writing anything.
    CloseWithoutAnswer,
    /// Read the query and never answer.
    Silent,
    /// Answer with a zero-length frame.
    ZeroLengthFrame,
    /// Answer with a different message id.
    WrongId,
}

/// DNS-over-TCP server on loopback that counts connections and how many
/// of them the client closed after the exchange.
pub struct MockTcpDnsServer {
    addr: SocketAddr,
    connections: Arc<AtomicUsize>,
    client_closed: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockTcpDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let connections = Arc::new(AtomicUsize::new(0));
        let client_closed = Arc::new(AtomicUsize::new(0));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let conn_counter = connections.clone();
        let closed_counter = client_closed.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = listener.accept() => {
                        if let Ok((stream, _)) = result {
                            conn_counter.fetch_add(1, Ordering::SeqCst);
                            let closed_counter = closed_counter.clone();
                            tokio::spawn(async move {
                                Self::serve(stream, behavior, closed_counter).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            connections,
            client_closed,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn serve(
        mut stream: tokio::net::TcpStream,
        behavior: MockBehavior,
        client_closed: Arc<AtomicUsize>,
    ) {
        let frame = match read_with_length_prefix(&mut stream).await {
            Ok(Some(frame)) => frame,
            _ => return,
        };
        let query = match decode_message(&frame) {
            Ok(query) => query,
            Err(_) => return,
        };

        match behavior {
            MockBehavior::Answer => {
                let response = MessageBuilder::answer(&query, ANSWER_IP);
                let wire = encode_message(&response).unwrap();
                let _ = send_with_length_prefix(&mut stream, &wire).await;
            }
            MockBehavior::CloseWithoutAnswer => return,
            MockBehavior::Silent => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                return;
            }
            MockBehavior::ZeroLengthFrame => {
                let _ = send_with_length_prefix(&mut stream, &[]).await;
            }
            MockBehavior::WrongId => {
                let mut response = MessageBuilder::answer(&query, ANSWER_IP);
                response.set_id(query.id().wrapping_add(1));
                let wire = encode_message(&response).unwrap();
                let _ = send_with_length_prefix(&mut stream, &wire).await;
            }
        }

        // The relay uses one connection per query: the next read must see EOF.
        if let Ok(None) = read_with_length_prefix(&mut stream).await {
            client_closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn client_closed(&self) -> usize {
        self.client_closed.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockTcpDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Loopback server that is slow in two places. Its accept queue is already
/// full when a client dials, so the client's connect stalls until the server
/// starts accepting after `accept_after`. Each query is then answered only
/// after `answer_after`.
pub struct StalledDnsServer {
    addr: SocketAddr,
    _queued: TcpStream,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StalledDnsServer {
    pub async fn start(
        accept_after: Duration,
        answer_after: Duration,
    ) -> Result<Self, std::io::Error> {
        let socket = TcpSocket::new_v4()?;
        socket.bind(SocketAddr::from(([127, 0, 0, 1], 0)))?;
        let listener = socket.listen(0)?;
        let addr = listener.local_addr()?;

        // Takes the only accept queue slot; later SYNs are dropped.
        let queued = TcpStream::connect(addr).await?;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            tokio::select! {
                _ = &mut shutdown_rx => return,
                _ = tokio::time::sleep(accept_after) => {}
            }
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = listener.accept() => {
                        if let Ok((stream, _)) = result {
                            tokio::spawn(Self::serve(stream, answer_after));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            _queued: queued,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn serve(mut stream: TcpStream, answer_after: Duration) {
        let Ok(Some(frame)) = read_with_length_prefix(&mut stream).await else {
            return;
        };
        let Ok(query) = decode_message(&frame) else {
            return;
        };

        tokio::time::sleep(answer_after).await;
        let response = MessageBuilder::answer(&query, ANSWER_IP);
        let wire = encode_message(&response).unwrap();
        let _ = send_with_length_prefix(&mut stream, &wire).await;
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for StalledDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// An address on loopback with nothing listening.
pub async fn unused_tcp_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
