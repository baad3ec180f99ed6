pub mod udp;

pub use udp::{DatagramSession, SocketUdpSession};
