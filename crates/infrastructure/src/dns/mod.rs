pub mod transport;

pub use transport::tcp::TcpUpstreamResolver;
