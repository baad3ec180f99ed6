mod udp_session;
mod upstream_resolver;

pub use udp_session::UdpSession;
pub use upstream_resolver::UpstreamResolver;
