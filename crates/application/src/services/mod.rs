pub mod dns_codec;
pub mod dns_interceptor;

pub use dns_interceptor::{is_dns_destination, DnsInterceptor, DNS_PORT};
