//! tunrelay Infrastructure Layer
pub mod dns;
pub mod session;
