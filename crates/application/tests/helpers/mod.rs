
pub use dns_messages::*;
pub use mock_sessions::*;
