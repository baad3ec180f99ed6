pub mod intercept_dns_session;
pub mod session_guard;

pub use intercept_dns_session::{InterceptDnsSessionUseCase, SessionReport, SessionState};
pub use session_guard::SessionGuard;
