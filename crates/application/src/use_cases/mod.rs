pub mod dns;

pub use dns::{InterceptDnsSessionUseCase, SessionGuard, SessionReport, SessionState};
