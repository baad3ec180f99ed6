use crate::ports::UdpSession;
use crate::use_cases::InterceptDnsSessionUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;
use tunrelay_domain::SessionError;

pub const DNS_PORT: u16 = 53;

/// Whether a UDP flow to `dst` should be served locally instead of being
/// proxied as opaque UDP.
pub fn is_dns_destination(dst: SocketAddr) -> bool {
    dst.port() == DNS_PORT
}

/// Hand-off point between the tunnel engine and the DNS relay: every
/// intercepted session runs in its own task and never reports back.
#[derive(Clone)]
pub struct DnsInterceptor {
    use_case: Arc<InterceptDnsSessionUseCase>,
}

impl DnsInterceptor {
    pub fn new(use_case: Arc<InterceptDnsSessionUseCase>) -> Self {
        Self { use_case }
    }

    pub fn spawn<S>(&self, session: S) -> JoinHandle<()>
    where
        S: UdpSession + 'static,
    {
        let use_case = Arc::clone(&self.use_case);
        tokio::spawn(async move {
            if let Err(e) = use_case.execute(session).await {
                log_session_error(&e);
            }
        })
    }
}

fn log_session_error(error: &SessionError) {
    // Decode and resolve failures are already logged with context by the use case.
    debug!(error = %error, "DNS session closed without reply");
}
