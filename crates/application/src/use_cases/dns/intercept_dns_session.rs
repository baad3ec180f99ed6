use super::session_guard::SessionGuard;
use crate::ports::{UdpSession, UpstreamResolver};
use crate::services::dns_codec::{decode_message, encode_message, first_question_name};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use tunrelay_domain::{SessionError, DEFAULT_READ_BUFFER_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Reading,
    Decoding,
    Resolving,
    Encoding,
    Writing,
    Failed,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Reading => "reading",
            Self::Decoding => "decoding",
            Self::Resolving => "resolving",
            Self::Encoding => "encoding",
            Self::Writing => "writing",
            Self::Failed => "failed",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Outcome of a session that answered its client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub client: SocketAddr,
    pub domain: String,
    pub response_len: usize,
}

/// Serves one intercepted UDP DNS query by re-issuing it over TCP upstream.
///
/// Each call to [`execute`](Self::execute) handles exactly one datagram and
/// then releases the session. Malformed or question-less queries and upstream
/// failures are dropped without a reply.
pub struct InterceptDnsSessionUseCase {
    resolver: Arc<dyn UpstreamResolver>,
    buffer_size: usize,
}

impl InterceptDnsSessionUseCase {
    pub fn new(resolver: Arc<dyn UpstreamResolver>) -> Self {
        Self {
            resolver,
            buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub async fn execute<S: UdpSession>(&self, session: S) -> Result<SessionReport, SessionError> {
        let mut guard = SessionGuard::new(session);
        let mut state = SessionState::Idle;

        let result = self.run(&mut guard, &mut state).await;
        if result.is_err() {
            advance(&mut state, SessionState::Failed);
        }

        guard.release();
        advance(&mut state, SessionState::Closed);
        result
    }

    async fn run<S: UdpSession>(
        &self,
        session: &mut SessionGuard<S>,
        state: &mut SessionState,
    ) -> Result<SessionReport, SessionError> {
        advance(state, SessionState::Reading);
        let mut buf = vec![0u8; self.buffer_size];
        let (len, client) = session
            .recv_from(&mut buf)
            .await
            .map_err(|e| SessionError::ReadFailed(e.to_string()))?;

        advance(state, SessionState::Decoding);
        let query = decode_message(&buf[..len]).map_err(|e| {
            warn!(client = %client, error = %e, "Failed to unpack DNS query");
            SessionError::DecodeFailed(e.to_string())
        })?;

        let domain = first_question_name(&query).ok_or_else(|| {
            debug!(client = %client, id = query.id(), "DNS query without question dropped");
            SessionError::EmptyQuestion
        })?;

        advance(state, SessionState::Resolving);
        info!(domain = %domain, client = %client, upstream = %self.resolver.server(), "DNS query via TCP");

        let response = self.resolver.exchange(&query).await.map_err(|e| {
            warn!(domain = %domain, error = %e, "Failed to resolve via TCP");
            SessionError::ResolveFailed(e)
        })?;

        advance(state, SessionState::Encoding);
        let wire = encode_message(&response).map_err(|e| {
            debug!(domain = %domain, error = %e, "Failed to pack DNS response");
            SessionError::EncodeFailed(e.to_string())
        })?;

        advance(state, SessionState::Writing);
        session.send_to(&wire, client).await.map_err(|e| {
            debug!(domain = %domain, client = %client, error = %e, "Failed to write DNS response");
            SessionError::WriteFailed(e.to_string())
        })?;

        debug!(domain = %domain, client = %client, response_len = wire.len(), "DNS response relayed");

        Ok(SessionReport {
            client,
            domain,
            response_len: wire.len(),
        })
    }
}

fn advance(state: &mut SessionState, next: SessionState) {
    trace!(from = %state, to = %next, "DNS session transition");
    *state = next;
}
