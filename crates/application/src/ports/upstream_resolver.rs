use async_trait::async_trait;
use hickory_proto::op::Message;
use tunrelay_domain::DomainError;

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Send `query` upstream and return the decoded response unmodified.
    async fn exchange(&self, query: &Message) -> Result<Message, DomainError>;

    /// Upstream identity for logs.
    fn server(&self) -> String;
}
