//! DNS wire codec
//!
//! Thin wrapper over `hickory-proto` that maps its errors into the domain
//! error type. The relay only decodes far enough to route and log; messages
//! are otherwise passed through untouched.

use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use tunrelay_domain::DomainError;

/// Decode one RFC 1035 message from wire format
pub fn decode_message(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes)
        .map_err(|e| DomainError::InvalidDnsMessage(format!("Failed to parse DNS message: {}", e)))
}

/// Encode a message to wire format
pub fn encode_message(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}

/// Name of the first question, if any
pub fn first_question_name(message: &Message) -> Option<String> {
    message.queries().first().map(|q| q.name().to_utf8())
}
