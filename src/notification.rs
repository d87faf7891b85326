//! Inbound notification decoding -- unwraps the doubly-encoded envelope.
//!
//! The queueing layer delivers an outer structured payload whose `body` field
//! is itself a JSON string; that body carries a topic envelope whose `Message`
//! field is another JSON string holding the actual job notification. Each
//! layer is decoded independently so a failure names the layer that broke.

use serde::Deserialize;

use crate::error::DecodeError;
use crate::types::JobNotification;

/// Outer structured payload as delivered by the queueing layer
#[derive(Deserialize)]
struct OuterPayload {
    body: String,
}

/// Topic envelope carried inside the outer payload's body
#[derive(Deserialize)]
struct TopicEnvelope {
    #[serde(rename = "Message")]
    message: String,
}

/// Decode one inbound message's raw payload into a typed notification.
///
/// Pure function; unknown fields at every layer are ignored (the publisher
/// attaches metadata this consumer does not use).
pub fn decode_notification(payload: &str) -> Result<JobNotification, DecodeError> {
    let outer: OuterPayload =
        serde_json::from_str(payload).map_err(DecodeError::OuterPayload)?;
    let envelope: TopicEnvelope =
        serde_json::from_str(&outer.body).map_err(DecodeError::BodyEnvelope)?;
    serde_json::from_str(&envelope.message).map_err(DecodeError::Notification)
}
