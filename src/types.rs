//! Core types for textsink

use serde::{Deserialize, Serialize};

/// Unique identifier for one asynchronous OCR job
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new JobId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier assigned to one inbound message by the queueing layer.
///
/// Failed identifiers are handed back to the batch framework for redelivery;
/// the crate never interprets their contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    /// Create a new MessageId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal state reported for an OCR job
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    /// Job completed and results are available
    Succeeded,
    /// Job failed inside the recognition service
    Failed,
    /// Job errored before recognition could run
    Error,
}

impl JobStatus {
    /// Whether this is the success terminal state
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Succeeded)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// Location of the source document the job was started for
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLocation {
    /// Object name of the source document (drives artifact key derivation)
    #[serde(rename = "S3ObjectName")]
    pub object_name: String,

    /// Bucket the source document lives in
    #[serde(rename = "S3Bucket")]
    pub bucket: String,
}

/// Decoded job-completion notification, scoped to one processing attempt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobNotification {
    /// Identifier of the completed job
    #[serde(rename = "JobId")]
    pub job_id: JobId,

    /// Terminal state the job reached
    #[serde(rename = "Status")]
    pub status: JobStatus,

    /// Source document location
    #[serde(rename = "DocumentLocation")]
    pub document_location: DocumentLocation,
}

/// Type tag of a recognition block
///
/// The recognition service may introduce new block types at any time; anything
/// this crate does not know about decodes as [`BlockType::Other`] and is
/// ignored by the extractor rather than treated as an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockType {
    /// One logical page of the source document
    Page,
    /// One ordered text line within a page
    Line,
    /// One word within a line
    Word,
    /// Any block type this crate does not interpret
    #[default]
    #[serde(other)]
    Other,
}

/// Atomic unit of recognition output
///
/// Blocks form a containment tree (document, pages, lines, words) expressed
/// through `child_ids` references into the same flat collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique block identifier within the job's result
    #[serde(rename = "Id")]
    pub id: String,

    /// Block type tag
    #[serde(rename = "BlockType")]
    pub block_type: BlockType,

    /// Recognized text, when the block carries any
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Identifiers of contained child blocks, in reading order
    #[serde(rename = "ChildIds", default, skip_serializing_if = "Vec::is_empty")]
    pub child_ids: Vec<String>,

    /// Positional payload, carried through untouched
    #[serde(rename = "Geometry", default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<serde_json::Value>,
}

/// One page of a job's recognition result, as returned by a single fetch
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Job status as reported alongside this page
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub job_status: Option<JobStatus>,

    /// Blocks carried by this page, in service order
    #[serde(rename = "Blocks", default)]
    pub blocks: Vec<Block>,

    /// Token for the next page; absent on the final page
    #[serde(
        rename = "ContinuationToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub continuation_token: Option<String>,
}

/// Persisted plain-text output for one job
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Object key the body is written under
    pub key: String,
    /// UTF-8 text body
    pub body: String,
}

/// One raw inbound message as delivered by the batch framework
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundMessage {
    /// Queueing-layer identifier, echoed back on failure
    pub id: MessageId,
    /// Raw doubly-encoded payload
    pub payload: String,
}

impl InboundMessage {
    /// Create a new inbound message
    pub fn new(id: impl Into<MessageId>, payload: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
        }
    }
}

/// Outcome of processing one batch of inbound messages
///
/// Only failures are listed; every other message is implicitly acknowledged
/// by the batch framework.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Identifiers of messages whose processing failed, for redelivery
    pub failed: Vec<MessageId>,
}

impl BatchOutcome {
    /// Whether every message in the batch was processed successfully
    pub fn is_fully_successful(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Event emitted during message processing
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A notification reported a non-success terminal state; no artifact produced
    JobSkipped {
        /// Job the notification was for
        job_id: JobId,
        /// Terminal state the job reached
        status: JobStatus,
    },

    /// A text artifact was written for a succeeded job
    ArtifactWritten {
        /// Job the artifact belongs to
        job_id: JobId,
        /// Object key the artifact was written under
        key: String,
        /// Number of text lines in the artifact body
        lines: usize,
    },

    /// A message's processing failed and its identifier was reported back
    MessageFailed {
        /// Identifier of the failed message
        message_id: MessageId,
        /// Rendered error that ended processing
        error: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn job_status_deserializes_wire_values() {
        assert_eq!(
            serde_json::from_str::<JobStatus>("\"SUCCEEDED\"").unwrap(),
            JobStatus::Succeeded
        );
        assert_eq!(
            serde_json::from_str::<JobStatus>("\"FAILED\"").unwrap(),
            JobStatus::Failed
        );
        assert_eq!(
            serde_json::from_str::<JobStatus>("\"ERROR\"").unwrap(),
            JobStatus::Error
        );
    }

    #[test]
    fn job_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<JobStatus>("\"PARTIAL\"").is_err());
    }

    #[test]
    fn unknown_block_type_decodes_as_other() {
        let block: Block =
            serde_json::from_str(r#"{"Id": "b1", "BlockType": "SELECTION_ELEMENT", "Text": "x"}"#)
                .unwrap();
        assert_eq!(block.block_type, BlockType::Other);
    }

    #[test]
    fn block_defaults_optional_fields() {
        let block: Block = serde_json::from_str(r#"{"Id": "b1", "BlockType": "PAGE"}"#).unwrap();
        assert!(block.text.is_none());
        assert!(block.child_ids.is_empty());
        assert!(block.geometry.is_none());
    }

    #[test]
    fn result_page_defaults_to_empty() {
        let page: ResultPage = serde_json::from_str("{}").unwrap();
        assert!(page.blocks.is_empty());
        assert!(page.continuation_token.is_none());
        assert!(page.job_status.is_none());
    }

    #[test]
    fn geometry_is_carried_through_opaquely() {
        let raw = r#"{"Id": "b1", "BlockType": "PAGE", "Geometry": {"BoundingBox": {"Top": 0.1}}}"#;
        let block: Block = serde_json::from_str(raw).unwrap();
        let geometry = block.geometry.unwrap();
        assert_eq!(geometry["BoundingBox"]["Top"], 0.1);
    }
}
