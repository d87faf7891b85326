//! # textsink
//!
//! Backend library for the consumer stage of an asynchronous document OCR
//! pipeline: it decodes job-completion notifications, pages through each
//! job's recognition result, reconstructs the document's page/line structure,
//! and persists the flattened text as an artifact.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or server; the crate is embedded by a
//!   queue-consumption host that delivers batches and acknowledges messages
//! - **Failure isolation** - Every message in a batch is processed
//!   independently; only failed identifiers are reported back for redelivery
//! - **Idempotent by construction** - Artifact keys are a pure function of
//!   the notification and writes overwrite unconditionally, so redelivery is
//!   always safe
//! - **Injected clients** - The recognition service and the artifact store
//!   are trait objects handed to the processor; no process-wide client state
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use textsink::{
//!     Config, FsArtifactStore, HttpTextDetectionClient, InboundMessage, Processor,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let detection = Arc::new(HttpTextDetectionClient::new(
//!         "https://ocr.example.com/results".parse()?,
//!     ));
//!     let store = Arc::new(FsArtifactStore::new("./artifacts"));
//!     let processor =
//!         Processor::new(Config::for_output_bucket("output-bucket"), detection, store)?;
//!
//!     // Subscribe to processing events
//!     let mut events = processor.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     // Hand over one delivered batch; failed identifiers go back to the queue
//!     let batch = vec![InboundMessage::new("message-1", r#"{"body": "..."}"#)];
//!     let outcome = processor.process_batch(batch).await;
//!     println!("failed: {:?}", outcome.failed);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Client interfaces for the recognition service and the artifact store
pub mod clients;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Inbound notification decoding
pub mod notification;
/// Core processing pipeline (decomposed into focused submodules)
pub mod processor;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use clients::{
    ArtifactStore, FsArtifactStore, HttpArtifactStore, HttpTextDetectionClient,
    TextDetectionClient,
};
pub use config::Config;
pub use error::{DecodeError, Error, Result, UpstreamError, WriteError};
pub use notification::decode_notification;
pub use processor::{
    DocumentPage, ExtractedDocument, MessageOutcome, Processor, ResultPaginator, append_page,
    derive_artifact_key, extract_document,
};
pub use types::{
    Artifact, BatchOutcome, Block, BlockType, DocumentLocation, Event, InboundMessage, JobId,
    JobNotification, JobStatus, MessageId, ResultPage,
};
