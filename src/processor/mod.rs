//! Core processing pipeline -- decomposed into focused submodules:
//! - [`pagination`] - token-chained result fetching and block accumulation
//! - [`extract`] - page/line reconstruction and text flattening
//! - [`artifact`] - deterministic output-key derivation
//! - [`batch`] - per-message coordination and failure isolation

mod artifact;
mod batch;
mod extract;
mod pagination;


pub use artifact::derive_artifact_key;
pub use batch::MessageOutcome;
pub use extract::{DocumentPage, ExtractedDocument, extract_document};
pub use pagination::{ResultPaginator, append_page};

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::clients::{ArtifactStore, TextDetectionClient};
use crate::config::Config;
use crate::error::Result;
use crate::types::Event;

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// The batch coordinator: owns the injected service clients and drives the
/// decode / paginate / merge / extract / write pipeline per inbound message.
///
/// Clients are stateless handles shared across messages; the processor holds
/// no per-message state, so one instance serves any number of batches.
pub struct Processor {
    pub(crate) detection: Arc<dyn TextDetectionClient>,
    pub(crate) store: Arc<dyn ArtifactStore>,
    pub(crate) config: Arc<Config>,
    pub(crate) event_tx: broadcast::Sender<Event>,
}

impl Processor {
    /// Create a processor from validated configuration and injected clients
    pub fn new(
        config: Config,
        detection: Arc<dyn TextDetectionClient>,
        store: Arc<dyn ArtifactStore>,
    ) -> Result<Self> {
        config.validate()?;
        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            detection,
            store,
            config: Arc::new(config),
            event_tx,
        })
    }

    /// Subscribe to processing events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// The processor's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
