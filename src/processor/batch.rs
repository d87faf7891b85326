//! Batch coordination -- drives the pipeline per inbound message and isolates
//! failures so one bad notification never blocks or loses another.

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, UpstreamError};
use crate::notification::decode_notification;
use crate::types::{Artifact, BatchOutcome, Event, InboundMessage, JobNotification, JobStatus};

use super::Processor;
use super::artifact::derive_artifact_key;
use super::extract::extract_document;
use super::pagination::ResultPaginator;

/// Terminal outcome of one successfully processed message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageOutcome {
    /// The job did not succeed; recognized terminal outcome, no artifact
    Skipped {
        /// Non-success terminal state the notification carried
        status: JobStatus,
    },

    /// A text artifact was written for the job
    Written {
        /// Object key the artifact was written under
        key: String,
        /// Number of text lines in the artifact body
        lines: usize,
    },
}

impl Processor {
    /// Process a batch of inbound messages, reporting failed identifiers.
    ///
    /// Every message is processed independently; identifiers of failed
    /// messages are returned for redelivery while all others are implicitly
    /// acknowledged. Messages run concurrently up to
    /// `max_concurrent_messages`; they share no mutable state, so no
    /// ordering holds between them.
    pub async fn process_batch(&self, messages: Vec<InboundMessage>) -> BatchOutcome {
        self.process_batch_with_cancellation(messages, &CancellationToken::new())
            .await
    }

    /// [`process_batch`](Self::process_batch) under the host invocation's
    /// deadline. Cancellation fails the in-flight messages; redelivering
    /// them is safe because artifact writes are idempotent.
    pub async fn process_batch_with_cancellation(
        &self,
        messages: Vec<InboundMessage>,
        cancel: &CancellationToken,
    ) -> BatchOutcome {
        let concurrency = self.config.max_concurrent_messages.max(1);

        let outcomes = futures::stream::iter(messages.into_iter().map(|message| async move {
            let outcome = self.process_message(&message, cancel).await;
            (message.id, outcome)
        }))
        .buffered(concurrency)
        .collect::<Vec<_>>()
        .await;

        let mut failed = Vec::new();
        for (message_id, outcome) in outcomes {
            match outcome {
                Ok(MessageOutcome::Skipped { .. }) | Ok(MessageOutcome::Written { .. }) => {}
                Err(e) => {
                    tracing::warn!(
                        message_id = %message_id,
                        error = %e,
                        retryable = e.is_retryable(),
                        "message processing failed"
                    );
                    self.event_tx
                        .send(Event::MessageFailed {
                            message_id: message_id.clone(),
                            error: e.to_string(),
                        })
                        .ok();
                    failed.push(message_id);
                }
            }
        }

        BatchOutcome { failed }
    }

    /// Process one inbound message through the full pipeline.
    ///
    /// Decodes the notification, short-circuits non-success terminal states
    /// to [`MessageOutcome::Skipped`], and otherwise paginates, merges,
    /// extracts, and writes the text artifact.
    pub async fn process_message(
        &self,
        message: &InboundMessage,
        cancel: &CancellationToken,
    ) -> Result<MessageOutcome> {
        let notification = decode_notification(&message.payload)?;

        if !notification.status.is_success() {
            tracing::info!(
                job_id = %notification.job_id,
                status = %notification.status,
                "job did not succeed, no artifact to produce"
            );
            self.event_tx
                .send(Event::JobSkipped {
                    job_id: notification.job_id.clone(),
                    status: notification.status,
                })
                .ok();
            return Ok(MessageOutcome::Skipped {
                status: notification.status,
            });
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(UpstreamError::Cancelled.into()),
            outcome = self.write_job_artifact(&notification) => outcome,
        }
    }

    /// Fetch, merge, extract, and write -- one atomic unit of outcome.
    /// Nothing is persisted unless every step before the put completed.
    async fn write_job_artifact(&self, notification: &JobNotification) -> Result<MessageOutcome> {
        let paginator = ResultPaginator::new(
            self.detection.as_ref(),
            &notification.job_id,
            self.config.max_result_pages,
        );
        let blocks = paginator.collect_blocks().await?;

        let document = extract_document(&blocks);
        let lines = document.line_count();
        let artifact = Artifact {
            key: derive_artifact_key(
                &notification.document_location.object_name,
                &notification.job_id,
            ),
            body: document.to_text(),
        };

        tracing::info!(job_id = %notification.job_id, key = %artifact.key, lines, "writing text artifact");
        self.store
            .put(
                &self.config.output_bucket,
                &artifact.key,
                artifact.body.as_bytes(),
            )
            .await?;

        self.event_tx
            .send(Event::ArtifactWritten {
                job_id: notification.job_id.clone(),
                key: artifact.key.clone(),
                lines,
            })
            .ok();

        Ok(MessageOutcome::Written {
            key: artifact.key,
            lines,
        })
    }
}
