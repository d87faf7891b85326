//! Artifact output -- deterministic key derivation for persisted text.

use crate::types::JobId;

/// Derive the artifact key for a processed job.
///
/// The final dot-delimited extension segment of the source object name is
/// removed (a name without one, including a bare dotfile, is used whole),
/// then `-{job_id}.txt` is appended. The key is a pure function of its
/// inputs, so redelivered messages always target the same object.
///
/// `"test.pdf"` + job `123` derives `"test-123.txt"`.
pub fn derive_artifact_key(object_name: &str, job_id: &JobId) -> String {
    let stem = match object_name.rfind('.') {
        Some(0) | None => object_name,
        Some(idx) => &object_name[..idx],
    };
    format!("{stem}-{job_id}.txt")
}
