//! Configuration types for textsink

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Main configuration for the processor
///
/// All knobs except `output_bucket` carry working defaults; the output bucket
/// has no sensible default and must be supplied by the host. Missing or empty
/// values are a startup error surfaced by [`Config::validate`], never a
/// per-message failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Bucket (or store namespace) text artifacts are written to (required)
    #[serde(default)]
    pub output_bucket: String,

    /// Ceiling on result pages fetched per job (default: 1000)
    ///
    /// A service that never stops returning continuation tokens must not cause
    /// unbounded iteration; pagination fails once this many pages have been
    /// fetched and a token is still outstanding. No existing upstream contract
    /// pins the right value, so it stays configurable.
    #[serde(default = "default_max_result_pages")]
    pub max_result_pages: usize,

    /// Maximum messages of one batch processed concurrently (default: 4)
    ///
    /// Messages share no mutable state, so this is purely a resource knob.
    /// Pagination within one message always stays sequential.
    #[serde(default = "default_max_concurrent_messages")]
    pub max_concurrent_messages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_bucket: String::new(),
            max_result_pages: default_max_result_pages(),
            max_concurrent_messages: default_max_concurrent_messages(),
        }
    }
}

impl Config {
    /// Create a configuration for the given output bucket, defaults elsewhere
    pub fn for_output_bucket(output_bucket: impl Into<String>) -> Self {
        Self {
            output_bucket: output_bucket.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<(), Error> {
        if self.output_bucket.trim().is_empty() {
            return Err(Error::Config {
                message: "output bucket must not be empty".to_string(),
                key: Some("output_bucket".to_string()),
            });
        }
        if self.max_result_pages == 0 {
            return Err(Error::Config {
                message: "page ceiling must be at least 1".to_string(),
                key: Some("max_result_pages".to_string()),
            });
        }
        if self.max_concurrent_messages == 0 {
            return Err(Error::Config {
                message: "message concurrency must be at least 1".to_string(),
                key: Some("max_concurrent_messages".to_string()),
            });
        }
        Ok(())
    }
}

fn default_max_result_pages() -> usize {
    1000
}

fn default_max_concurrent_messages() -> usize {
    4
}
