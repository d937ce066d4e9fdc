use std::io;

use thiserror::Error;

use crate::types::{GroupId, SourceId};

/// Error type for sampling requests, pool construction, and snapshot loading.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("invalid sampling request: {0}")]
    InvalidRequest(String),
    #[error("unknown group '{group_id}'")]
    UnknownGroup { group_id: GroupId },
    #[error("no questions available for the requested scope")]
    NoQuestionsAvailable,
    #[error("question source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable { source_id: SourceId, reason: String },
    #[error("composition error: {0}")]
    Composition(String),
    #[error("snapshot decode failure: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
