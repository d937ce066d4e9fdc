//! Question feed interfaces.
//!
//! A `QuestionSource` is the boundary between the sampler and whatever
//! supplies the inventory: a relational query result materialized into
//! memory, or a pre-serialized snapshot bundle. For a fixed backing
//! dataset, `load` output should be deterministic.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{Group, Question};
use crate::errors::SampleError;
use crate::pool::QuestionPool;
use crate::types::SourceId;

/// Materialized question inventory produced by one `load` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuestionFeed {
    /// Configured groups, in composition order.
    pub groups: Vec<Group>,
    /// Flat question records tagged with their primary group.
    pub questions: Vec<Question>,
}

/// Sampler-facing feed interface.
pub trait QuestionSource: Send + Sync {
    /// Stable source identifier used in errors and logs.
    fn id(&self) -> &str;
    /// Materialize the full inventory this source can provide.
    fn load(&self) -> Result<QuestionFeed, SampleError>;
}

/// In-memory source for tests and small prebuilt datasets.
pub struct InMemorySource {
    id: SourceId,
    feed: Arc<QuestionFeed>,
}

impl InMemorySource {
    /// Create an in-memory source from a prebuilt feed.
    pub fn new(id: impl Into<SourceId>, feed: QuestionFeed) -> Self {
        Self {
            id: id.into(),
            feed: Arc::new(feed),
        }
    }
}

impl QuestionSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<QuestionFeed, SampleError> {
        Ok(self.feed.as_ref().clone())
    }
}

/// Source backed by a pre-serialized JSON snapshot bundle on disk.
///
/// The bundle layout matches `QuestionFeed`; fetching and caching the
/// bundle itself (for example over HTTP) is the caller's concern.
pub struct JsonSnapshotSource {
    id: SourceId,
    path: PathBuf,
}

impl JsonSnapshotSource {
    /// Create a snapshot source reading from `path`.
    pub fn new(id: impl Into<SourceId>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

impl QuestionSource for JsonSnapshotSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<QuestionFeed, SampleError> {
        let raw = fs::read_to_string(&self.path).map_err(|err| SampleError::SourceUnavailable {
            source_id: self.id.clone(),
            reason: err.to_string(),
        })?;
        let feed: QuestionFeed = serde_json::from_str(&raw)?;
        debug!(
            source_id = %self.id,
            groups = feed.groups.len(),
            questions = feed.questions.len(),
            "loaded question snapshot"
        );
        Ok(feed)
    }
}

/// Load every source and build one merged pool.
///
/// Groups keep first-seen configuration; duplicate question ids across
/// sources are dropped during pool construction (first source wins).
pub fn load_pool(sources: &[Box<dyn QuestionSource>]) -> Result<QuestionPool, SampleError> {
    let mut merged = QuestionFeed::default();
    for source in sources {
        let feed = source.load()?;
        merged.groups.extend(feed.groups);
        merged.questions.extend(feed.questions);
    }
    Ok(QuestionPool::from_feed(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::fixtures::PRIMARY_GROUP_ID;
    use crate::data::Difficulty;
    use crate::utils::{make_group, make_question};

    #[test]
    fn in_memory_source_round_trips_its_feed() {
        let feed = QuestionFeed {
            groups: vec![make_group(PRIMARY_GROUP_ID, 100.0)],
            questions: vec![make_question(PRIMARY_GROUP_ID, "q1", Difficulty::Easy)],
        };
        let source = InMemorySource::new("memory", feed);
        let loaded = source.load().unwrap();
        assert_eq!(loaded.questions.len(), 1);
        assert_eq!(source.id(), "memory");
    }

    #[test]
    fn load_pool_merges_sources_with_first_id_winning() {
        let first = InMemorySource::new(
            "first",
            QuestionFeed {
                groups: vec![make_group(PRIMARY_GROUP_ID, 100.0)],
                questions: vec![make_question(PRIMARY_GROUP_ID, "q1", Difficulty::Easy)],
            },
        );
        let second = InMemorySource::new(
            "second",
            QuestionFeed {
                groups: Vec::new(),
                questions: vec![
                    make_question(PRIMARY_GROUP_ID, "q1", Difficulty::Hard),
                    make_question(PRIMARY_GROUP_ID, "q2", Difficulty::Hard),
                ],
            },
        );
        let sources: Vec<Box<dyn QuestionSource>> = vec![Box::new(first), Box::new(second)];
        let pool = load_pool(&sources).unwrap();
        assert_eq!(pool.total_available(None), 2);
        let kept = pool
            .questions_in_group(PRIMARY_GROUP_ID)
            .iter()
            .find(|question| question.id.ends_with("::q1"))
            .unwrap();
        assert_eq!(kept.difficulty, Difficulty::Easy);
    }

    #[test]
    fn snapshot_source_reports_missing_files() {
        let source = JsonSnapshotSource::new("missing", "/nonexistent/bundle.json");
        let err = source.load().unwrap_err();
        assert!(matches!(err, SampleError::SourceUnavailable { .. }));
    }
}
