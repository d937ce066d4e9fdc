//! Read-only, in-memory view over the available question inventory.
//!
//! Ownership model:
//! - `QuestionPool` indexes questions by their primary group and is treated
//!   as immutable for the lifetime of a sampling session.
//! - The sampler borrows the pool; all mutable working state lives inside a
//!   single sampling call.

use indexmap::IndexMap;
use tracing::warn;

use crate::constants::pool::{MIN_OPTIONS, SKIP_DUPLICATE_MSG, SKIP_MALFORMED_MSG};
use crate::data::{Group, Question, QuestionFilter};
use crate::source::QuestionFeed;
use crate::types::GroupId;

/// One group's configuration plus its member questions.
#[derive(Clone, Debug)]
struct GroupEntry {
    group: Group,
    questions: Vec<Question>,
}

/// Immutable index of the question inventory, grouped by primary group.
///
/// Group iteration order is stable (configured groups first, in feed order,
/// then implicit groups in discovery order); the sampler relies on this for
/// deterministic tie-breaking.
#[derive(Clone, Debug, Default)]
pub struct QuestionPool {
    groups: IndexMap<GroupId, GroupEntry>,
}

impl QuestionPool {
    /// Build a pool from a loaded feed, skipping malformed records.
    ///
    /// A record is malformed when it has fewer than two options or its
    /// correct-option index is out of range. Questions tagged with a group
    /// the feed does not configure get an implicit zero-weight group so
    /// they remain reachable under equal weighting.
    pub fn from_feed(feed: QuestionFeed) -> Self {
        let mut groups: IndexMap<GroupId, GroupEntry> = IndexMap::new();
        for group in feed.groups {
            groups.entry(group.id.clone()).or_insert(GroupEntry {
                group,
                questions: Vec::new(),
            });
        }
        let mut seen_ids = std::collections::HashSet::new();
        for question in feed.questions {
            if question.options.len() < MIN_OPTIONS
                || question.correct_option >= question.options.len()
            {
                warn!(question_id = %question.id, "{SKIP_MALFORMED_MSG}");
                continue;
            }
            if !seen_ids.insert(question.id.clone()) {
                warn!(question_id = %question.id, "{SKIP_DUPLICATE_MSG}");
                continue;
            }
            let entry = groups
                .entry(question.group.clone())
                .or_insert_with(|| GroupEntry {
                    group: Group {
                        id: question.group.clone(),
                        display_name: question.group.clone(),
                        target_weight_percent: 0.0,
                    },
                    questions: Vec::new(),
                });
            entry.questions.push(question);
        }
        Self { groups }
    }

    /// All questions tagged to `group_id`; empty when the group has none or
    /// is not configured (unknown ids are an error only at the sampler
    /// boundary, where the request names them explicitly).
    pub fn questions_in_group(&self, group_id: &str) -> &[Question] {
        self.groups
            .get(group_id)
            .map(|entry| entry.questions.as_slice())
            .unwrap_or(&[])
    }

    /// True when the pool knows `group_id`.
    pub fn contains_group(&self, group_id: &str) -> bool {
        self.groups.contains_key(group_id)
    }

    /// Count of available questions, optionally scoped to one group.
    pub fn total_available(&self, group_id: Option<&str>) -> usize {
        match group_id {
            Some(group_id) => self.questions_in_group(group_id).len(),
            None => self
                .groups
                .values()
                .map(|entry| entry.questions.len())
                .sum(),
        }
    }

    /// Configured groups in stable, caller-visible order.
    pub fn all_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values().map(|entry| &entry.group)
    }

    /// Group metadata for `group_id`.
    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.get(group_id).map(|entry| &entry.group)
    }

    /// Questions in `group_id` that pass `filter`, in pool order.
    pub fn matching_in_group<'a>(
        &'a self,
        group_id: &str,
        filter: &QuestionFilter,
    ) -> Vec<&'a Question> {
        self.questions_in_group(group_id)
            .iter()
            .filter(|question| filter.matches(question))
            .collect()
    }

    /// Count of questions matching `filter` across its group scope.
    pub fn total_matching(&self, filter: &QuestionFilter) -> usize {
        match &filter.groups {
            Some(group_ids) => group_ids
                .iter()
                .map(|group_id| self.matching_in_group(group_id, filter).len())
                .sum(),
            None => self
                .groups
                .keys()
                .map(|group_id| self.matching_in_group(group_id, filter).len())
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::fixtures::{PRIMARY_GROUP_ID, SECONDARY_GROUP_ID};
    use crate::data::Difficulty;
    use crate::utils::{make_group, make_question};

    fn small_feed() -> QuestionFeed {
        QuestionFeed {
            groups: vec![
                make_group(PRIMARY_GROUP_ID, 60.0),
                make_group(SECONDARY_GROUP_ID, 40.0),
            ],
            questions: vec![
                make_question(PRIMARY_GROUP_ID, "q1", Difficulty::Easy),
                make_question(PRIMARY_GROUP_ID, "q2", Difficulty::Hard),
                make_question(SECONDARY_GROUP_ID, "q3", Difficulty::Medium),
            ],
        }
    }

    #[test]
    fn pool_groups_questions_by_primary_group() {
        let pool = QuestionPool::from_feed(small_feed());
        assert_eq!(pool.total_available(None), 3);
        assert_eq!(pool.total_available(Some(PRIMARY_GROUP_ID)), 2);
        assert!(pool.questions_in_group("missing").is_empty());
        let order: Vec<&str> = pool.all_groups().map(|group| group.id.as_str()).collect();
        assert_eq!(order, vec![PRIMARY_GROUP_ID, SECONDARY_GROUP_ID]);
    }

    #[test]
    fn pool_reads_are_idempotent() {
        let pool = QuestionPool::from_feed(small_feed());
        let first: Vec<String> = pool
            .questions_in_group(PRIMARY_GROUP_ID)
            .iter()
            .map(|question| question.id.clone())
            .collect();
        let second: Vec<String> = pool
            .questions_in_group(PRIMARY_GROUP_ID)
            .iter()
            .map(|question| question.id.clone())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn pool_skips_malformed_and_duplicate_records() {
        let mut feed = small_feed();
        let mut truncated = make_question(PRIMARY_GROUP_ID, "broken", Difficulty::Easy);
        truncated.options.truncate(1);
        let mut bad_index = make_question(PRIMARY_GROUP_ID, "bad_index", Difficulty::Easy);
        bad_index.correct_option = bad_index.options.len();
        let duplicate = make_question(PRIMARY_GROUP_ID, "q1", Difficulty::Easy);
        feed.questions.extend([truncated, bad_index, duplicate]);

        let pool = QuestionPool::from_feed(feed);
        assert_eq!(pool.total_available(Some(PRIMARY_GROUP_ID)), 2);
    }

    #[test]
    fn pool_creates_implicit_groups_for_stray_questions() {
        let mut feed = small_feed();
        feed.questions
            .push(make_question("uncatalogued", "q9", Difficulty::Easy));
        let pool = QuestionPool::from_feed(feed);
        assert!(pool.contains_group("uncatalogued"));
        let group = pool.group("uncatalogued").unwrap();
        assert_eq!(group.target_weight_percent, 0.0);
    }

    #[test]
    fn filter_restricts_by_difficulty() {
        let pool = QuestionPool::from_feed(small_feed());
        let filter = QuestionFilter {
            groups: None,
            difficulty: Some(Difficulty::Hard),
        };
        assert_eq!(pool.total_matching(&filter), 1);
        let scoped = QuestionFilter {
            groups: Some(vec![SECONDARY_GROUP_ID.to_string()]),
            difficulty: Some(Difficulty::Hard),
        };
        assert_eq!(pool.total_matching(&scoped), 0);
    }
}
