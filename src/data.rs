use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::types::{GroupId, QuestionId, TopicId};

/// Ordinal difficulty level attached to every question.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Immutable unit of assessable content produced by a QuestionSource.
///
/// Questions are authored offline and never mutated at sampling time; the
/// sampler only reads them through a `QuestionPool`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    /// Stable question identifier (used for duplicate suppression and determinism).
    pub id: QuestionId,
    /// Primary stratification group (exactly one per question; cross-listing
    /// for display must not appear here or it would double-count allocations).
    pub group: GroupId,
    /// Optional finer-grained topic within the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<TopicId>,
    /// Question prompt shown to the candidate.
    pub prompt: String,
    /// Ordered answer options (at least two).
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_option: usize,
    /// Optional explanation shown during review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Ordinal difficulty used for filtered practice sessions.
    pub difficulty: Difficulty,
    /// Canonical authoring time for the question.
    pub authored_at: DateTime<Utc>,
    /// Last update time (used by upstream refresh decisions, not by sampling).
    pub updated_at: DateTime<Utc>,
}

/// A named stratification bucket (a certification domain/section).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    /// Stable group identifier.
    pub id: GroupId,
    /// Human-readable name shown in breakdowns and UIs.
    pub display_name: String,
    /// Target share of a full exam, in percent. Weights across a composition
    /// sum to 100; implicit groups discovered from stray questions carry 0.
    pub target_weight_percent: f64,
}

/// Statically-typed filter a data-access layer can translate into its own
/// query language. Replaces ad hoc nested where-clause objects.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuestionFilter {
    /// Restrict candidates to these groups; `None` means all groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupId>>,
    /// Restrict candidates to an exact difficulty level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl QuestionFilter {
    /// True when `question` passes the non-group parts of the filter.
    pub fn matches(&self, question: &Question) -> bool {
        self.difficulty
            .map(|level| question.difficulty == level)
            .unwrap_or(true)
    }
}

/// Which groups a sampling request may draw from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupScope {
    /// Draw from every configured group.
    All,
    /// Draw only from the listed groups.
    Groups(Vec<GroupId>),
}

/// How per-group target shares are derived for a request.
#[derive(Clone, Debug)]
pub enum Weighting {
    /// Use the weights configured on the pool's groups, renormalized over
    /// the request scope.
    Composition,
    /// Weight every group in scope equally.
    Equal,
    /// Caller-supplied weights in percent; must sum to 100 and cover every
    /// group in scope. Under `GroupScope::All` that includes implicit
    /// zero-weight groups the pool created for stray questions, so explicit
    /// weights pair best with a `GroupScope::Groups` restriction naming the
    /// groups being weighted.
    Explicit(Vec<(GroupId, f64)>),
}

/// Transient per-call sampling request.
#[derive(Clone, Debug)]
pub struct SamplingRequest {
    /// Number of questions the quiz should contain. Must be positive.
    pub total_requested: usize,
    /// Group restriction for the draw.
    pub scope: GroupScope,
    /// Optional exact-difficulty restriction.
    pub difficulty: Option<Difficulty>,
    /// Weighting scheme for per-group allocation.
    pub weighting: Weighting,
}

impl SamplingRequest {
    /// Request `total` questions across all groups with composition weights.
    pub fn across_all(total: usize) -> Self {
        Self {
            total_requested: total,
            scope: GroupScope::All,
            difficulty: None,
            weighting: Weighting::Composition,
        }
    }
}

/// Per-group allocated-vs-drawn counts reported alongside a result.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupBreakdown {
    /// Group the counts apply to.
    pub group: GroupId,
    /// Units the allocation step assigned to this group.
    pub allocated: usize,
    /// Questions actually drawn from this group (including shortfall redraws).
    pub drawn: usize,
}

/// Ordered selection produced by one sampling call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SamplingResult {
    /// Final order-randomized selection, free of duplicate ids.
    pub questions: Vec<Question>,
    /// Per-group transparency breakdown, in stable group order.
    pub breakdown: Vec<GroupBreakdown>,
    /// True when supply fell short of `total_requested` and the result is
    /// a best-effort subset rather than a full quiz.
    pub partial_supply: bool,
}

impl SamplingResult {
    /// Number of questions selected.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Drawn count for `group`, zero when the group does not appear.
    pub fn drawn_in(&self, group: &str) -> usize {
        self.breakdown
            .iter()
            .find(|entry| entry.group == group)
            .map(|entry| entry.drawn)
            .unwrap_or(0)
    }
}
