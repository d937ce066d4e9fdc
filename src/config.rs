use serde::{Deserialize, Serialize};

use crate::constants::allocation::{FULL_WEIGHT_PERCENT, WEIGHT_SUM_TOLERANCE};
use crate::data::Group;
use crate::errors::SampleError;
use crate::types::CompositionId;

/// Target distribution for a certification/test: ordered groups with
/// weights, a total question count, and a pass threshold.
///
/// Compositions are configuration data loaded by the surrounding
/// application; the sampler never mutates them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Composition {
    /// Stable composition identifier.
    pub id: CompositionId,
    /// Human-readable certification/test name.
    pub display_name: String,
    /// Ordered groups with target weights summing to 100.
    pub groups: Vec<Group>,
    /// Target question count for a full mock exam.
    pub total_questions: usize,
    /// Percent of correct answers required to pass.
    pub pass_threshold_percent: f64,
}

impl Composition {
    /// Build a composition, enforcing the weight-sum invariant so the
    /// sampler can trust composition-derived weights downstream.
    pub fn new(
        id: impl Into<CompositionId>,
        display_name: impl Into<String>,
        groups: Vec<Group>,
        total_questions: usize,
        pass_threshold_percent: f64,
    ) -> Result<Self, SampleError> {
        let sum: f64 = groups.iter().map(|group| group.target_weight_percent).sum();
        if (sum - FULL_WEIGHT_PERCENT).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(SampleError::Composition(format!(
                "group weights sum to {sum:.4}, expected {FULL_WEIGHT_PERCENT}"
            )));
        }
        Ok(Self {
            id: id.into(),
            display_name: display_name.into(),
            groups,
            total_questions,
            pass_threshold_percent,
        })
    }

    /// Target weight for `group_id`, when the composition defines it.
    pub fn weight_for(&self, group_id: &str) -> Option<f64> {
        self.groups
            .iter()
            .find(|group| group.id == group_id)
            .map(|group| group.target_weight_percent)
    }

    /// Minimum number of correct answers needed to pass a full exam.
    pub fn passing_score(&self) -> usize {
        let raw = self.total_questions as f64 * self.pass_threshold_percent / FULL_WEIGHT_PERCENT;
        raw.ceil() as usize
    }
}

/// Controls whether a group-restricted request may redraw its shortfall
/// from groups outside the restriction.
///
/// The two upstream sampling paths disagreed on this; it is an explicit
/// flag here rather than an implicit behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallPolicy {
    /// Honor the request scope strictly; a short group stays short.
    #[default]
    WithinScope,
    /// Redraw the deficit from the whole pool, ignoring the group
    /// restriction (difficulty filters still apply).
    GlobalFallback,
}

/// Sampler behavior knobs.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct SamplerOptions {
    /// Shortfall handling for group-restricted requests.
    pub shortfall_policy: ShortfallPolicy,
}
