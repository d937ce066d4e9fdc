//! Stratified sampling over an immutable question pool.
//!
//! A sampling call runs in two phases: a deterministic allocation phase
//! (scope resolution, weight renormalization, largest-remainder
//! apportionment) that never touches the RNG, and a draw phase (per-group
//! uniform draws without replacement, shortfall redraw, final shuffle)
//! that consumes the caller-injected RNG. All mutable working state is
//! local to one call, so a process-wide sampler over an `Arc` pool is
//! safe under concurrent requests.

use std::collections::HashSet;
use std::sync::Arc;

use rand::prelude::*;
use tracing::debug;

use crate::allocation::{Allocation, apportion, renormalize};
use crate::config::{SamplerOptions, ShortfallPolicy};
use crate::constants::allocation::{FULL_WEIGHT_PERCENT, WEIGHT_SUM_TOLERANCE};
use crate::data::{
    GroupBreakdown, GroupScope, Question, QuestionFilter, SamplingRequest, SamplingResult,
    Weighting,
};
use crate::errors::SampleError;
use crate::pool::QuestionPool;
use crate::types::{GroupId, QuestionId};

#[derive(Debug, Clone)]
/// Small seedable RNG for reproducible sampling runs.
///
/// Splitmix64. The allocation phase never reads it; injecting a fixed seed
/// makes the drawn question sets repeatable in tests and replayed sessions.
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create an RNG from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Weights and candidate filter derived from one request.
struct ResolvedRequest {
    /// Per-group weights in percent, summing to 100 over the scope, in
    /// stable pool order (or request order for explicit scopes).
    weights: Vec<(GroupId, f64)>,
    /// Candidate filter the pool understands.
    filter: QuestionFilter,
}

/// Proportional sampler over a shared question pool.
pub struct StratifiedSampler {
    pool: Arc<QuestionPool>,
    options: SamplerOptions,
}

impl StratifiedSampler {
    /// Create a sampler over `pool` with the given options.
    pub fn new(pool: Arc<QuestionPool>, options: SamplerOptions) -> Self {
        Self { pool, options }
    }

    /// The pool this sampler draws from.
    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    /// Run the deterministic allocation phase only.
    ///
    /// Returns the per-group integer allocation the draw phase would use.
    /// Independent of any RNG; two calls with the same pool and request
    /// always return the same vector.
    pub fn allocate(&self, request: &SamplingRequest) -> Result<Vec<Allocation>, SampleError> {
        let resolved = self.resolve(request)?;
        Ok(apportion(request.total_requested, &resolved.weights))
    }

    /// Produce a quiz selection for `request`, drawing randomness from `rng`.
    ///
    /// The result holds `min(total_requested, matching supply)` questions
    /// with no duplicate ids, flagged `partial_supply` when supply fell
    /// short. The pool is never mutated.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        request: &SamplingRequest,
        rng: &mut R,
    ) -> Result<SamplingResult, SampleError> {
        let resolved = self.resolve(request)?;
        if self.pool.total_matching(&resolved.filter) == 0 {
            return Err(SampleError::NoQuestionsAvailable);
        }
        let allocations = apportion(request.total_requested, &resolved.weights);

        // Working state scoped to this call; never a shared field.
        let mut drawn_ids: HashSet<QuestionId> = HashSet::new();
        let mut selection: Vec<Question> = Vec::with_capacity(request.total_requested);
        let mut breakdown: Vec<GroupBreakdown> = Vec::with_capacity(allocations.len());
        let mut shortfall = 0usize;

        for allocation in &allocations {
            let mut candidates: Vec<&Question> = self
                .pool
                .matching_in_group(&allocation.group, &resolved.filter)
                .into_iter()
                .filter(|question| !drawn_ids.contains(&question.id))
                .collect();
            candidates.shuffle(rng);
            let take = allocation.count.min(candidates.len());
            shortfall += allocation.count - take;
            for question in candidates.into_iter().take(take) {
                drawn_ids.insert(question.id.clone());
                selection.push(question.clone());
            }
            breakdown.push(GroupBreakdown {
                group: allocation.group.clone(),
                allocated: allocation.count,
                drawn: take,
            });
        }

        if shortfall > 0 && self.shortfall_may_widen(&request.scope) {
            let redraw_filter = QuestionFilter {
                groups: None,
                difficulty: resolved.filter.difficulty,
            };
            let mut leftovers: Vec<&Question> = self
                .pool
                .all_groups()
                .flat_map(|group| self.pool.matching_in_group(&group.id, &redraw_filter))
                .filter(|question| !drawn_ids.contains(&question.id))
                .collect();
            leftovers.shuffle(rng);
            let take = shortfall.min(leftovers.len());
            debug!(shortfall, redrawn = take, "redrawing shortfall from global pool");
            for question in leftovers.into_iter().take(take) {
                drawn_ids.insert(question.id.clone());
                match breakdown
                    .iter_mut()
                    .find(|entry| entry.group == question.group)
                {
                    Some(entry) => entry.drawn += 1,
                    None => breakdown.push(GroupBreakdown {
                        group: question.group.clone(),
                        allocated: 0,
                        drawn: 1,
                    }),
                }
                selection.push(question.clone());
            }
        }

        let partial_supply = selection.len() < request.total_requested;
        // One more uniform pass so group membership is not inferable from
        // answer order.
        selection.shuffle(rng);
        Ok(SamplingResult {
            questions: selection,
            breakdown,
            partial_supply,
        })
    }

    fn shortfall_may_widen(&self, scope: &GroupScope) -> bool {
        match scope {
            GroupScope::All => true,
            GroupScope::Groups(_) => {
                self.options.shortfall_policy == ShortfallPolicy::GlobalFallback
            }
        }
    }

    fn resolve(&self, request: &SamplingRequest) -> Result<ResolvedRequest, SampleError> {
        if request.total_requested == 0 {
            return Err(SampleError::InvalidRequest(
                "total_requested must be positive".into(),
            ));
        }
        let scope = self.resolve_scope(&request.scope)?;
        let weights = self.resolve_weights(&scope, &request.weighting)?;
        let filter = QuestionFilter {
            groups: match &request.scope {
                GroupScope::All => None,
                GroupScope::Groups(_) => Some(scope.clone()),
            },
            difficulty: request.difficulty,
        };
        Ok(ResolvedRequest { weights, filter })
    }

    fn resolve_scope(&self, scope: &GroupScope) -> Result<Vec<GroupId>, SampleError> {
        match scope {
            GroupScope::All => Ok(self
                .pool
                .all_groups()
                .map(|group| group.id.clone())
                .collect()),
            GroupScope::Groups(group_ids) => {
                if group_ids.is_empty() {
                    return Err(SampleError::InvalidRequest(
                        "group scope must name at least one group".into(),
                    ));
                }
                let mut seen = HashSet::new();
                let mut resolved = Vec::with_capacity(group_ids.len());
                for group_id in group_ids {
                    if !self.pool.contains_group(group_id) {
                        return Err(SampleError::UnknownGroup {
                            group_id: group_id.clone(),
                        });
                    }
                    if seen.insert(group_id.clone()) {
                        resolved.push(group_id.clone());
                    }
                }
                Ok(resolved)
            }
        }
    }

    fn resolve_weights(
        &self,
        scope: &[GroupId],
        weighting: &Weighting,
    ) -> Result<Vec<(GroupId, f64)>, SampleError> {
        match weighting {
            Weighting::Composition => {
                let raw: Vec<(GroupId, f64)> = scope
                    .iter()
                    .map(|group_id| {
                        let weight = self
                            .pool
                            .group(group_id)
                            .map(|group| group.target_weight_percent)
                            .unwrap_or(0.0);
                        (group_id.clone(), weight)
                    })
                    .collect();
                Ok(renormalize(&raw))
            }
            Weighting::Equal => {
                let raw: Vec<(GroupId, f64)> = scope
                    .iter()
                    .map(|group_id| (group_id.clone(), 1.0))
                    .collect();
                Ok(renormalize(&raw))
            }
            Weighting::Explicit(entries) => {
                let mut seen = HashSet::new();
                for (group_id, _) in entries {
                    if !self.pool.contains_group(group_id) {
                        return Err(SampleError::UnknownGroup {
                            group_id: group_id.clone(),
                        });
                    }
                    if !scope.contains(group_id) {
                        return Err(SampleError::InvalidRequest(format!(
                            "explicit weight for group '{group_id}' outside the request scope"
                        )));
                    }
                    if !seen.insert(group_id.clone()) {
                        return Err(SampleError::InvalidRequest(format!(
                            "duplicate explicit weight for group '{group_id}'"
                        )));
                    }
                }
                let mut weights = Vec::with_capacity(scope.len());
                for group_id in scope {
                    let Some((_, weight)) =
                        entries.iter().find(|(entry_id, _)| entry_id == group_id)
                    else {
                        return Err(SampleError::InvalidRequest(format!(
                            "explicit weighting is missing group '{group_id}'"
                        )));
                    };
                    weights.push((group_id.clone(), *weight));
                }
                let sum: f64 = weights.iter().map(|(_, weight)| weight).sum();
                if (sum - FULL_WEIGHT_PERCENT).abs() > WEIGHT_SUM_TOLERANCE {
                    return Err(SampleError::InvalidRequest(format!(
                        "explicit weights sum to {sum:.4}, expected {FULL_WEIGHT_PERCENT}"
                    )));
                }
                Ok(weights)
            }
        }
    }
}
