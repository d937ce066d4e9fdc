//! Largest-remainder (Hamilton) apportionment.
//!
//! This module is deliberately RNG-free: given the same total and weight
//! vector it always produces the same allocation, so distribution
//! correctness is testable without touching the draw path.

use crate::constants::allocation::FULL_WEIGHT_PERCENT;
use crate::types::GroupId;

/// One group's integer share of a sampling request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// Group the share applies to.
    pub group: GroupId,
    /// Whole questions assigned to the group.
    pub count: usize,
}

/// Scale `weights` so they sum to 100 percent, preserving order.
///
/// Returns an equal-weight vector when every input weight is zero (implicit
/// groups carry zero weight and must still be drawable under equal scope).
pub fn renormalize(weights: &[(GroupId, f64)]) -> Vec<(GroupId, f64)> {
    let sum: f64 = weights.iter().map(|(_, weight)| weight.max(0.0)).sum();
    if sum <= 0.0 {
        let share = FULL_WEIGHT_PERCENT / weights.len().max(1) as f64;
        return weights
            .iter()
            .map(|(group, _)| (group.clone(), share))
            .collect();
    }
    weights
        .iter()
        .map(|(group, weight)| {
            (
                group.clone(),
                weight.max(0.0) / sum * FULL_WEIGHT_PERCENT,
            )
        })
        .collect()
}

/// Apportion `total` whole units across `weights` (percent, summing to 100).
///
/// Each group receives the floor of its real-valued share; leftover units go
/// one apiece to the groups with the largest fractional remainders, ties
/// broken by input order. The returned counts always sum to `total`, and
/// each count differs from the ideal share by at most one unit.
pub fn apportion(total: usize, weights: &[(GroupId, f64)]) -> Vec<Allocation> {
    if weights.is_empty() {
        return Vec::new();
    }
    let mut allocations: Vec<Allocation> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(weights.len());
    let mut assigned = 0usize;
    for (idx, (group, weight)) in weights.iter().enumerate() {
        let raw = total as f64 * weight.max(0.0) / FULL_WEIGHT_PERCENT;
        let floor = raw.floor() as usize;
        assigned += floor;
        allocations.push(Allocation {
            group: group.clone(),
            count: floor,
        });
        remainders.push((idx, raw - floor as f64));
    }
    // Largest remainder first; stable input order breaks exact ties.
    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let leftover = total.saturating_sub(assigned);
    for step in 0..leftover {
        let (idx, _) = remainders[step % remainders.len()];
        allocations[idx].count += 1;
    }
    allocations
}
