use std::collections::HashMap;

use crate::data::SamplingResult;
use crate::types::GroupId;

/// Aggregate skew metrics over a result's per-group drawn counts.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSkew {
    pub total: usize,
    pub groups: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub max_share: f64,
    pub min_share: f64,
    pub ratio: f64,
    pub per_group: Vec<GroupShare>,
}

/// One group's share of a drawn quiz, for telemetry and UI breakdowns.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupShare {
    pub group: GroupId,
    pub count: usize,
    pub share: f64,
}

/// Compute skew metrics from per-group drawn counts.
pub fn group_skew(counts: &HashMap<GroupId, usize>) -> Option<GroupSkew> {
    if counts.is_empty() {
        return None;
    }
    let total: usize = counts.values().sum();
    let groups = counts.len();
    let min = *counts.values().min().expect("counts non-empty");
    let max = *counts.values().max().expect("counts non-empty");
    let mean = total as f64 / groups as f64;
    let share_of = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    };
    let ratio = if min == 0 {
        f64::INFINITY
    } else {
        max as f64 / min as f64
    };
    let mut per_group: Vec<GroupShare> = counts
        .iter()
        .map(|(group, count)| GroupShare {
            group: group.clone(),
            count: *count,
            share: share_of(*count),
        })
        .collect();
    per_group.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.group.cmp(&b.group)));
    Some(GroupSkew {
        total,
        groups,
        min,
        max,
        mean,
        max_share: share_of(max),
        min_share: share_of(min),
        ratio,
        per_group,
    })
}

impl GroupSkew {
    /// Skew metrics for the realized distribution of one sampling result.
    pub fn from_result(result: &SamplingResult) -> Option<Self> {
        let counts: HashMap<GroupId, usize> = result
            .breakdown
            .iter()
            .map(|entry| (entry.group.clone(), entry.drawn))
            .collect();
        group_skew(&counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GroupBreakdown;

    #[test]
    fn group_skew_reports_balance() {
        let mut counts = HashMap::new();
        counts.insert("a".to_string(), 5);
        counts.insert("b".to_string(), 5);
        let skew = group_skew(&counts).expect("skew");
        assert_eq!(skew.total, 10);
        assert_eq!(skew.groups, 2);
        assert!((skew.ratio - 1.0).abs() < 1e-6);
        assert!(skew.per_group.iter().all(|e| (e.share - 0.5).abs() < 1e-6));
    }

    #[test]
    fn group_skew_reports_imbalance_largest_first() {
        let mut counts = HashMap::new();
        counts.insert("a".to_string(), 6);
        counts.insert("b".to_string(), 3);
        counts.insert("c".to_string(), 3);
        let skew = group_skew(&counts).expect("skew");
        assert_eq!(skew.per_group[0].group, "a");
        assert!((skew.max_share - 0.5).abs() < 1e-6);
        assert!((skew.ratio - 2.0).abs() < 1e-6);
    }

    #[test]
    fn from_result_uses_drawn_counts() {
        let result = SamplingResult {
            questions: Vec::new(),
            breakdown: vec![
                GroupBreakdown {
                    group: "a".to_string(),
                    allocated: 4,
                    drawn: 2,
                },
                GroupBreakdown {
                    group: "b".to_string(),
                    allocated: 2,
                    drawn: 2,
                },
            ],
            partial_supply: true,
        };
        let skew = GroupSkew::from_result(&result).expect("skew");
        assert_eq!(skew.total, 4);
        assert!((skew.ratio - 1.0).abs() < 1e-6);
    }
}
