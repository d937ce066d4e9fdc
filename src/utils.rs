//! Fixture builders shared by unit and integration tests.

use chrono::{TimeZone, Utc};

use crate::data::{Difficulty, Group, Question};

/// Build a group with the given target weight.
pub fn make_group(id: &str, target_weight_percent: f64) -> Group {
    Group {
        id: id.to_string(),
        display_name: id.replace('_', " "),
        target_weight_percent,
    }
}

/// Build a four-option question with a deterministic id and timestamp.
///
/// The id is `{group}::{suffix}` so fixtures stay unique per group without
/// callers tracking a counter.
pub fn make_question(group: &str, suffix: &str, difficulty: Difficulty) -> Question {
    let authored_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    Question {
        id: format!("{group}::{suffix}"),
        group: group.to_string(),
        topic: None,
        prompt: format!("{group} practice prompt {suffix}"),
        options: vec![
            "option a".to_string(),
            "option b".to_string(),
            "option c".to_string(),
            "option d".to_string(),
        ],
        correct_option: 0,
        explanation: None,
        difficulty,
        authored_at,
        updated_at: authored_at,
    }
}
