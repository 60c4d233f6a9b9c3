//! Judge-consistency metric for dressage.
//!
//! For every move of a registration, the spread between the highest and the
//! lowest total given by the judges is taken; the metric is the mean spread
//! across moves, reported as a percentage.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::DressageScore;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MoveDifference {
    #[serde(rename = "move")]
    pub move_label: String,
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencySummary {
    /// One entry per move, in order of first appearance
    pub move_differences: Vec<MoveDifference>,
    pub total_difference_sum: f64,
    /// Mean spread as a fraction (0 when there are no moves)
    pub total_average_difference: f64,
}

impl ConsistencySummary {
    pub fn percentage(&self) -> f64 {
        self.total_average_difference * 100.0
    }

    /// Percentage rendered with two decimals, e.g. `"150.00%"`
    pub fn formatted_percentage(&self) -> String {
        format!("{:.2}%", self.percentage())
    }
}

/// Groups total scores by move label, preserving first-seen move order.
pub fn group_totals_by_move(scores: &[DressageScore]) -> Vec<(String, Vec<f64>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for score in scores {
        match index.get(score.move_label.as_str()) {
            Some(&position) => groups[position].1.push(score.total_score),
            None => {
                index.insert(score.move_label.as_str(), groups.len());
                groups.push((score.move_label.clone(), vec![score.total_score]));
            }
        }
    }

    groups
}

pub fn summarize(scores: &[DressageScore]) -> ConsistencySummary {
    let move_differences: Vec<MoveDifference> = group_totals_by_move(scores)
        .into_iter()
        .map(|(move_label, totals)| MoveDifference {
            move_label,
            difference: spread(&totals),
        })
        .collect();

    let total_difference_sum: f64 = move_differences.iter().map(|m| m.difference).sum();

    let total_average_difference = if move_differences.is_empty() {
        0.0
    } else {
        total_difference_sum / move_differences.len() as f64
    };

    ConsistencySummary {
        move_differences,
        total_difference_sum,
        total_average_difference,
    }
}

fn spread(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);

    if values.is_empty() { 0.0 } else { max - min }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    fn score(judge_id: Uuid, move_label: &str, total_score: f64) -> DressageScore {
        DressageScore {
            score_id: Uuid::new_v4(),
            registration_id: Uuid::nil(),
            judge_id,
            move_label: move_label.to_string(),
            multiplier: 1.0,
            scores: total_score,
            total_score,
            value: String::new(),
            comment: None,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_two_judges_single_move() {
        let (judge_a, judge_b) = (Uuid::new_v4(), Uuid::new_v4());
        let scores = vec![score(judge_a, "move#1", 8.0), score(judge_b, "move#1", 6.5)];

        let summary = summarize(&scores);

        assert_eq!(summary.move_differences.len(), 1);
        assert_eq!(summary.move_differences[0].move_label, "move#1");
        assert_eq!(summary.move_differences[0].difference, 1.5);
        assert_eq!(summary.total_difference_sum, 1.5);
        assert_eq!(summary.total_average_difference, 1.5);
        assert_eq!(summary.formatted_percentage(), "150.00%");
    }

    #[test]
    fn test_single_judge_move_has_zero_spread() {
        let summary = summarize(&[score(Uuid::new_v4(), "move#1", 7.0)]);
        assert_eq!(summary.move_differences[0].difference, 0.0);
        assert_eq!(summary.formatted_percentage(), "0.00%");
    }

    #[test]
    fn test_no_scores() {
        let summary = summarize(&[]);
        assert!(summary.move_differences.is_empty());
        assert_eq!(summary.total_difference_sum, 0.0);
        assert_eq!(summary.total_average_difference, 0.0);
        assert_eq!(summary.formatted_percentage(), "0.00%");
    }

    #[test]
    fn test_average_across_moves_keeps_first_seen_order() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let scores = vec![
            score(a, "move#2", 6.0),
            score(a, "move#1", 7.0),
            score(b, "move#1", 5.0),
            score(b, "move#2", 6.5),
            score(c, "move#2", 8.0),
        ];

        let summary = summarize(&scores);

        let labels: Vec<&str> = summary
            .move_differences
            .iter()
            .map(|m| m.move_label.as_str())
            .collect();
        assert_eq!(labels, ["move#2", "move#1"]);
        assert_eq!(summary.move_differences[0].difference, 2.0);
        assert_eq!(summary.move_differences[1].difference, 2.0);
        assert_eq!(summary.total_difference_sum, 4.0);
        assert_eq!(summary.total_average_difference, 2.0);
        assert_eq!(summary.percentage(), 200.0);
    }

    #[test]
    fn test_negative_sentinel_totals_widen_spread() {
        let summary = summarize(&[
            score(Uuid::new_v4(), "move#1", 7.0),
            score(Uuid::new_v4(), "move#1", -2.0),
        ]);
        assert_eq!(summary.total_average_difference, 9.0);
    }
}
