//! Show-jumping standings and winner selection.
//!
//! Standings order: fewest faults first, ties broken by the faster time.
//! The winner is the head of the standings.

use std::cmp::Ordering;

use crate::models::JumpingScore;

/// Anything carrying a fault count and a round time can be ranked.
pub trait JumpingRound {
    fn faults(&self) -> i32;
    fn time(&self) -> f64;
}

impl JumpingRound for JumpingScore {
    fn faults(&self) -> i32 {
        self.faults
    }

    fn time(&self) -> f64 {
        self.time
    }
}

pub fn standings_order<T: JumpingRound>(a: &T, b: &T) -> Ordering {
    a.faults()
        .cmp(&b.faults())
        .then_with(|| a.time().total_cmp(&b.time()))
}

/// Sorts rounds into standings order. The sort is stable, so rounds with
/// identical faults and time keep their input order.
pub fn rank_rounds<T: JumpingRound>(rounds: &mut [T]) {
    rounds.sort_by(standings_order);
}

pub fn select_winner<T: JumpingRound>(rounds: &[T]) -> Option<&T> {
    rounds.iter().min_by(|a, b| standings_order(*a, *b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Round {
        rider: &'static str,
        faults: i32,
        time: f64,
    }

    impl JumpingRound for Round {
        fn faults(&self) -> i32 {
            self.faults
        }

        fn time(&self) -> f64 {
            self.time
        }
    }

    fn round(rider: &'static str, faults: i32, time: f64) -> Round {
        Round {
            rider,
            faults,
            time,
        }
    }

    #[test]
    fn test_fewer_faults_wins_over_faster_time() {
        let rounds = vec![round("slow-clear", 0, 70.0), round("fast-four", 4, 60.0)];
        let rounds_reversed = vec![round("fast-four", 4, 60.0), round("slow-clear", 0, 70.0)];

        assert_eq!(select_winner(&rounds).unwrap().rider, "slow-clear");
        assert_eq!(select_winner(&rounds_reversed).unwrap().rider, "slow-clear");
    }

    #[test]
    fn test_equal_faults_faster_time_wins() {
        let rounds = vec![round("b", 4, 65.2), round("a", 4, 61.8), round("c", 8, 50.0)];
        assert_eq!(select_winner(&rounds).unwrap().rider, "a");
    }

    #[test]
    fn test_sentinel_faults_rank_last() {
        let mut rounds = vec![
            round("eliminated", 999, 30.0),
            round("twelve", 12, 80.0),
            round("clear", 0, 75.0),
        ];

        rank_rounds(&mut rounds);

        let order: Vec<&str> = rounds.iter().map(|r| r.rider).collect();
        assert_eq!(order, ["clear", "twelve", "eliminated"]);
    }

    #[test]
    fn test_empty_has_no_winner() {
        let rounds: Vec<Round> = Vec::new();
        assert!(select_winner(&rounds).is_none());
    }

    #[test]
    fn test_identical_rounds_keep_first() {
        let rounds = vec![round("first", 0, 60.0), round("second", 0, 60.0)];
        assert_eq!(select_winner(&rounds).unwrap().rider, "first");
    }
}
