//! Per-discipline scoring rules.
//!
//! Judges submit raw numbers; these functions turn them into the stored
//! `total_score` and the categorical `value` code. Sentinel inputs (negative
//! dressage marks, fault counts 994..=999) encode an outcome such as
//! elimination instead of a measurement. Unknown inputs never fail: they
//! simply carry no code.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Result, StorageError};

pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Multiplier applied to every fault when building a jumping total
pub const FAULT_WEIGHT: f64 = 10.0;

/// Outcome encoded by a negative dressage mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DressageOutcome {
    NoScore,
    Eliminated,
    RetiredAfterFall,
    Withdrawn,
    Retired,
    Disqualified,
}

impl DressageOutcome {
    /// Exact match on the raw mark; `-1.5` is not a sentinel.
    pub fn from_raw(scores: f64) -> Option<Self> {
        const CODES: [(f64, DressageOutcome); 6] = [
            (-1.0, DressageOutcome::NoScore),
            (-2.0, DressageOutcome::Eliminated),
            (-3.0, DressageOutcome::RetiredAfterFall),
            (-4.0, DressageOutcome::Withdrawn),
            (-5.0, DressageOutcome::Retired),
            (-6.0, DressageOutcome::Disqualified),
        ];

        CODES
            .iter()
            .find(|(raw, _)| *raw == scores)
            .map(|(_, outcome)| *outcome)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NoScore => "--D",
            Self::Eliminated => "E-D",
            Self::RetiredAfterFall => "RF-D",
            Self::Withdrawn => "WD-D",
            Self::Retired => "R-D",
            Self::Disqualified => "DQ-D",
        }
    }
}

/// Outcome encoded by a sentinel fault count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpingOutcome {
    Eliminated,
    RetiredAfterFall,
    Withdrawn,
    Retired,
    Disqualified,
    NoResult,
}

impl JumpingOutcome {
    pub fn from_faults(faults: i32) -> Option<Self> {
        match faults {
            999 => Some(Self::Eliminated),
            998 => Some(Self::RetiredAfterFall),
            997 => Some(Self::Withdrawn),
            996 => Some(Self::Retired),
            995 => Some(Self::Disqualified),
            994 => Some(Self::NoResult),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Eliminated => "E-J",
            Self::RetiredAfterFall => "RF-J",
            Self::Withdrawn => "WD-J",
            Self::Retired => "R-J",
            Self::Disqualified => "DQ-J",
            Self::NoResult => "--J",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DressageComputation {
    pub multiplier: f64,
    pub scores: f64,
    pub total_score: f64,
    /// Sentinel code, or an empty string for an ordinary mark
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JumpingComputation {
    pub faults: i32,
    pub time: f64,
    pub total_score: f64,
    /// Sentinel code; unset for an ordinary fault count on create and edit alike
    pub value: Option<String>,
}

/// Resolves a submitted multiplier such as `"x2"` or `"2.5 coef"`.
///
/// Everything except digits, `.` and `-` is dropped, then the longest
/// numeric prefix is read. Absent, empty or unreadable input yields
/// [`DEFAULT_MULTIPLIER`].
pub fn parse_multiplier(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return DEFAULT_MULTIPLIER;
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    leading_float(&cleaned)
        .filter(|value| value.is_finite())
        .unwrap_or(DEFAULT_MULTIPLIER)
}

/// Reads the longest `-?digits[.digits]` prefix of `input`. Needs at least
/// one digit.
fn leading_float(input: &str) -> Option<f64> {
    let bytes = input.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut digits = 0;
    let mut seen_dot = false;

    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if digits == 0 {
        return None;
    }

    input[..end].parse::<f64>().ok()
}

pub fn compute_dressage(scores: f64, multiplier: f64) -> DressageComputation {
    let value = DressageOutcome::from_raw(scores)
        .map(|outcome| outcome.code().to_string())
        .unwrap_or_default();

    DressageComputation {
        multiplier,
        scores,
        total_score: scores * multiplier,
        value,
    }
}

/// `faults × 10 + time`. Sentinel fault counts are kept as-is so they
/// dominate the total and sort to the far end of any fault ordering.
pub fn compute_jumping(faults: i32, time: f64) -> JumpingComputation {
    JumpingComputation {
        faults,
        time,
        total_score: f64::from(faults) * FAULT_WEIGHT + time,
        value: JumpingOutcome::from_faults(faults).map(|outcome| outcome.code().to_string()),
    }
}

pub fn move_label(number: i64) -> String {
    format!("move#{number}")
}

/// Next move number for a judge on a registration, given the labels that
/// judge already holds there. Normally `count + 1`; if deletions left gaps,
/// numbering continues after the highest label so no label repeats.
pub fn next_move_number<'a>(existing: impl IntoIterator<Item = &'a str>) -> i64 {
    let (count, highest) = existing.into_iter().fold((0_i64, 0_i64), |(count, highest), label| {
        let number = label
            .strip_prefix("move#")
            .and_then(|n| n.parse::<i64>().ok())
            .unwrap_or(0);
        (count + 1, highest.max(number))
    });

    count.max(highest) + 1
}

/// Parses a `HH:MM:SS` clock reading as a moment on `day`.
pub fn parse_clock_time(raw: &str, day: NaiveDate) -> Result<NaiveDateTime> {
    let invalid = || StorageError::Validation(format!("Invalid time '{raw}', expected HH:MM:SS"));

    let parts: Vec<u32> = raw
        .trim()
        .split(':')
        .map(|part| part.parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| invalid())?;

    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(invalid());
    };

    let time = NaiveTime::from_hms_opt(*hours, *minutes, *seconds).ok_or_else(invalid)?;

    Ok(day.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dressage_sentinel_codes() {
        let expected = [
            (-1.0, "--D"),
            (-2.0, "E-D"),
            (-3.0, "RF-D"),
            (-4.0, "WD-D"),
            (-5.0, "R-D"),
            (-6.0, "DQ-D"),
        ];

        for (scores, code) in expected {
            assert_eq!(compute_dressage(scores, 1.0).value, code, "scores {scores}");
        }
    }

    #[test]
    fn test_dressage_ordinary_marks_have_empty_value() {
        for scores in [7.5, 0.0, 10.0, -7.0, -1.5, 42.0] {
            assert_eq!(compute_dressage(scores, 2.0).value, "");
        }
    }

    #[test]
    fn test_dressage_total_is_scores_times_multiplier() {
        let result = compute_dressage(7.5, 2.0);
        assert_eq!(result.total_score, 15.0);
        assert_eq!(result.multiplier, 2.0);

        // sentinel marks are multiplied too
        assert_eq!(compute_dressage(-2.0, 3.0).total_score, -6.0);
    }

    #[test]
    fn test_value_derives_from_raw_scores_not_total() {
        // total is -2 but the raw mark is -1
        let result = compute_dressage(-1.0, 2.0);
        assert_eq!(result.total_score, -2.0);
        assert_eq!(result.value, "--D");
    }

    #[test]
    fn test_parse_multiplier() {
        assert_eq!(parse_multiplier(Some("2.5x")), 2.5);
        assert_eq!(parse_multiplier(Some("x2")), 2.0);
        assert_eq!(parse_multiplier(Some("coef: -1.5")), -1.5);
        assert_eq!(parse_multiplier(Some("")), 1.0);
        assert_eq!(parse_multiplier(None), 1.0);
        assert_eq!(parse_multiplier(Some("abc")), 1.0);
        assert_eq!(parse_multiplier(Some("-")), 1.0);
    }

    #[test]
    fn test_parse_multiplier_reads_numeric_prefix() {
        assert_eq!(parse_multiplier(Some("1.2.3")), 1.2);
        assert_eq!(parse_multiplier(Some("2-3")), 2.0);
        assert_eq!(parse_multiplier(Some("-.5")), -0.5);
        assert_eq!(parse_multiplier(Some("3.")), 3.0);
        assert_eq!(parse_multiplier(Some(".")), 1.0);
        assert_eq!(parse_multiplier(Some("--2")), 1.0);
    }

    #[test]
    fn test_parse_multiplier_long_input_is_linear() {
        let n = 100_000;
        let raw = format!("{}.{}", "1".repeat(n / 2), "-".repeat(n / 2));

        let started = std::time::Instant::now();
        // 50k digits overflow to infinity
        assert_eq!(parse_multiplier(Some(&raw)), DEFAULT_MULTIPLIER);

        let short = format!("12.5{}", "-".repeat(n));
        assert_eq!(parse_multiplier(Some(&short)), 12.5);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn test_jumping_sentinel_codes() {
        let expected = [
            (999, "E-J"),
            (998, "RF-J"),
            (997, "WD-J"),
            (996, "R-J"),
            (995, "DQ-J"),
            (994, "--J"),
        ];

        for (faults, code) in expected {
            let result = compute_jumping(faults, 61.5);
            assert_eq!(result.value.as_deref(), Some(code));
            assert_eq!(result.total_score, f64::from(faults) * 10.0 + 61.5);
        }
    }

    #[test]
    fn test_jumping_eliminated_total() {
        let result = compute_jumping(999, 70.25);
        assert_eq!(result.value.as_deref(), Some("E-J"));
        assert_eq!(result.total_score, 9990.0 + 70.25);
    }

    #[test]
    fn test_jumping_ordinary_faults_leave_value_unset() {
        let result = compute_jumping(4, 60.0);
        assert_eq!(result.value, None);
        assert_eq!(result.total_score, 100.0);

        assert_eq!(compute_jumping(993, 1.0).value, None);
        assert_eq!(compute_jumping(1000, 1.0).value, None);
    }

    #[test]
    fn test_move_label() {
        assert_eq!(move_label(1), "move#1");
        assert_eq!(move_label(12), "move#12");
    }

    #[test]
    fn test_next_move_number() {
        assert_eq!(next_move_number(Vec::<&str>::new()), 1);
        assert_eq!(next_move_number(["move#1", "move#2"]), 3);
    }

    #[test]
    fn test_next_move_number_skips_past_gaps() {
        // move#2 was deleted
        assert_eq!(next_move_number(["move#1", "move#3"]), 4);
        assert_eq!(next_move_number(["custom", "move#1"]), 3);
    }

    #[test]
    fn test_parse_clock_time() {
        let day = NaiveDate::from_ymd_opt(2025, 5, 17).unwrap();
        let parsed = parse_clock_time("09:05:30", day).unwrap();
        assert_eq!(parsed, day.and_hms_opt(9, 5, 30).unwrap());
    }

    #[test]
    fn test_parse_clock_time_rejects_malformed_input() {
        let day = NaiveDate::from_ymd_opt(2025, 5, 17).unwrap();
        for raw in ["", "9:05", "25:00:00", "aa:bb:cc", "10:00:00:00", "10:61:00"] {
            assert!(
                matches!(parse_clock_time(raw, day), Err(StorageError::Validation(_))),
                "{raw} should be rejected"
            );
        }
    }
}
