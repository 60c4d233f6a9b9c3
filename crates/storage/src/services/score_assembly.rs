//! Shapes discipline-specific score rows into one uniform record.
//!
//! The discipline tag comes from the [`ScoreEntry`] variant the row was
//! loaded into; fields that do not apply to a discipline are `null`.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::user::UserSummary;
use crate::models::{DressageScore, EnduranceScore, JumpingScore};

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreEntry {
    Dressage(DressageScore),
    Jumping(JumpingScore),
    Endurance(EnduranceScore),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Discipline {
    Dressage,
    Jumping,
    Endurance,
}

impl ScoreEntry {
    pub fn discipline(&self) -> Discipline {
        match self {
            Self::Dressage(_) => Discipline::Dressage,
            Self::Jumping(_) => Discipline::Jumping,
            Self::Endurance(_) => Discipline::Endurance,
        }
    }

    pub fn judge_id(&self) -> Uuid {
        match self {
            Self::Dressage(s) => s.judge_id,
            Self::Jumping(s) => s.judge_id,
            Self::Endurance(s) => s.judge_id,
        }
    }
}

/// Superset of every discipline's fields
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UnifiedScore {
    #[serde(rename = "type")]
    pub discipline: Discipline,
    pub score_id: Uuid,
    pub registration_id: Uuid,
    pub judge_id: Uuid,
    pub faults: Option<i32>,
    pub time: Option<f64>,
    pub total_score: Option<f64>,
    #[serde(rename = "move")]
    pub move_label: Option<String>,
    pub multiplier: Option<f64>,
    pub scores: Option<f64>,
    pub comment: Option<String>,
    pub arrival: Option<NaiveDateTime>,
    pub departure: Option<NaiveDateTime>,
    pub recovery: Option<NaiveDateTime>,
    pub elapsed_time: Option<f64>,
    pub value: Option<String>,
}

impl UnifiedScore {
    fn empty(discipline: Discipline, score_id: Uuid, registration_id: Uuid, judge_id: Uuid) -> Self {
        Self {
            discipline,
            score_id,
            registration_id,
            judge_id,
            faults: None,
            time: None,
            total_score: None,
            move_label: None,
            multiplier: None,
            scores: None,
            comment: None,
            arrival: None,
            departure: None,
            recovery: None,
            elapsed_time: None,
            value: None,
        }
    }
}

impl From<ScoreEntry> for UnifiedScore {
    fn from(entry: ScoreEntry) -> Self {
        let discipline = entry.discipline();

        match entry {
            ScoreEntry::Dressage(s) => Self {
                total_score: Some(s.total_score),
                move_label: Some(s.move_label),
                multiplier: Some(s.multiplier),
                scores: Some(s.scores),
                comment: s.comment,
                value: Some(s.value),
                ..Self::empty(discipline, s.score_id, s.registration_id, s.judge_id)
            },
            ScoreEntry::Jumping(s) => Self {
                faults: Some(s.faults),
                time: Some(s.time),
                total_score: Some(s.total_score),
                value: s.value,
                ..Self::empty(discipline, s.score_id, s.registration_id, s.judge_id)
            },
            ScoreEntry::Endurance(s) => Self {
                arrival: Some(s.arrival),
                departure: Some(s.departure),
                recovery: Some(s.recovery),
                elapsed_time: s.elapsed_time,
                ..Self::empty(discipline, s.score_id, s.registration_id, s.judge_id)
            },
        }
    }
}

/// Flattens a user's scores into jumping, dressage, endurance order.
pub fn assemble(
    jumping: Vec<JumpingScore>,
    dressage: Vec<DressageScore>,
    endurance: Vec<EnduranceScore>,
) -> Vec<UnifiedScore> {
    jumping
        .into_iter()
        .map(ScoreEntry::Jumping)
        .chain(dressage.into_iter().map(ScoreEntry::Dressage))
        .chain(endurance.into_iter().map(ScoreEntry::Endurance))
        .map(UnifiedScore::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct JudgeScoreGroup {
    /// 1-based position in order of first appearance
    pub serial_number: usize,
    pub judge: UserSummary,
    pub scores: Vec<UnifiedScore>,
}

/// Buckets entries per judge. Entries whose judge is missing from `judges`
/// are skipped.
pub fn group_by_judge(
    entries: Vec<ScoreEntry>,
    judges: &HashMap<Uuid, UserSummary>,
) -> Vec<JudgeScoreGroup> {
    let mut positions: HashMap<Uuid, usize> = HashMap::new();
    let mut groups: Vec<JudgeScoreGroup> = Vec::new();

    for entry in entries {
        let judge_id = entry.judge_id();
        let Some(judge) = judges.get(&judge_id) else {
            continue;
        };

        let position = *positions.entry(judge_id).or_insert_with(|| {
            groups.push(JudgeScoreGroup {
                serial_number: groups.len() + 1,
                judge: judge.clone(),
                scores: Vec::new(),
            });
            groups.len() - 1
        });

        groups[position].scores.push(UnifiedScore::from(entry));
    }

    groups
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::Role;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn dressage(judge_id: Uuid, value: &str) -> DressageScore {
        DressageScore {
            score_id: Uuid::new_v4(),
            registration_id: Uuid::nil(),
            judge_id,
            move_label: "move#1".to_string(),
            multiplier: 2.0,
            scores: 7.0,
            total_score: 14.0,
            value: value.to_string(),
            comment: Some("steady".to_string()),
            created_at: at(10, 0, 0),
        }
    }

    fn jumping(judge_id: Uuid) -> JumpingScore {
        JumpingScore {
            score_id: Uuid::new_v4(),
            registration_id: Uuid::nil(),
            judge_id,
            faults: 4,
            time: 62.5,
            total_score: 102.5,
            value: None,
            created_at: at(11, 0, 0),
        }
    }

    fn endurance(judge_id: Uuid) -> EnduranceScore {
        EnduranceScore {
            score_id: Uuid::new_v4(),
            registration_id: Uuid::nil(),
            judge_id,
            arrival: at(12, 0, 0),
            departure: at(8, 0, 0),
            recovery: at(12, 15, 0),
            elapsed_time: None,
            created_at: at(8, 0, 0),
        }
    }

    fn summary(user_id: Uuid, name: &str) -> UserSummary {
        UserSummary {
            user_id,
            name: name.to_string(),
            email: format!("{name}@example.com"),
            role: Role::Judge,
        }
    }

    #[test]
    fn test_assemble_tags_and_orders_by_discipline() {
        let judge = Uuid::new_v4();
        let scores = assemble(
            vec![jumping(judge)],
            vec![dressage(judge, "")],
            vec![endurance(judge)],
        );

        let kinds: Vec<Discipline> = scores.iter().map(|s| s.discipline).collect();
        assert_eq!(
            kinds,
            [Discipline::Jumping, Discipline::Dressage, Discipline::Endurance]
        );

        let jumping = &scores[0];
        assert_eq!(jumping.faults, Some(4));
        assert_eq!(jumping.move_label, None);
        assert_eq!(jumping.arrival, None);

        let dressage = &scores[1];
        assert_eq!(dressage.move_label.as_deref(), Some("move#1"));
        assert_eq!(dressage.multiplier, Some(2.0));
        assert_eq!(dressage.faults, None);
        // ordinary dressage marks carry an empty code, not a missing one
        assert_eq!(dressage.value.as_deref(), Some(""));

        let endurance = &scores[2];
        assert_eq!(endurance.arrival, Some(at(12, 0, 0)));
        assert_eq!(endurance.total_score, None);
    }

    #[test]
    fn test_dressage_sentinel_value_is_kept() {
        let unified = UnifiedScore::from(ScoreEntry::Dressage(dressage(Uuid::new_v4(), "E-D")));
        assert_eq!(unified.value.as_deref(), Some("E-D"));
    }

    #[test]
    fn test_serialized_shape_uses_type_and_move_keys() {
        let unified = UnifiedScore::from(ScoreEntry::Dressage(dressage(Uuid::new_v4(), "")));
        let json = serde_json::to_value(&unified).unwrap();

        assert_eq!(json["type"], "Dressage");
        assert_eq!(json["move"], "move#1");
        assert!(json["faults"].is_null());
        assert!(json["arrival"].is_null());
        assert_eq!(json["value"], "");
    }

    #[test]
    fn test_group_by_judge_assigns_serial_numbers() {
        let (first, second, unknown) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let judges = HashMap::from([
            (first, summary(first, "ada")),
            (second, summary(second, "ben")),
        ]);

        let entries = vec![
            ScoreEntry::Endurance(endurance(first)),
            ScoreEntry::Jumping(jumping(second)),
            ScoreEntry::Jumping(jumping(first)),
            ScoreEntry::Jumping(jumping(unknown)),
        ];

        let groups = group_by_judge(entries, &judges);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].serial_number, 1);
        assert_eq!(groups[0].judge.name, "ada");
        assert_eq!(groups[0].scores.len(), 2);
        assert_eq!(groups[1].serial_number, 2);
        assert_eq!(groups[1].judge.name, "ben");
        assert_eq!(groups[1].scores.len(), 1);
    }
}
