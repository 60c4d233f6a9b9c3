//! Scoring operations as the HTTP layer runs them: load the registration,
//! apply the discipline rule, persist, shape the result.
//!
//! Every function takes the store explicitly so the same code runs against
//! PostgreSQL and against the in-memory store used in the tests below.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::score::{
    ConsistencyResponse, CreateDressageScoreRequest, CreateJumpingScoreRequest,
    DressageScoreResponse, JumpingStanding, MultiplierInput, RegistrationJudgeScoresResponse,
    RegistrationScores, UpdateDressageScoreRequest, UpdateEnduranceScoreRequest,
    UpdateJumpingScoreRequest, UserScoresResponse,
};
use crate::error::{Result, StorageError};
use crate::models::{
    ClassType, DressageScore, EnduranceScore, JumpingScore, RegistrationClass,
    ScoreDifferenceRecord,
};
use crate::services::score_assembly::{self, ScoreEntry};
use crate::services::{judge_consistency, scoring, winner};
use crate::store::{NewDressageScore, ScoringStore};

/// Rejects a score whose discipline does not match the registration's class.
pub fn ensure_class(registration: &RegistrationClass, expected: ClassType) -> Result<()> {
    if registration.class_type != expected {
        return Err(StorageError::Validation(format!(
            "Registration class is {}, not {}",
            registration.class_type, expected
        )));
    }

    Ok(())
}

pub async fn create_dressage_score<S: ScoringStore + ?Sized>(
    store: &S,
    judge_id: Uuid,
    req: &CreateDressageScoreRequest,
) -> Result<DressageScoreResponse> {
    let registration = store.registration_class(req.registration_id).await?;
    ensure_class(&registration, ClassType::Dressage)?;

    let multiplier = MultiplierInput::resolve(req.multiplier.as_ref());
    let computation = scoring::compute_dressage(req.scores, multiplier);
    debug!(
        total_score = computation.total_score,
        value = %computation.value,
        "Computed dressage score"
    );

    let dressage_score = store
        .append_dressage_score(NewDressageScore {
            registration_id: req.registration_id,
            judge_id,
            computation,
            comment: req.comment.clone(),
        })
        .await?;
    debug!(move_label = %dressage_score.move_label, "Assigned dressage move");

    let all_scores = store.dressage_scores_by_judge(judge_id).await?;

    Ok(DressageScoreResponse {
        dressage_score,
        all_scores,
    })
}

/// Recomputes total and value from scratch. An absent comment keeps the
/// stored one. `all_scores` lists the marks of the judge who owns the score,
/// whoever makes the edit.
pub async fn update_dressage_score<S: ScoringStore + ?Sized>(
    store: &S,
    score_id: Uuid,
    req: &UpdateDressageScoreRequest,
) -> Result<DressageScoreResponse> {
    let existing = store.find_dressage_score(score_id).await?;

    let multiplier = MultiplierInput::resolve(req.multiplier.as_ref());
    let computation = scoring::compute_dressage(req.scores, multiplier);
    let comment = req.comment.clone().or(existing.comment);

    let dressage_score = store
        .update_dressage_score(score_id, &computation, comment)
        .await?;
    let all_scores = store.dressage_scores_by_judge(existing.judge_id).await?;

    Ok(DressageScoreResponse {
        dressage_score,
        all_scores,
    })
}

pub async fn create_jumping_score<S: ScoringStore + ?Sized>(
    store: &S,
    judge_id: Uuid,
    req: &CreateJumpingScoreRequest,
) -> Result<JumpingScore> {
    let registration = store.registration_class(req.registration_id).await?;
    ensure_class(&registration, ClassType::ShowJumping)?;

    let computation = scoring::compute_jumping(req.faults, req.time);
    debug!(
        total_score = computation.total_score,
        value = ?computation.value,
        "Computed jumping score"
    );

    store
        .insert_jumping_score(req.registration_id, judge_id, &computation)
        .await
}

pub async fn update_jumping_score<S: ScoringStore + ?Sized>(
    store: &S,
    score_id: Uuid,
    req: &UpdateJumpingScoreRequest,
) -> Result<JumpingScore> {
    store.find_jumping_score(score_id).await?;

    let computation = scoring::compute_jumping(req.faults, req.time);
    store.update_jumping_score(score_id, &computation).await
}

/// Best jumping round: fewest faults, then fastest time. `NotFound` when no
/// round has been scored.
pub async fn jumping_winner<S: ScoringStore + ?Sized>(
    store: &S,
    class_id: Option<Uuid>,
) -> Result<JumpingStanding> {
    let standings = store.jumping_standings(class_id).await?;

    winner::select_winner(&standings)
        .cloned()
        .ok_or(StorageError::NotFound)
}

/// Opens an endurance card with every clock set to `now`.
pub async fn create_endurance_score<S: ScoringStore + ?Sized>(
    store: &S,
    judge_id: Uuid,
    registration_id: Uuid,
    now: NaiveDateTime,
) -> Result<EnduranceScore> {
    let registration = store.registration_class(registration_id).await?;
    ensure_class(&registration, ClassType::Endurance)?;

    store
        .insert_endurance_score(registration_id, judge_id, now)
        .await
}

/// Applies `HH:MM:SS` clock readings on `today`. Absent fields keep their
/// stored values; any malformed reading rejects the whole update.
pub async fn update_endurance_score<S: ScoringStore + ?Sized>(
    store: &S,
    score_id: Uuid,
    req: &UpdateEnduranceScoreRequest,
    today: NaiveDate,
) -> Result<EnduranceScore> {
    let mut score = store.find_endurance_score(score_id).await?;

    let parse = |raw: &Option<String>, current: NaiveDateTime| -> Result<NaiveDateTime> {
        match raw.as_deref() {
            Some(raw) => scoring::parse_clock_time(raw, today),
            None => Ok(current),
        }
    };

    score.arrival = parse(&req.arrival, score.arrival)?;
    score.departure = parse(&req.departure, score.departure)?;
    score.recovery = parse(&req.recovery, score.recovery)?;
    score.elapsed_time = req.elapsed_time.or(score.elapsed_time);

    store.update_endurance_score(&score).await
}

/// Dressage listings run from the lowest total upwards.
pub fn order_dressage(scores: &mut [DressageScore]) {
    scores.sort_by(|a, b| a.total_score.total_cmp(&b.total_score));
}

/// Fastest elapsed time first; cards without one go last.
pub fn order_endurance(scores: &mut [EnduranceScore]) {
    scores.sort_by(|a, b| match (a.elapsed_time, b.elapsed_time) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

pub async fn registration_scores<S: ScoringStore + ?Sized>(
    store: &S,
    registration_id: Uuid,
    class_type: ClassType,
) -> Result<RegistrationScores> {
    store.registration_class(registration_id).await?;

    let scores = match class_type {
        ClassType::Dressage => {
            let mut scores = store.dressage_scores_for_registration(registration_id).await?;
            order_dressage(&mut scores);
            RegistrationScores::Dressage(scores)
        }
        ClassType::ShowJumping => {
            let mut scores = store.jumping_scores_for_registration(registration_id).await?;
            winner::rank_rounds(&mut scores);
            RegistrationScores::ShowJumping(scores)
        }
        ClassType::Endurance => {
            let mut scores = store
                .endurance_scores_for_registration(registration_id)
                .await?;
            order_endurance(&mut scores);
            RegistrationScores::Endurance(scores)
        }
    };

    Ok(scores)
}

/// Measures how far the judges disagree on a registration's dressage moves
/// and appends the result to the registration's history.
pub async fn record_consistency<S: ScoringStore + ?Sized>(
    store: &S,
    registration_id: Uuid,
    requested_by: Uuid,
) -> Result<ConsistencyResponse> {
    store.registration_class(registration_id).await?;

    let scores = store
        .dressage_scores_for_registration(registration_id)
        .await?;
    let summary = judge_consistency::summarize(&scores);

    let record = store
        .insert_difference_record(registration_id, requested_by, summary.percentage())
        .await?;

    info!(
        %registration_id,
        record_id = %record.record_id,
        moves = summary.move_differences.len(),
        total_average_difference = %summary.formatted_percentage(),
        "Recorded judge consistency"
    );

    Ok(ConsistencyResponse {
        total_difference_sum: summary.total_difference_sum,
        total_average_difference: summary.formatted_percentage(),
        record,
        move_differences: summary.move_differences,
    })
}

pub async fn consistency_history<S: ScoringStore + ?Sized>(
    store: &S,
    registration_id: Uuid,
) -> Result<Vec<ScoreDifferenceRecord>> {
    store.registration_class(registration_id).await?;
    store.difference_records(registration_id).await
}

/// Everything `user_id` scored on a registration, as uniform records.
pub async fn user_scores<S: ScoringStore + ?Sized>(
    store: &S,
    registration_id: Uuid,
    user_id: Uuid,
) -> Result<UserScoresResponse> {
    store.registration_class(registration_id).await?;
    let user = store.find_user_summary(user_id).await?;

    let scores = store
        .user_scores_for_registration(registration_id, user_id)
        .await?;

    Ok(UserScoresResponse {
        user_id: user.user_id,
        name: user.name,
        email: user.email,
        role: user.role,
        scores: score_assembly::assemble(scores.jumping, scores.dressage, scores.endurance),
    })
}

/// Endurance and jumping scores of a registration grouped per judge.
pub async fn judge_scores<S: ScoringStore + ?Sized>(
    store: &S,
    registration_id: Uuid,
) -> Result<RegistrationJudgeScoresResponse> {
    store.registration_class(registration_id).await?;

    let endurance = store
        .endurance_scores_for_registration(registration_id)
        .await?;
    let jumping = store.jumping_scores_for_registration(registration_id).await?;

    let entries: Vec<ScoreEntry> = endurance
        .into_iter()
        .map(ScoreEntry::Endurance)
        .chain(jumping.into_iter().map(ScoreEntry::Jumping))
        .collect();

    let mut judge_ids: Vec<Uuid> = entries.iter().map(ScoreEntry::judge_id).collect();
    judge_ids.sort();
    judge_ids.dedup();

    let judges: HashMap<Uuid, _> = store
        .user_summaries(&judge_ids)
        .await?
        .into_iter()
        .map(|summary| (summary.user_id, summary))
        .collect();

    Ok(RegistrationJudgeScoresResponse {
        registration_id,
        scores: score_assembly::group_by_judge(entries, &judges),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::dto::user::UserSummary;
    use crate::models::Role;
    use crate::services::score_assembly::Discipline;
    use crate::services::scoring::{DressageComputation, JumpingComputation};
    use crate::store::UserRegistrationScores;

    #[derive(Clone)]
    struct RegistrationFixture {
        class_type: ClassType,
        class_id: Uuid,
        rider: UserSummary,
        horse_id: Uuid,
        horse_name: String,
    }

    #[derive(Default)]
    struct MemoryState {
        registrations: HashMap<Uuid, RegistrationFixture>,
        users: HashMap<Uuid, UserSummary>,
        dressage: Vec<DressageScore>,
        jumping: Vec<JumpingScore>,
        endurance: Vec<EnduranceScore>,
        records: Vec<ScoreDifferenceRecord>,
    }

    #[derive(Default)]
    struct MemoryStore {
        state: Mutex<MemoryState>,
    }

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    impl MemoryStore {
        fn add_user(&self, name: &str, role: Role) -> Uuid {
            let user_id = Uuid::new_v4();
            self.state.lock().unwrap().users.insert(
                user_id,
                UserSummary {
                    user_id,
                    name: name.to_string(),
                    email: format!("{name}@example.com"),
                    role,
                },
            );
            user_id
        }

        fn add_registration(&self, class_type: ClassType, class_id: Uuid, rider: &str) -> Uuid {
            let rider_id = self.add_user(rider, Role::Rider);
            let mut state = self.state.lock().unwrap();
            let rider = state.users[&rider_id].clone();
            let registration_id = Uuid::new_v4();
            state.registrations.insert(
                registration_id,
                RegistrationFixture {
                    class_type,
                    class_id,
                    rider,
                    horse_id: Uuid::new_v4(),
                    horse_name: format!("{rider_id}-horse"),
                },
            );
            registration_id
        }

        fn dressage_count(&self) -> usize {
            self.state.lock().unwrap().dressage.len()
        }
    }

    #[async_trait]
    impl ScoringStore for MemoryStore {
        async fn registration_class(&self, registration_id: Uuid) -> Result<RegistrationClass> {
            let state = self.state.lock().unwrap();
            state
                .registrations
                .get(&registration_id)
                .map(|fixture| RegistrationClass {
                    registration_id,
                    class_type: fixture.class_type,
                })
                .ok_or(StorageError::NotFound)
        }

        async fn append_dressage_score(&self, new: NewDressageScore) -> Result<DressageScore> {
            let mut state = self.state.lock().unwrap();
            let number = scoring::next_move_number(
                state
                    .dressage
                    .iter()
                    .filter(|s| s.registration_id == new.registration_id && s.judge_id == new.judge_id)
                    .map(|s| s.move_label.as_str()),
            );

            let score = DressageScore {
                score_id: Uuid::new_v4(),
                registration_id: new.registration_id,
                judge_id: new.judge_id,
                move_label: scoring::move_label(number),
                multiplier: new.computation.multiplier,
                scores: new.computation.scores,
                total_score: new.computation.total_score,
                value: new.computation.value,
                comment: new.comment,
                created_at: timestamp(),
            };
            state.dressage.push(score.clone());
            Ok(score)
        }

        async fn find_dressage_score(&self, score_id: Uuid) -> Result<DressageScore> {
            let state = self.state.lock().unwrap();
            state
                .dressage
                .iter()
                .find(|s| s.score_id == score_id)
                .cloned()
                .ok_or(StorageError::NotFound)
        }

        async fn update_dressage_score(
            &self,
            score_id: Uuid,
            computation: &DressageComputation,
            comment: Option<String>,
        ) -> Result<DressageScore> {
            let mut state = self.state.lock().unwrap();
            let score = state
                .dressage
                .iter_mut()
                .find(|s| s.score_id == score_id)
                .ok_or(StorageError::NotFound)?;
            score.multiplier = computation.multiplier;
            score.scores = computation.scores;
            score.total_score = computation.total_score;
            score.value = computation.value.clone();
            score.comment = comment;
            Ok(score.clone())
        }

        async fn dressage_scores_by_judge(&self, judge_id: Uuid) -> Result<Vec<DressageScore>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .dressage
                .iter()
                .filter(|s| s.judge_id == judge_id)
                .cloned()
                .collect())
        }

        async fn dressage_scores_for_registration(
            &self,
            registration_id: Uuid,
        ) -> Result<Vec<DressageScore>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .dressage
                .iter()
                .filter(|s| s.registration_id == registration_id)
                .cloned()
                .collect())
        }

        async fn insert_jumping_score(
            &self,
            registration_id: Uuid,
            judge_id: Uuid,
            computation: &JumpingComputation,
        ) -> Result<JumpingScore> {
            let score = JumpingScore {
                score_id: Uuid::new_v4(),
                registration_id,
                judge_id,
                faults: computation.faults,
                time: computation.time,
                total_score: computation.total_score,
                value: computation.value.clone(),
                created_at: timestamp(),
            };
            self.state.lock().unwrap().jumping.push(score.clone());
            Ok(score)
        }

        async fn find_jumping_score(&self, score_id: Uuid) -> Result<JumpingScore> {
            let state = self.state.lock().unwrap();
            state
                .jumping
                .iter()
                .find(|s| s.score_id == score_id)
                .cloned()
                .ok_or(StorageError::NotFound)
        }

        async fn update_jumping_score(
            &self,
            score_id: Uuid,
            computation: &JumpingComputation,
        ) -> Result<JumpingScore> {
            let mut state = self.state.lock().unwrap();
            let score = state
                .jumping
                .iter_mut()
                .find(|s| s.score_id == score_id)
                .ok_or(StorageError::NotFound)?;
            score.faults = computation.faults;
            score.time = computation.time;
            score.total_score = computation.total_score;
            score.value = computation.value.clone();
            Ok(score.clone())
        }

        async fn jumping_standings(&self, class_id: Option<Uuid>) -> Result<Vec<JumpingStanding>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .jumping
                .iter()
                .filter_map(|s| {
                    let fixture = state.registrations.get(&s.registration_id)?;
                    if class_id.is_some_and(|id| id != fixture.class_id) {
                        return None;
                    }
                    Some(JumpingStanding {
                        score_id: s.score_id,
                        registration_id: s.registration_id,
                        judge_id: s.judge_id,
                        faults: s.faults,
                        time: s.time,
                        total_score: s.total_score,
                        value: s.value.clone(),
                        rider_id: fixture.rider.user_id,
                        rider_name: fixture.rider.name.clone(),
                        rider_email: fixture.rider.email.clone(),
                        horse_id: fixture.horse_id,
                        horse_name: fixture.horse_name.clone(),
                    })
                })
                .collect())
        }

        async fn jumping_scores_for_registration(
            &self,
            registration_id: Uuid,
        ) -> Result<Vec<JumpingScore>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .jumping
                .iter()
                .filter(|s| s.registration_id == registration_id)
                .cloned()
                .collect())
        }

        async fn insert_endurance_score(
            &self,
            registration_id: Uuid,
            judge_id: Uuid,
            at: NaiveDateTime,
        ) -> Result<EnduranceScore> {
            let score = EnduranceScore {
                score_id: Uuid::new_v4(),
                registration_id,
                judge_id,
                arrival: at,
                departure: at,
                recovery: at,
                elapsed_time: None,
                created_at: at,
            };
            self.state.lock().unwrap().endurance.push(score.clone());
            Ok(score)
        }

        async fn find_endurance_score(&self, score_id: Uuid) -> Result<EnduranceScore> {
            let state = self.state.lock().unwrap();
            state
                .endurance
                .iter()
                .find(|s| s.score_id == score_id)
                .cloned()
                .ok_or(StorageError::NotFound)
        }

        async fn update_endurance_score(&self, score: &EnduranceScore) -> Result<EnduranceScore> {
            let mut state = self.state.lock().unwrap();
            let stored = state
                .endurance
                .iter_mut()
                .find(|s| s.score_id == score.score_id)
                .ok_or(StorageError::NotFound)?;
            *stored = score.clone();
            Ok(stored.clone())
        }

        async fn endurance_scores_for_registration(
            &self,
            registration_id: Uuid,
        ) -> Result<Vec<EnduranceScore>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .endurance
                .iter()
                .filter(|s| s.registration_id == registration_id)
                .cloned()
                .collect())
        }

        async fn insert_difference_record(
            &self,
            registration_id: Uuid,
            user_id: Uuid,
            total_average_difference: f64,
        ) -> Result<ScoreDifferenceRecord> {
            let record = ScoreDifferenceRecord {
                record_id: Uuid::new_v4(),
                registration_id,
                user_id,
                total_average_difference,
                created_at: timestamp(),
            };
            self.state.lock().unwrap().records.push(record.clone());
            Ok(record)
        }

        async fn difference_records(
            &self,
            registration_id: Uuid,
        ) -> Result<Vec<ScoreDifferenceRecord>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .records
                .iter()
                .rev()
                .filter(|r| r.registration_id == registration_id)
                .cloned()
                .collect())
        }

        async fn user_scores_for_registration(
            &self,
            registration_id: Uuid,
            user_id: Uuid,
        ) -> Result<UserRegistrationScores> {
            let state = self.state.lock().unwrap();
            let mine = |r: Uuid, j: Uuid| r == registration_id && j == user_id;
            Ok(UserRegistrationScores {
                jumping: state
                    .jumping
                    .iter()
                    .filter(|s| mine(s.registration_id, s.judge_id))
                    .cloned()
                    .collect(),
                dressage: state
                    .dressage
                    .iter()
                    .filter(|s| mine(s.registration_id, s.judge_id))
                    .cloned()
                    .collect(),
                endurance: state
                    .endurance
                    .iter()
                    .filter(|s| mine(s.registration_id, s.judge_id))
                    .cloned()
                    .collect(),
            })
        }

        async fn find_user_summary(&self, user_id: Uuid) -> Result<UserSummary> {
            let state = self.state.lock().unwrap();
            state.users.get(&user_id).cloned().ok_or(StorageError::NotFound)
        }

        async fn user_summaries(&self, user_ids: &[Uuid]) -> Result<Vec<UserSummary>> {
            let state = self.state.lock().unwrap();
            Ok(user_ids
                .iter()
                .filter_map(|id| state.users.get(id).cloned())
                .collect())
        }
    }

    fn dressage_request(registration_id: Uuid, scores: f64) -> CreateDressageScoreRequest {
        CreateDressageScoreRequest {
            registration_id,
            multiplier: None,
            comment: None,
            scores,
        }
    }

    fn jumping_request(registration_id: Uuid, faults: i32, time: f64) -> CreateJumpingScoreRequest {
        CreateJumpingScoreRequest {
            registration_id,
            faults,
            time,
        }
    }

    #[tokio::test]
    async fn test_move_numbers_are_per_judge() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::Dressage, Uuid::new_v4(), "rider");
        let (judge_a, judge_b) = (
            store.add_user("judge-a", Role::Judge),
            store.add_user("judge-b", Role::Judge),
        );

        for _ in 0..2 {
            create_dressage_score(&store, judge_a, &dressage_request(registration, 7.0))
                .await
                .unwrap();
        }
        for _ in 0..4 {
            create_dressage_score(&store, judge_b, &dressage_request(registration, 6.0))
                .await
                .unwrap();
        }

        let third = create_dressage_score(&store, judge_a, &dressage_request(registration, 8.0))
            .await
            .unwrap();

        assert_eq!(third.dressage_score.move_label, "move#3");
        assert_eq!(third.all_scores.len(), 3);
        assert!(third.all_scores.iter().all(|s| s.judge_id == judge_a));
    }

    #[tokio::test]
    async fn test_dressage_multiplier_and_sentinel() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::Dressage, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);

        let req = CreateDressageScoreRequest {
            registration_id: registration,
            multiplier: Some(MultiplierInput::Text("x2".to_string())),
            comment: Some("fell at C".to_string()),
            scores: -3.0,
        };
        let created = create_dressage_score(&store, judge, &req).await.unwrap();

        assert_eq!(created.dressage_score.multiplier, 2.0);
        assert_eq!(created.dressage_score.total_score, -6.0);
        assert_eq!(created.dressage_score.value, "RF-D");
    }

    #[tokio::test]
    async fn test_class_mismatch_rejected_before_insert() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::ShowJumping, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);

        let err = create_dressage_score(&store, judge, &dressage_request(registration, 7.0))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Validation(_)));
        assert_eq!(store.dressage_count(), 0);

        let err = create_endurance_score(&store, judge, registration, timestamp())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_registration_is_not_found() {
        let store = MemoryStore::default();
        let judge = store.add_user("judge", Role::Judge);

        let err = create_jumping_score(&store, judge, &jumping_request(Uuid::new_v4(), 0, 60.0))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_update_dressage_recomputes_and_keeps_comment() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::Dressage, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);

        let mut req = dressage_request(registration, -2.0);
        req.comment = Some("left arena".to_string());
        let created = create_dressage_score(&store, judge, &req).await.unwrap();
        assert_eq!(created.dressage_score.value, "E-D");

        let update = UpdateDressageScoreRequest {
            multiplier: Some(MultiplierInput::Number(3.0)),
            comment: None,
            scores: 7.0,
        };
        let updated = update_dressage_score(&store, created.dressage_score.score_id, &update)
            .await
            .unwrap();

        assert_eq!(updated.dressage_score.total_score, 21.0);
        assert_eq!(updated.dressage_score.value, "");
        assert_eq!(updated.dressage_score.move_label, "move#1");
        assert_eq!(updated.dressage_score.comment.as_deref(), Some("left arena"));
    }

    #[tokio::test]
    async fn test_supervisor_edit_lists_the_judges_scores() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::Dressage, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);
        let supervisor = store.add_user("supervisor", Role::Supervisor);

        let first = create_dressage_score(&store, judge, &dressage_request(registration, 6.0))
            .await
            .unwrap();
        create_dressage_score(&store, judge, &dressage_request(registration, 7.0))
            .await
            .unwrap();
        create_dressage_score(&store, supervisor, &dressage_request(registration, 5.0))
            .await
            .unwrap();

        let update = UpdateDressageScoreRequest {
            multiplier: None,
            comment: None,
            scores: 8.0,
        };
        let updated = update_dressage_score(&store, first.dressage_score.score_id, &update)
            .await
            .unwrap();

        assert_eq!(updated.dressage_score.judge_id, judge);
        assert_eq!(updated.all_scores.len(), 2);
        assert!(updated.all_scores.iter().all(|s| s.judge_id == judge));
    }

    #[tokio::test]
    async fn test_jumping_eliminated_round() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::ShowJumping, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);

        let score = create_jumping_score(&store, judge, &jumping_request(registration, 999, 70.0))
            .await
            .unwrap();

        assert_eq!(score.value.as_deref(), Some("E-J"));
        assert_eq!(score.total_score, 9990.0 + 70.0);
    }

    #[tokio::test]
    async fn test_jumping_edit_clears_value_for_ordinary_faults() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::ShowJumping, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);

        let score = create_jumping_score(&store, judge, &jumping_request(registration, 997, 50.0))
            .await
            .unwrap();
        let updated = update_jumping_score(
            &store,
            score.score_id,
            &UpdateJumpingScoreRequest {
                faults: 4,
                time: 58.0,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.value, None);
        assert_eq!(updated.total_score, 98.0);

        let err = update_jumping_score(
            &store,
            Uuid::new_v4(),
            &UpdateJumpingScoreRequest {
                faults: 0,
                time: 1.0,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_winner_has_fewest_faults_then_fastest_time() {
        let store = MemoryStore::default();
        let class_id = Uuid::new_v4();
        let judge = store.add_user("judge", Role::Judge);
        let four_faults = store.add_registration(ClassType::ShowJumping, class_id, "four");
        let clear = store.add_registration(ClassType::ShowJumping, class_id, "clear");
        let other_class = store.add_registration(ClassType::ShowJumping, Uuid::new_v4(), "other");

        for (registration, faults, time) in [
            (four_faults, 4, 60.0),
            (clear, 0, 70.0),
            (other_class, 0, 40.0),
        ] {
            create_jumping_score(&store, judge, &jumping_request(registration, faults, time))
                .await
                .unwrap();
        }

        let winner = jumping_winner(&store, Some(class_id)).await.unwrap();
        assert_eq!(winner.rider_name, "clear");

        let overall = jumping_winner(&store, None).await.unwrap();
        assert_eq!(overall.rider_name, "other");
    }

    #[tokio::test]
    async fn test_winner_without_scores_is_not_found() {
        let store = MemoryStore::default();
        let err = jumping_winner(&store, None).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_consistency_appends_a_record_per_run() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::Dressage, Uuid::new_v4(), "rider");
        let (judge_a, judge_b) = (
            store.add_user("judge-a", Role::Judge),
            store.add_user("judge-b", Role::Judge),
        );
        let supervisor = store.add_user("supervisor", Role::Supervisor);

        create_dressage_score(&store, judge_a, &dressage_request(registration, 8.0))
            .await
            .unwrap();
        create_dressage_score(&store, judge_b, &dressage_request(registration, 6.5))
            .await
            .unwrap();

        let first = record_consistency(&store, registration, supervisor).await.unwrap();
        let second = record_consistency(&store, registration, supervisor).await.unwrap();

        assert_eq!(first.total_average_difference, "150.00%");
        assert_eq!(first.total_difference_sum, 1.5);
        assert_eq!(first.move_differences.len(), 1);
        assert_eq!(first.record.total_average_difference, 150.0);
        assert_eq!(first.record.user_id, supervisor);

        assert_ne!(first.record.record_id, second.record.record_id);
        assert_eq!(
            first.record.total_average_difference,
            second.record.total_average_difference
        );

        let history = consistency_history(&store, registration).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].record_id, second.record.record_id);
    }

    #[tokio::test]
    async fn test_endurance_clock_update() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::Endurance, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);
        let opened = create_endurance_score(&store, judge, registration, timestamp())
            .await
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let req = UpdateEnduranceScoreRequest {
            arrival: Some("12:30:15".to_string()),
            departure: None,
            recovery: Some("12:45:00".to_string()),
            elapsed_time: Some(16_215.0),
        };
        let updated = update_endurance_score(&store, opened.score_id, &req, today)
            .await
            .unwrap();

        assert_eq!(updated.arrival, today.and_hms_opt(12, 30, 15).unwrap());
        assert_eq!(updated.departure, timestamp());
        assert_eq!(updated.recovery, today.and_hms_opt(12, 45, 0).unwrap());
        assert_eq!(updated.elapsed_time, Some(16_215.0));
    }

    #[tokio::test]
    async fn test_endurance_malformed_clock_is_rejected() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::Endurance, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);
        let opened = create_endurance_score(&store, judge, registration, timestamp())
            .await
            .unwrap();

        let req = UpdateEnduranceScoreRequest {
            arrival: Some("12:30".to_string()),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let err = update_endurance_score(&store, opened.score_id, &req, today)
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Validation(_)));
        let stored = store.find_endurance_score(opened.score_id).await.unwrap();
        assert_eq!(stored.arrival, timestamp());
    }

    #[tokio::test]
    async fn test_user_scores_are_tagged_by_discipline() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::Dressage, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);
        let other = store.add_user("other", Role::Judge);

        create_dressage_score(&store, judge, &dressage_request(registration, 7.0))
            .await
            .unwrap();
        create_dressage_score(&store, other, &dressage_request(registration, 5.0))
            .await
            .unwrap();

        let response = user_scores(&store, registration, judge).await.unwrap();

        assert_eq!(response.name, "judge");
        assert_eq!(response.scores.len(), 1);
        assert_eq!(response.scores[0].discipline, Discipline::Dressage);
        assert_eq!(response.scores[0].total_score, Some(7.0));

        let err = user_scores(&store, registration, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_registration_scores_are_ordered() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::ShowJumping, Uuid::new_v4(), "rider");
        let judge = store.add_user("judge", Role::Judge);

        for (faults, time) in [(8, 50.0), (0, 72.0), (0, 65.0)] {
            create_jumping_score(&store, judge, &jumping_request(registration, faults, time))
                .await
                .unwrap();
        }

        let RegistrationScores::ShowJumping(scores) =
            registration_scores(&store, registration, ClassType::ShowJumping)
                .await
                .unwrap()
        else {
            panic!("expected jumping scores");
        };

        let order: Vec<(i32, f64)> = scores.iter().map(|s| (s.faults, s.time)).collect();
        assert_eq!(order, [(0, 65.0), (0, 72.0), (8, 50.0)]);
    }

    #[test]
    fn test_order_endurance_puts_missing_elapsed_last() {
        let base = EnduranceScore {
            score_id: Uuid::nil(),
            registration_id: Uuid::nil(),
            judge_id: Uuid::nil(),
            arrival: timestamp(),
            departure: timestamp(),
            recovery: timestamp(),
            elapsed_time: None,
            created_at: timestamp(),
        };
        let mut scores = vec![
            base.clone(),
            EnduranceScore {
                elapsed_time: Some(900.0),
                ..base.clone()
            },
            EnduranceScore {
                elapsed_time: Some(300.0),
                ..base.clone()
            },
        ];

        order_endurance(&mut scores);

        let elapsed: Vec<Option<f64>> = scores.iter().map(|s| s.elapsed_time).collect();
        assert_eq!(elapsed, [Some(300.0), Some(900.0), None]);
    }

    #[tokio::test]
    async fn test_judge_scores_grouped_with_serial_numbers() {
        let store = MemoryStore::default();
        let registration = store.add_registration(ClassType::ShowJumping, Uuid::new_v4(), "rider");
        let (judge_a, judge_b) = (
            store.add_user("judge-a", Role::Judge),
            store.add_user("judge-b", Role::Judge),
        );

        for (judge, faults) in [(judge_b, 4), (judge_a, 0), (judge_b, 8)] {
            create_jumping_score(&store, judge, &jumping_request(registration, faults, 60.0))
                .await
                .unwrap();
        }

        let response = judge_scores(&store, registration).await.unwrap();

        assert_eq!(response.registration_id, registration);
        assert_eq!(response.scores.len(), 2);
        assert_eq!(response.scores[0].serial_number, 1);
        assert_eq!(response.scores[0].judge.name, "judge-b");
        assert_eq!(response.scores[0].scores.len(), 2);
        assert_eq!(response.scores[1].judge.name, "judge-a");
    }
}
