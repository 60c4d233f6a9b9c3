//! Rules for test sheets: which lines a sheet accepts and how lines are
//! labelled and grouped under their sheet.

use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::article::{ArticleDetail, CreateDressageArticleRequest};
use crate::dto::score::MultiplierInput;
use crate::error::{Result, StorageError};
use crate::models::{Article, ClassType, DressageArticle, EnduranceArticle, JumpingArticle};
use crate::services::scoring;

/// Resolved dressage line, ready to store
#[derive(Debug, Clone, PartialEq)]
pub struct DressageLine {
    pub move_label: String,
    pub multiplier: f64,
}

/// Rejects a line whose discipline does not match the sheet's.
pub fn ensure_article_type(article: &Article, expected: ClassType) -> Result<()> {
    if article.article_type != expected {
        return Err(StorageError::Validation(format!(
            "Article is {}, not {}",
            article.article_type, expected
        )));
    }

    Ok(())
}

/// Multipliers go through the same parsing as dressage scores, so `"x2"`
/// on a sheet means what it means on a score.
pub fn dressage_line(req: &CreateDressageArticleRequest) -> DressageLine {
    DressageLine {
        move_label: scoring::move_label(req.moves),
        multiplier: MultiplierInput::resolve(req.multiplier.as_ref()),
    }
}

pub fn gate_label(number: i64) -> String {
    format!("Gate#{number}")
}

/// Groups lines under their sheets, keeping the order of `articles`.
/// Lines whose sheet is not in `articles` are dropped.
pub fn attach_lines(
    articles: Vec<Article>,
    dressage: Vec<DressageArticle>,
    jumping: Vec<JumpingArticle>,
    endurance: Vec<EnduranceArticle>,
) -> Vec<ArticleDetail> {
    let mut details: Vec<ArticleDetail> = articles
        .into_iter()
        .map(|article| ArticleDetail {
            article,
            dressage_articles: Vec::new(),
            jumping_articles: Vec::new(),
            endurance_articles: Vec::new(),
        })
        .collect();

    let index: HashMap<Uuid, usize> = details
        .iter()
        .enumerate()
        .map(|(i, detail)| (detail.article.article_id, i))
        .collect();

    for line in dressage {
        if let Some(&i) = index.get(&line.article_id) {
            details[i].dressage_articles.push(line);
        }
    }
    for line in jumping {
        if let Some(&i) = index.get(&line.article_id) {
            details[i].jumping_articles.push(line);
        }
    }
    for line in endurance {
        if let Some(&i) = index.get(&line.article_id) {
            details[i].endurance_articles.push(line);
        }
    }

    details
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn article(article_type: ClassType) -> Article {
        Article {
            article_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Novice test A".to_string(),
            article_type,
            created_at: at(),
        }
    }

    fn dressage_article(article_id: Uuid, move_label: &str) -> DressageArticle {
        DressageArticle {
            dressage_article_id: Uuid::new_v4(),
            article_id,
            user_id: Uuid::new_v4(),
            move_label: move_label.to_string(),
            multiplier: 1.0,
            created_at: at(),
        }
    }

    fn jumping_article(article_id: Uuid, priority: i32) -> JumpingArticle {
        JumpingArticle {
            jumping_article_id: Uuid::new_v4(),
            article_id,
            user_id: Uuid::new_v4(),
            input: "Oxer".to_string(),
            sort_priority: priority,
            created_at: at(),
        }
    }

    fn endurance_article(article_id: Uuid, number: i64) -> EnduranceArticle {
        EnduranceArticle {
            endurance_article_id: Uuid::new_v4(),
            article_id,
            user_id: Uuid::new_v4(),
            gate: gate_label(number),
            created_at: at(),
        }
    }

    #[test]
    fn test_ensure_article_type() {
        let sheet = article(ClassType::Dressage);

        assert!(ensure_article_type(&sheet, ClassType::Dressage).is_ok());

        let err = ensure_article_type(&sheet, ClassType::ShowJumping).unwrap_err();
        match err {
            StorageError::Validation(message) => {
                assert_eq!(message, "Article is DRESSAGE, not SHOW_JUMPING")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_dressage_line_labels_and_parses_multiplier() {
        let req = CreateDressageArticleRequest {
            moves: 4,
            multiplier: Some(MultiplierInput::Text("x2".to_string())),
        };

        let line = dressage_line(&req);
        assert_eq!(line.move_label, "move#4");
        assert_eq!(line.multiplier, 2.0);
    }

    #[test]
    fn test_dressage_line_defaults_unreadable_multiplier() {
        for multiplier in [None, Some(MultiplierInput::Text("coef".to_string()))] {
            let line = dressage_line(&CreateDressageArticleRequest { moves: 1, multiplier });
            assert_eq!(line.multiplier, scoring::DEFAULT_MULTIPLIER);
        }
    }

    #[test]
    fn test_gate_label() {
        assert_eq!(gate_label(3), "Gate#3");
    }

    #[test]
    fn test_attach_lines_groups_by_sheet() {
        let dressage = article(ClassType::Dressage);
        let jumping = article(ClassType::ShowJumping);
        let endurance = article(ClassType::Endurance);
        let (d, j, e) = (dressage.article_id, jumping.article_id, endurance.article_id);

        let details = attach_lines(
            vec![dressage, jumping, endurance],
            vec![dressage_article(d, "move#1"), dressage_article(d, "move#2")],
            vec![jumping_article(j, 1)],
            vec![endurance_article(e, 1), endurance_article(Uuid::new_v4(), 2)],
        );

        assert_eq!(details.len(), 3);
        assert_eq!(details[0].article.article_id, d);
        assert_eq!(details[0].dressage_articles.len(), 2);
        assert!(details[0].jumping_articles.is_empty());
        assert_eq!(details[1].jumping_articles.len(), 1);
        assert_eq!(details[2].endurance_articles.len(), 1);
        assert_eq!(details[2].endurance_articles[0].gate, "Gate#1");
    }

    #[test]
    fn test_attach_lines_keeps_empty_sheets() {
        let details = attach_lines(vec![article(ClassType::Endurance)], vec![], vec![], vec![]);

        assert_eq!(details.len(), 1);
        assert!(details[0].endurance_articles.is_empty());
    }
}
