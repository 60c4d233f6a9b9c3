use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::score::MultiplierInput;
use crate::models::{Article, ClassType, DressageArticle, EnduranceArticle, JumpingArticle};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateArticleRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[serde(rename = "type")]
    pub article_type: ClassType,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub article_type: Option<ClassType>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDressageArticleRequest {
    /// Movement number, stored as `move#<n>`
    #[validate(range(min = 1, message = "Move number must be positive"))]
    pub moves: i64,
    pub multiplier: Option<MultiplierInput>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateJumpingArticleRequest {
    #[validate(length(min = 1, max = 255))]
    pub input: String,
    #[serde(default)]
    pub sort_priority: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEnduranceArticleRequest {
    /// Gate number, stored as `Gate#<n>`
    #[validate(range(min = 1, message = "Gate number must be positive"))]
    pub gate: i64,
}

/// A sheet with all of its lines
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ArticleDetail {
    pub article: Article,
    pub dressage_articles: Vec<DressageArticle>,
    pub jumping_articles: Vec<JumpingArticle>,
    pub endurance_articles: Vec<EnduranceArticle>,
}
