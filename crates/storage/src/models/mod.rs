pub mod article;
pub mod competition_class;
pub mod dressage_score;
pub mod endurance_score;
pub mod event;
pub mod horse;
pub mod jumping_score;
pub mod registration;
pub mod score_difference;
pub mod stable;
pub mod user;

pub use article::{Article, DressageArticle, EnduranceArticle, JumpingArticle};
pub use competition_class::{ClassType, CompetitionClass};
pub use dressage_score::DressageScore;
pub use endurance_score::EnduranceScore;
pub use event::{Event, EventStatus};
pub use horse::Horse;
pub use jumping_score::JumpingScore;
pub use registration::{Registration, RegistrationClass};
pub use score_difference::ScoreDifferenceRecord;
pub use stable::Stable;
pub use user::{Role, User, UserSession};
