pub mod article;
pub mod competition_class;
pub mod event;
pub mod horse;
pub mod registration;
pub mod score;
pub mod stable;
pub mod user;

pub use article::ArticleRepository;
pub use competition_class::CompetitionClassRepository;
pub use event::EventRepository;
pub use horse::HorseRepository;
pub use registration::RegistrationRepository;
pub use score::ScoreRepository;
pub use stable::StableRepository;
pub use user::UserRepository;
