pub mod article;
pub mod auth;
pub mod competition_class;
pub mod event;
pub mod horse;
pub mod registration;
pub mod score;
pub mod stable;
pub mod user;
