pub mod articles;
pub mod auth;
pub mod classes;
pub mod events;
pub mod horses;
pub mod registrations;
pub mod scores;
pub mod stables;
pub mod users;
