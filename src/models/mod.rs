pub mod meeting;
pub mod user;
