//! Meeting management API: CRUD over meetings plus cookie-session
//! register/login/logout.

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod serializers;
