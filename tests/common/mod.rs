//! Shared test infrastructure.
//!
//! - `setup_test_db()` - fresh in-memory SQLite database with migrations applied
//! - `test_app!(pool)` - full actix service over that pool
//! - `login_cookie!(app, username, password)` - session cookie for a logged-in user

#![allow(dead_code, unused_macros)]

use chrono::{NaiveDate, NaiveTime};
use sqlx::sqlite::SqlitePoolOptions;

use meetings::auth::password;
use meetings::db::{self, DbPool};
use meetings::models::meeting::{MeetingStatus, NewMeeting};
use meetings::models::user::{self, NewUser};

pub const TEST_SESSION_KEY: [u8; 64] = [7; 64];
pub const TEST_USER: &str = "alice";
pub const TEST_PASS: &str = "wonderland-42";

pub struct TestDb {
    pool: DbPool,
}

impl TestDb {
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Every in-memory connection is its own database, so the pool is pinned
/// to a single connection that never expires.
pub async fn setup_test_db() -> TestDb {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory DB");
    db::run_migrations(&pool).await.expect("Failed to run migrations");
    TestDb { pool }
}

pub async fn create_user(pool: &DbPool, username: &str, plain: &str) -> i64 {
    let hash = password::hash_password(plain).expect("hash");
    user::create(
        pool,
        &NewUser {
            username: username.to_string(),
            password: hash,
        },
    )
    .await
    .expect("create user")
}

pub async fn count_users(pool: &DbPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .expect("count users")
}

pub fn new_meeting(agenda: &str, date: (i32, u32, u32), time: (u32, u32)) -> NewMeeting {
    NewMeeting {
        agenda: agenda.to_string(),
        status: MeetingStatus::Upcoming,
        date_of_meeting: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("date"),
        start_time: NaiveTime::from_hms_opt(time.0, time.1, 0).expect("time"),
        meeting_url: format!("https://meet.example.com/{}", agenda.replace(' ', "-")),
    }
}

macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(meetings::auth::session::session_middleware(
                    actix_web::cookie::Key::from(&common::TEST_SESSION_KEY),
                    false,
                ))
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new(
                    meetings::auth::rate_limit::RateLimiter::default(),
                ))
                .configure(meetings::handlers::configure),
        )
        .await
    };
}

macro_rules! login_cookie {
    ($app:expr, $username:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/login/")
            .set_json(serde_json::json!({ "username": $username, "password": $password }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK, "login failed");
        resp.response()
            .cookies()
            .find(|c| c.name() == meetings::auth::session::SESSION_COOKIE)
            .expect("session cookie")
            .into_owned()
    }};
}
