use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{Map, Value};

use crate::auth::{password, rate_limit::RateLimiter, session};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user;
use crate::serializers::user::{
    Credentials, LoginResponse, MessageResponse, UserResponse, validate_registration,
};

/// POST /register/: open to anyone.
pub async fn register(
    pool: web::Data<DbPool>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let registration = validate_registration(&body)?;
    let hashed = password::hash_password(&registration.password)?;

    let new = user::NewUser {
        username: registration.username,
        password: hashed,
    };
    let id = user::create(&pool, &new).await?;

    log::info!("registered user {} ({})", id, new.username);
    Ok(HttpResponse::Created().json(UserResponse {
        id,
        username: new.username,
    }))
}

/// POST /login/: every failure looks the same to the caller.
pub async fn login(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<Map<String, Value>>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    // Rate-limit check BEFORE any database access
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        log::warn!("login blocked for {ip}: too many failed attempts");
        return Err(AppError::TooManyAttempts);
    }

    let creds = Credentials::from_body(&body);
    let (Some(username), Some(candidate)) = (creds.username, creds.password) else {
        limiter.record_failure(ip);
        return Err(AppError::InvalidCredentials);
    };

    let found = match user::find_by_username(&pool, username).await? {
        Some(u) => Some(u).filter(|u| {
            password::verify_password(candidate, &u.password).unwrap_or(false)
        }),
        None => {
            password::burn_hash(candidate);
            None
        }
    };

    let Some(u) = found else {
        limiter.record_failure(ip);
        log::warn!("failed login for '{username}' from {ip}");
        return Err(AppError::InvalidCredentials);
    };

    // session is written last; a failed request must not leave a login behind
    user::record_login(&pool, u.id).await?;
    limiter.clear(ip);
    session::login(&session, &u)?;

    log::info!("user {} logged in", u.id);
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: u.id,
        username: u.username,
    }))
}

/// POST /logout/: requires a session.
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    let user_id = session::get_user_id(&session).unwrap_or(0);
    let username = session::get_username(&session).unwrap_or_default();
    session::logout(&session);

    log::info!("user {user_id} ({username}) logged out");
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}
