use actix_session::{Session, SessionMiddleware, config::CookieContentSecurity, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::errors::AppError;
use crate::models::user::User;

pub const SESSION_COOKIE: &str = "sessionid";

const USER_ID_KEY: &str = "user_id";
const USERNAME_KEY: &str = "username";

/// Encrypted, http-only cookie session carrying the logged-in user.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_secure(secure)
        .cookie_http_only(true)
        .build()
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID_KEY).unwrap_or(None)
}

pub fn get_username(session: &Session) -> Option<String> {
    session.get::<String>(USERNAME_KEY).unwrap_or(None)
}

/// Bind the session to `user`, issuing a fresh session so a pre-login
/// cookie cannot be reused.
pub fn login(session: &Session, user: &User) -> Result<(), AppError> {
    session.renew();
    session.insert(USER_ID_KEY, user.id)?;
    session.insert(USERNAME_KEY, &user.username)?;
    Ok(())
}

pub fn logout(session: &Session) {
    session.purge();
}
