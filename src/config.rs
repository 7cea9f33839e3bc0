//! Application configuration loaded from environment variables.

use std::env;

use actix_web::cookie::Key;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/meetings.db";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// Minimum key material accepted by the cookie session store.
pub const SESSION_KEY_MIN_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server.
    pub listen_addr: String,
    /// SQLite connection string, e.g. `sqlite://data/meetings.db`.
    pub database_url: String,
    pub max_connections: u32,
    /// Raw `SESSION_KEY`, if one was provided.
    pub session_key: Option<String>,
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// All variables are optional: `DATABASE_URL`, `LISTEN_ADDR`,
    /// `DB_MAX_CONNECTIONS`, `SESSION_KEY`, `COOKIE_SECURE`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let listen_addr = lookup("LISTEN_ADDR")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or("DB_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let cookie_secure = match lookup("COOKIE_SECURE").as_deref().map(str::trim) {
            None | Some("") => false,
            Some("1") | Some("true") | Some("TRUE") | Some("yes") => true,
            Some("0") | Some("false") | Some("FALSE") | Some("no") => false,
            Some(_) => return Err("COOKIE_SECURE must be true or false".to_string()),
        };
        let session_key = lookup("SESSION_KEY").filter(|s| !s.is_empty());

        Ok(Self {
            listen_addr,
            database_url,
            max_connections,
            session_key,
            cookie_secure,
        })
    }

    /// Cookie signing/encryption key. Falls back to a random key, which
    /// invalidates all sessions on restart.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= SESSION_KEY_MIN_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {}+), generating random key",
                    val.len(),
                    SESSION_KEY_MIN_LEN
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}
