use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{FieldErrors, check_text, read_string};

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MAX_LEN: usize = 128;

const INVALID_USERNAME: &str = "Enter a valid username. This value may contain only letters, \
                                numbers, and @/./+/-/_ characters.";

/// Validated registration input. The password is still plaintext.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub username: String,
    pub password: String,
}

/// Validate a register body: `{username, password}`.
pub fn validate_registration(data: &Map<String, Value>) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = read_string(data, "username", true)
        .and_then(|v| check_text(&v.unwrap_or_default(), USERNAME_MAX_LEN))
        .and_then(|name| {
            if name.chars().all(|c| c.is_alphanumeric() || "_@.+-".contains(c)) {
                Ok(name)
            } else {
                Err(INVALID_USERNAME.to_string())
            }
        })
        .map_err(|e| errors.add("username", e))
        .ok();

    // trimmed like every other text field before it is hashed
    let password = read_string(data, "password", true)
        .and_then(|v| check_text(&v.unwrap_or_default(), PASSWORD_MAX_LEN))
        .map_err(|e| errors.add("password", e))
        .ok();

    match (username, password) {
        (Some(username), Some(password)) => errors.finish(Registration { username, password }),
        _ => Err(errors),
    }
}

/// Public view of a user; the password is never echoed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

/// Login credentials. Anything that is not a string counts as missing,
/// which then fails like any other bad credential.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials<'a> {
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

impl<'a> Credentials<'a> {
    pub fn from_body(data: &'a Map<String, Value>) -> Self {
        Self {
            username: data.get("username").and_then(Value::as_str),
            password: data.get("password").and_then(Value::as_str),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
