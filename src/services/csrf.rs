//! Session-bound CSRF tokens for form posts

use rand::{distributions::Alphanumeric, Rng};
use tower_sessions::Session;

use crate::{error::RequestError, models::session::keys};

const TOKEN_LENGTH: usize = 32;

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Token for the session, created on first use
pub async fn ensure_token(session: &Session) -> Result<String, tower_sessions::session::Error> {
    if let Some(token) = session.get::<String>(keys::CSRF_TOKEN).await? {
        return Ok(token);
    }

    let token = generate_token();
    session.insert(keys::CSRF_TOKEN, &token).await?;
    Ok(token)
}

/// Check a submitted token against the one issued to the session
pub fn verify(expected: Option<&str>, submitted: &str) -> Result<(), RequestError> {
    match expected {
        Some(expected) if !submitted.is_empty() && constant_time_eq(expected, submitted) => Ok(()),
        _ => Err(RequestError::Csrf),
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}
