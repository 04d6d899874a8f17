use anyhow::{Result, anyhow};

use crate::store::Store;

/// Pure header construction: a token in, a header pair out. Deciding
/// what to do about a missing token is the caller's problem, not the
/// header builder's.
pub fn bearer_header(token: Option<&str>) -> Option<(&'static str, String)> {
    let token = token?.trim();
    if token.is_empty() {
        return None;
    }
    Some(("Authorization", format!("Bearer {}", token)))
}

/// Explicit auth guard for commands that need a session. Fails with a
/// login hint instead of silently sending an unauthenticated request.
pub fn require_auth(store: &Store) -> Result<String> {
    store
        .token()
        .ok_or_else(|| anyhow!("Not logged in. Run 'jobdeck login' first."))
}

/// The one 401 path: drop the stored token so the next command hits
/// the guard above instead of replaying a dead session.
pub fn expire(store: &Store) -> Result<()> {
    tracing::warn!("Session expired (401 from backend), clearing stored token");
    store.clear_token()
}
