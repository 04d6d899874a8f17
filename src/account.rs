use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::models::{User, UserStats};
use crate::store::Store;

/// Register a new account. The backend responds with a session token,
/// which is persisted immediately so the user is logged in.
pub fn register(
    api: &ApiClient,
    store: &Store,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User> {
    let value = api
        .post(
            "/users/register",
            &json!({ "name": name, "email": email, "password": password }),
        )
        .inspect_err(|e| tracing::error!("Registration failed: {e}"))?;
    persist_token(store, &value)?;
    extract_user(&value)
}

pub fn login(api: &ApiClient, store: &Store, email: &str, password: &str) -> Result<User> {
    let value = api
        .post("/users/login", &json!({ "email": email, "password": password }))
        .inspect_err(|e| tracing::error!("Login failed: {e}"))?;
    persist_token(store, &value)?;
    extract_user(&value)
}

/// Logout is purely local: the backend keeps no session state beyond
/// the token itself.
pub fn logout(store: &Store) -> Result<()> {
    store.clear_token()
}

pub fn me(api: &ApiClient) -> Result<User> {
    let value = api.get("/users/me", &[])?;
    extract_user(&value)
}

pub fn stats(api: &ApiClient) -> UserStats {
    match api.get("/users/stats", &[]) {
        Ok(value) => {
            let body = value.get("stats").cloned().unwrap_or(value);
            serde_json::from_value(body).unwrap_or_default()
        }
        Err(e) => {
            tracing::warn!("Stats fetch failed: {e}");
            UserStats::default()
        }
    }
}

fn persist_token(store: &Store, value: &Value) -> Result<()> {
    let token = value
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("Backend response did not include a session token"))?;
    store.set_token(token)
}

fn extract_user(value: &Value) -> Result<User> {
    let body = value.get("user").cloned().unwrap_or_else(|| value.clone());
    serde_json::from_value(body).context("Unexpected user shape from backend")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_persist_token_from_login_response() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();

        let value = json!({"token": "tok-1", "user": {"_id": "u1", "email": "a@b.c"}});
        persist_token(&store, &value).unwrap();
        assert_eq!(store.token().as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_persist_token_missing_is_error() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();

        let err = persist_token(&store, &json!({"user": {}})).unwrap_err();
        assert!(err.to_string().contains("token"));
        assert!(store.token().is_none());
    }

    #[test]
    fn test_extract_user_enveloped_or_bare() {
        let enveloped = json!({"user": {"_id": "u1", "name": "Ada", "email": "a@b.c"}});
        let user = extract_user(&enveloped).unwrap();
        assert_eq!(user.name, "Ada");

        let bare = json!({"_id": "u1", "email": "a@b.c"});
        let user = extract_user(&bare).unwrap();
        assert_eq!(user.email, "a@b.c");
    }

    #[test]
    fn test_logout_clears_token() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();
        store.set_token("tok").unwrap();
        logout(&store).unwrap();
        assert!(store.token().is_none());
    }
}
