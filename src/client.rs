use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;

use crate::config::{Config, CredentialMode, TokenStrategy};
use crate::session;
use crate::store::Store;

/// Errors surfaced by the API client. Façades decide per-endpoint
/// whether these propagate (write paths) or collapse to a fallback
/// default (read paths).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session expired or unauthorized. Run 'jobdeck login' again.")]
    Unauthorized,

    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The single configured HTTP client. Every outbound request goes
/// through here: base URL joining, bearer injection per the configured
/// token strategy, and the one 401 path that clears the session.
pub struct ApiClient<'a> {
    http: reqwest::blocking::Client,
    config: Config,
    store: &'a Store,
}

impl<'a> ApiClient<'a> {
    pub fn new(config: Config, store: &'a Store) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if config.credential_mode == CredentialMode::Include {
            builder = builder.cookie_store(true);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            config,
            store,
        })
    }

    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let req = self.http.get(join_url(&self.config.base_url, path)).query(query);
        self.execute(req)
    }

    pub fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let req = self.http.post(join_url(&self.config.base_url, path)).json(body);
        self.execute(req)
    }

    pub fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let req = self.http.delete(join_url(&self.config.base_url, path));
        self.execute(req)
    }

    fn execute(&self, req: reqwest::blocking::RequestBuilder) -> Result<Value, ApiError> {
        let req = match self.config.token_strategy {
            TokenStrategy::Bearer => {
                match session::bearer_header(self.store.token().as_deref()) {
                    Some((name, value)) => req.header(name, value),
                    None => req,
                }
            }
            TokenStrategy::None => req,
        };

        let response = req.send()?;
        let status = response.status();
        let text = response.text().unwrap_or_default();

        if status.as_u16() == 401 {
            if let Err(e) = session::expire(self.store) {
                tracing::warn!("Failed to clear expired token: {e}");
            }
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Pull the backend's message field out of an error body, falling back
/// to a generic string when the body is not the expected shape.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    "Something went wrong".to_string()
}
