use anyhow::{Result, anyhow};

const DEFAULT_BASE_URL: &str = "https://api.jobdeck.dev/api";

/// Whether the HTTP client also carries a cookie jar alongside the
/// bearer token. The backend accepts both transports; `Omit` is the
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    Omit,
    Include,
}

/// How the session token is attached to outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStrategy {
    Bearer,
    None,
}

/// Single client configuration. All knobs are environment-driven with
/// defaults, so there is exactly one place the backend origin lives.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub credential_mode: CredentialMode,
    pub token_strategy: TokenStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credential_mode: CredentialMode::Omit,
            token_strategy: TokenStrategy::Bearer,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let base_url = normalize_base_url(
            &std::env::var("JOBDECK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        );

        let credential_mode = match std::env::var("JOBDECK_CREDENTIALS") {
            Ok(value) => parse_credential_mode(&value)?,
            Err(_) => CredentialMode::Omit,
        };

        let token_strategy = match std::env::var("JOBDECK_TOKEN_STRATEGY") {
            Ok(value) => parse_token_strategy(&value)?,
            Err(_) => TokenStrategy::Bearer,
        };

        Ok(Self {
            base_url,
            credential_mode,
            token_strategy,
        })
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_credential_mode(value: &str) -> Result<CredentialMode> {
    match value {
        "omit" => Ok(CredentialMode::Omit),
        "include" => Ok(CredentialMode::Include),
        other => Err(anyhow!(
            "Invalid JOBDECK_CREDENTIALS '{}' (expected 'omit' or 'include')",
            other
        )),
    }
}

fn parse_token_strategy(value: &str) -> Result<TokenStrategy> {
    match value {
        "bearer" => Ok(TokenStrategy::Bearer),
        "none" => Ok(TokenStrategy::None),
        other => Err(anyhow!(
            "Invalid JOBDECK_TOKEN_STRATEGY '{}' (expected 'bearer' or 'none')",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.credential_mode, CredentialMode::Omit);
        assert_eq!(config.token_strategy, TokenStrategy::Bearer);
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        assert_eq!(
            normalize_base_url("http://localhost:5000/api/"),
            "http://localhost:5000/api"
        );
        assert_eq!(normalize_base_url("  https://x.dev "), "https://x.dev");
    }

    #[test]
    fn test_parse_credential_mode() {
        assert_eq!(parse_credential_mode("omit").unwrap(), CredentialMode::Omit);
        assert_eq!(
            parse_credential_mode("include").unwrap(),
            CredentialMode::Include
        );
        assert!(parse_credential_mode("same-origin").is_err());
    }

    #[test]
    fn test_parse_token_strategy() {
        assert_eq!(parse_token_strategy("bearer").unwrap(), TokenStrategy::Bearer);
        assert_eq!(parse_token_strategy("none").unwrap(), TokenStrategy::None);
        assert!(parse_token_strategy("cookie").is_err());
    }
}
