use crate::cli::CommonArgs;
use crate::error::{ContribError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const USER_AGENT: &str = concat!("contribdash/", env!("CARGO_PKG_VERSION"));

/// Settings for the GraphQL client, resolved from flags, the environment and `.env`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub token: Option<String>,
    pub cache_ttl: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn from_args(common: &CommonArgs) -> Self {
        Self {
            endpoint: common.endpoint.clone(),
            token: common.token.clone().filter(|t| !t.trim().is_empty()),
            cache_ttl: common.cache_ttl,
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            ContribError::Config(
                "no GitHub token; set GITHUB_TOKEN (or pass --token), or use --input <data.json>"
                    .to_string(),
            )
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            cache_ttl: Duration::from_secs(300),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Load `.env` from the working directory, if present, before flags read the environment.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}
