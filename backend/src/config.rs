//! Process-wide configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first (if present), so the
//! completion API key does not have to be exported in the shell.
//!
//! | Variable            | Default                      |
//! |---------------------|------------------------------|
//! | `HOST`              | `127.0.0.1`                  |
//! | `PORT`              | `3001`                       |
//! | `OPENAI_API_KEY`    | empty (requests will fail)   |
//! | `OPENAI_BASE_URL`   | `https://api.openai.com/v1`  |
//! | `OPENAI_MODEL`      | `gpt-3.5-turbo`              |
//! | `OPENAI_MAX_TOKENS` | `200`                        |
//! | `OPEN_BROWSER`      | `false`                      |

use std::env;
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MAX_TOKENS: u32 = 200;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub completion: CompletionConfig,
    /// Open the default browser on the server URL once it is listening.
    pub open_browser: bool,
}

/// Settings for the upstream text-completion API.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            completion: CompletionConfig {
                api_key: lookup("OPENAI_API_KEY").unwrap_or_default(),
                base_url: lookup("OPENAI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens: parse_or(&lookup, "OPENAI_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            },
            open_browser: parse_or(&lookup, "OPEN_BROWSER", false)?,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
