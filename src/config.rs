//! Configuration loading and validation.
//!
//! Loads `config.toml` from `--config`, `$TALENTSCOUT_CONFIG` or
//! `~/.talentscout/config.toml`. A missing file means defaults.
//!
//! Precedence: CLI flags > env vars > config file > defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::intake::cache::{DEFAULT_CAPACITY, DEFAULT_CONTEXT_MESSAGES};
use crate::intake::validator::MAX_INPUT_CHARS;
use crate::providers::models::SupportedModel;
use crate::providers::openai::DEFAULT_BASE_URL;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "TALENTSCOUT_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model backend connection.
    pub backend: BackendConfig,
    /// Interview pipeline limits.
    pub interview: InterviewConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Model backend connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// OpenAI-compatible base URL, e.g. `http://localhost:11434/v1`.
    pub base_url: String,
    /// Model from the supported allow-list.
    pub model: SupportedModel,
    /// Name of the environment variable holding an optional bearer key.
    pub api_key_env: String,
    /// Per-request timeout in seconds; `0` disables the bound.
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: SupportedModel::default(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Request timeout, `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Resolve the bearer key from the configured environment variable.
    pub fn api_key(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        if self.api_key_env.is_empty() {
            return None;
        }
        env(&self.api_key_env).filter(|key| !key.trim().is_empty())
    }
}

/// Interview pipeline limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterviewConfig {
    /// Longest accepted submission in characters.
    pub max_input_chars: usize,
    /// Replies cached per session.
    pub cache_capacity: usize,
    /// Trailing messages hashed into the cache key.
    pub cache_context_messages: usize,
    /// Whether turns consult the reply cache.
    pub use_cache: bool,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            max_input_chars: MAX_INPUT_CHARS,
            cache_capacity: DEFAULT_CAPACITY,
            cache_context_messages: DEFAULT_CONTEXT_MESSAGES,
            use_cache: true,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Also write JSON logs under `~/.talentscout/logs`.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: false,
        }
    }
}

// Default value functions for serde

fn default_api_key_env() -> String {
    "TALENTSCOUT_API_KEY".to_owned()
}
fn default_request_timeout_secs() -> u64 {
    120
}
fn default_log_level() -> String {
    "warn".to_owned()
}

impl Config {
    /// Load configuration: `.env`, then the TOML file, then env overrides,
    /// then validation.
    ///
    /// `explicit` (from `--config`) must exist; the default location may be
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an override is
    /// malformed, or validation fails.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let env = |key: &str| std::env::var(key).ok();

        let mut config = match explicit {
            Some(path) => load_config(path)?,
            None => {
                let path = config_path_with(env)?;
                match std::fs::read_to_string(&path) {
                    Ok(contents) => {
                        tracing::info!(path = %path.display(), "loading config from file");
                        Self::from_toml_str(&contents).with_context(|| {
                            format!("failed to parse config at {}", path.display())
                        })?
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        tracing::info!("no config file found, using defaults");
                        Self::default()
                    }
                    Err(e) => {
                        return Err(anyhow::anyhow!(
                            "failed to read config at {}: {e}",
                            path.display()
                        ))
                    }
                }
            }
        };

        config.apply_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document. Missing sections and keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or an unsupported model name.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config TOML")
    }

    /// Apply environment overrides using a resolver (tests pass a closure
    /// instead of touching the process environment).
    ///
    /// # Errors
    ///
    /// Returns an error when an override value cannot be parsed.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = env("TALENTSCOUT_BASE_URL") {
            self.backend.base_url = url;
        }
        if let Some(model) = env("TALENTSCOUT_MODEL") {
            self.backend.model = model.parse().context("invalid TALENTSCOUT_MODEL")?;
        }
        if let Some(secs) = env("TALENTSCOUT_TIMEOUT_SECS") {
            self.backend.request_timeout_secs = secs
                .trim()
                .parse()
                .context("TALENTSCOUT_TIMEOUT_SECS must be a whole number of seconds")?;
        }
        Ok(())
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.backend.base_url)
            .with_context(|| format!("invalid backend.base_url '{}'", self.backend.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "backend.base_url must use http or https, got '{}'",
                url.scheme()
            );
        }
        if self.interview.max_input_chars == 0 {
            anyhow::bail!("interview.max_input_chars must be greater than zero");
        }
        if self.interview.cache_capacity == 0 {
            anyhow::bail!("interview.cache_capacity must be greater than zero");
        }
        if self.interview.cache_context_messages == 0 {
            anyhow::bail!("interview.cache_context_messages must be greater than zero");
        }
        Ok(())
    }
}

/// Load and parse a config file that must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    Config::from_toml_str(&contents)
        .with_context(|| format!("failed to parse config at {}", path.display()))
}

/// Resolve the default config directory (`~/.talentscout/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".talentscout"))
}

/// Resolve the config file path: `$TALENTSCOUT_CONFIG`, else
/// `~/.talentscout/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_path_with(env: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    if let Some(p) = env(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(p));
    }
    Ok(config_dir()?.join("config.toml"))
}

/// Commented default configuration written by `talentscout init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# TalentScout configuration.
# Environment overrides: TALENTSCOUT_BASE_URL, TALENTSCOUT_MODEL, TALENTSCOUT_TIMEOUT_SECS.

[backend]
# Any OpenAI-compatible endpoint. The default is a local Ollama server.
base_url = "http://localhost:11434/v1"
# One of: llama3.1, llama3, mistral, codellama
model = "llama3.1"
# Environment variable holding an optional API key (sent as a bearer token).
api_key_env = "TALENTSCOUT_API_KEY"
# Seconds before a model request is abandoned; 0 waits forever.
request_timeout_secs = 120

[interview]
max_input_chars = 5000
cache_capacity = 50
cache_context_messages = 5
use_cache = true

[logging]
# Used when RUST_LOG is unset.
level = "warn"
# Also write JSON logs to ~/.talentscout/logs.
file = false
"#;
