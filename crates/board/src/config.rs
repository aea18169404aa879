//! Board configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LINE_CHANNEL_SECRET` - LINE channel secret (webhook signature key)
//! - `LINE_CHANNEL_ACCESS_TOKEN` - LINE channel access token (reply API)
//! - `BOARD_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `BOARD_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 5000)
//! - `BOARD_BASE_URL` - Public URL of the board, used for carousel card links
//! - `LINE_API_BASE` - Messaging API base URL (default: <https://api.line.me>)
//! - `LINE_REPLY_TIMEOUT_SECS` - Reply request timeout in seconds (default: 5)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_LINE_API_BASE: &str = "https://api.line.me";
const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 5;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Board application configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the board (enables links on carousel cards)
    pub base_url: Option<Url>,
    /// LINE Messaging API configuration
    pub line: LineConfig,
    /// Emit JSON logs instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// LINE Messaging API configuration.
///
/// Implements `Debug` manually to redact the channel credentials.
#[derive(Clone)]
pub struct LineConfig {
    /// Channel secret, the HMAC key for `X-Line-Signature`.
    pub channel_secret: SecretString,
    /// Channel access token for the reply endpoint.
    pub channel_access_token: SecretString,
    /// API base URL (overridable for tests and proxies).
    pub api_base: Url,
    /// Upper bound for a single reply request.
    pub reply_timeout: Duration,
}

impl std::fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineConfig")
            .field("channel_secret", &"[REDACTED]")
            .field("channel_access_token", &"[REDACTED]")
            .field("api_base", &self.api_base.as_str())
            .field("reply_timeout", &self.reply_timeout)
            .finish()
    }
}

impl LineConfig {
    fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        let channel_secret = env.required("LINE_CHANNEL_SECRET")?;
        let channel_access_token = env.required("LINE_CHANNEL_ACCESS_TOKEN")?;

        if let Err(e) = validate_secret_strength(&channel_secret, "LINE_CHANNEL_SECRET") {
            tracing::warn!("LINE_CHANNEL_SECRET validation warning: {e}");
        }
        if let Err(e) = validate_secret_strength(&channel_access_token, "LINE_CHANNEL_ACCESS_TOKEN")
        {
            tracing::warn!("LINE_CHANNEL_ACCESS_TOKEN validation warning: {e}");
        }

        let api_base = parse_url(
            "LINE_API_BASE",
            &env.or_default("LINE_API_BASE", DEFAULT_LINE_API_BASE),
        )?;

        let timeout_secs = env
            .optional("LINE_REPLY_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("LINE_REPLY_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_REPLY_TIMEOUT_SECS);

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "LINE_REPLY_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            channel_secret: SecretString::from(channel_secret),
            channel_access_token: SecretString::from(channel_access_token),
            api_base,
            reply_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl BoardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`BoardConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup: &lookup };

        // LINE credentials first so a bare environment names them in the error
        let line = LineConfig::load(&env)?;

        let database_url = env
            .optional("BOARD_DATABASE_URL")
            .or_else(|| env.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("BOARD_DATABASE_URL".to_string()))?;

        let host = env
            .or_default("BOARD_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOARD_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let base_url = env
            .optional("BOARD_BASE_URL")
            .map(|raw| parse_url("BOARD_BASE_URL", &raw))
            .transpose()?;

        let log_json = env
            .optional("LOG_FORMAT")
            .is_some_and(|v| v.eq_ignore_ascii_case("json"));

        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            line,
            log_json,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the LINE configuration.
    #[must_use]
    pub const fn line(&self) -> &LineConfig {
        &self.line
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup shared by the loaders.
struct Env<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl Env<'_> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
