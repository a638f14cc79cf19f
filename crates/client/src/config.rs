//! Orders API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDERS_API_BASE_URL` - Base URL of the remote API (e.g., `https://shop.example.com/api`)
//! - `ORDERS_API_KEY` - Static API key sent as the `x-api-key` header
//!
//! ## Optional
//! - `ORDERS_API_TIMEOUT_SECS` - Request timeout in seconds (default: HTTP client default)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Path of the orders collection, relative to the base URL.
pub const ORDERS_PATH: &str = "woocommerce/orders";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
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

/// Remote orders API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: Url,
    /// Static API key
    pub api_key: SecretString,
    /// Request timeout (`None` keeps the HTTP client default)
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Build a configuration from explicit values.
    ///
    /// Unlike [`ApiConfig::from_env`], the key is not checked for strength,
    /// which keeps local mock servers and tests simple.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str, api_key: impl Into<SecretString>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key: api_key.into(),
            timeout: None,
        })
    }

    /// Set a request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the API key fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ApiConfig::from_env`].
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = get_required(&lookup, "ORDERS_API_BASE_URL")?;
        let api_key = get_required(&lookup, "ORDERS_API_KEY")?;
        validate_secret_strength(&api_key, "ORDERS_API_KEY")?;

        let timeout = lookup("ORDERS_API_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs)
                    .ok_or_else(|| {
                        ConfigError::InvalidEnvVar(
                            "ORDERS_API_TIMEOUT_SECS".to_string(),
                            format!("expected a positive number of seconds, got {raw:?}"),
                        )
                    })
            })
            .transpose()?;

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            api_key: SecretString::from(api_key),
            timeout,
        })
    }

    /// URL of the orders collection (`{base_url}/woocommerce/orders`).
    #[must_use]
    pub fn orders_url(&self) -> Url {
        let mut url = self.base_url.clone();
        // An http(s) base URL always has path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(ORDERS_PATH.split('/'));
        }
        url
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable through the lookup.
fn get_required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parse and normalize the base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("ORDERS_API_BASE_URL".to_string(), reason);

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme: {}", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment".to_string()));
    }
    Ok(url)
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

    // Check blocklist
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STRONG_KEY: &str = "k9F2mQ7xR4tL8vZ1pW6n";

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_vars_minimal() {
        let config = ApiConfig::from_vars(vars(&[
            ("ORDERS_API_BASE_URL", "https://shop.test/api"),
            ("ORDERS_API_KEY", STRONG_KEY),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "https://shop.test/api");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_from_vars_timeout() {
        let config = ApiConfig::from_vars(vars(&[
            ("ORDERS_API_BASE_URL", "https://shop.test"),
            ("ORDERS_API_KEY", STRONG_KEY),
            ("ORDERS_API_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_from_vars_rejects_zero_timeout() {
        let result = ApiConfig::from_vars(vars(&[
            ("ORDERS_API_BASE_URL", "https://shop.test"),
            ("ORDERS_API_KEY", STRONG_KEY),
            ("ORDERS_API_TIMEOUT_SECS", "0"),
        ]));

        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_from_vars_missing_key() {
        let result = ApiConfig::from_vars(vars(&[("ORDERS_API_BASE_URL", "https://shop.test")]));

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref k)) if k == "ORDERS_API_KEY"));
    }

    #[test]
    fn test_from_vars_rejects_placeholder_key() {
        let result = ApiConfig::from_vars(vars(&[
            ("ORDERS_API_BASE_URL", "https://shop.test"),
            ("ORDERS_API_KEY", "your-api-key-here"),
        ]));

        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_from_vars_rejects_low_entropy_key() {
        let result = ApiConfig::from_vars(vars(&[
            ("ORDERS_API_BASE_URL", "https://shop.test"),
            ("ORDERS_API_KEY", "aaaaaaaaaaaaaaaa"),
        ]));

        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_new_rejects_non_http_scheme() {
        assert!(ApiConfig::new("ftp://shop.test", "key").is_err());
        assert!(ApiConfig::new("not a url", "key").is_err());
        assert!(ApiConfig::new("https://shop.test/api?x=1", "key").is_err());
    }

    #[test]
    fn test_orders_url_with_and_without_trailing_slash() {
        let plain = ApiConfig::new("https://shop.test/api", "key").unwrap();
        let slashed = ApiConfig::new("https://shop.test/api/", "key").unwrap();
        let root = ApiConfig::new("http://127.0.0.1:8080", "key").unwrap();

        assert_eq!(
            plain.orders_url().as_str(),
            "https://shop.test/api/woocommerce/orders"
        );
        assert_eq!(
            slashed.orders_url().as_str(),
            "https://shop.test/api/woocommerce/orders"
        );
        assert_eq!(
            root.orders_url().as_str(),
            "http://127.0.0.1:8080/woocommerce/orders"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ApiConfig::new("https://shop.test", STRONG_KEY).unwrap();
        let debug = format!("{config:?}");

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(STRONG_KEY));
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }
}
