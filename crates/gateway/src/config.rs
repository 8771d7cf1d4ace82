//! Application configuration loaded from environment variables.

use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_DOWNSTREAM_TIMEOUT_MS: u64 = 5000;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DOWNSTREAM_TIMEOUT_MS`: deadline for each downstream call (default: `5000`)
/// - `SEED_DEMO_DATA`: seed the in-memory stores with demo data (default: `true`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub downstream_timeout: Duration,
    pub seed_demo_data: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            log_level: get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            downstream_timeout: Duration::from_millis(
                get("DOWNSTREAM_TIMEOUT_MS")
                    .and_then(|ms| ms.parse().ok())
                    .unwrap_or(DEFAULT_DOWNSTREAM_TIMEOUT_MS),
            ),
            seed_demo_data: get("SEED_DEMO_DATA")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            downstream_timeout: Duration::from_millis(DEFAULT_DOWNSTREAM_TIMEOUT_MS),
            seed_demo_data: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.downstream_timeout, Duration::from_millis(5000));
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_empty_environment_matches_default() {
        let config = lookup(&[]);
        assert_eq!(config.addr(), Config::default().addr());
        assert_eq!(config.downstream_timeout, Duration::from_secs(5));
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_values_are_read() {
        let config = lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("RUST_LOG", "debug"),
            ("DOWNSTREAM_TIMEOUT_MS", "250"),
            ("SEED_DEMO_DATA", "false"),
        ]);
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.downstream_timeout, Duration::from_millis(250));
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = lookup(&[
            ("PORT", "not-a-port"),
            ("DOWNSTREAM_TIMEOUT_MS", "-5"),
            ("SEED_DEMO_DATA", "maybe"),
        ]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.downstream_timeout, Duration::from_millis(5000));
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
