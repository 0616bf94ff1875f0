use std::env;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_PROXY_PORT: u16 = 5173;
pub const DEFAULT_PROXY_PREFIX: &str = "/api";

/// Defaults for flags that were not given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub timeout_ms: u64,
    pub proxy_port: u16,
    pub proxy_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            timeout_ms: get("SCHEMA_FETCH_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
            proxy_port: get("SCHEMA_FETCH_PROXY_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PROXY_PORT),
            proxy_prefix: get("SCHEMA_FETCH_PROXY_PREFIX")
                .unwrap_or_else(|| DEFAULT_PROXY_PREFIX.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = lookup(&[]);
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.proxy_port, 5173);
        assert_eq!(config.proxy_prefix, "/api");
    }

    #[test]
    fn reads_overrides() {
        let config = lookup(&[
            ("SCHEMA_FETCH_TIMEOUT_MS", "500"),
            ("SCHEMA_FETCH_PROXY_PORT", "8080"),
            ("SCHEMA_FETCH_PROXY_PREFIX", "/upstream"),
        ]);
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.proxy_port, 8080);
        assert_eq!(config.proxy_prefix, "/upstream");
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let config = lookup(&[("SCHEMA_FETCH_TIMEOUT_MS", "soon"), ("SCHEMA_FETCH_PROXY_PORT", "99999")]);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.proxy_port, DEFAULT_PROXY_PORT);
    }
}
