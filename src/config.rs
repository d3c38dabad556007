use std::env;
use std::time::Duration;

use crate::errors::BridgeError;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8080,http://localhost:5173";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    /// Empty means "same origin": the CLI talks to the local bridge API.
    pub bridge_base_url: String,
    pub wallet_rpc_url: Option<String>,
    pub wallet_poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, BridgeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BridgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|e| BridgeError::Config(format!("Failed to parse PORT: {}", e)))?;

        let poll_ms: u64 = lookup("WALLET_POLL_INTERVAL_MS")
            .unwrap_or_else(|| "1000".to_string())
            .parse()
            .map_err(|e| {
                BridgeError::Config(format!("Failed to parse WALLET_POLL_INTERVAL_MS: {}", e))
            })?;

        Ok(Self {
            port,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            cors_origins: parse_list(
                &lookup("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            bridge_base_url: lookup("BRIDGE_BASE_URL").unwrap_or_default(),
            wallet_rpc_url: lookup("WALLET_RPC_URL").filter(|url| !url.trim().is_empty()),
            wallet_poll_interval: Duration::from_millis(poll_ms),
        })
    }

    /// Base url the client posts to, resolving "same origin" to this server.
    pub fn resolved_base_url(&self) -> String {
        let base = self.bridge_base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            format!("http://{}:{}", self.bind_address, self.port)
        } else {
            base.to_string()
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, BridgeError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bridge_base_url, "");
        assert!(config.wallet_rpc_url.is_none());
        assert_eq!(config.wallet_poll_interval, Duration::from_millis(1000));
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:8080", "http://localhost:5173"]
        );
    }

    #[test]
    fn empty_base_url_resolves_to_local_server() {
        let config = config_with(&[("PORT", "9000")]).unwrap();
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn explicit_base_url_drops_trailing_slash() {
        let config = config_with(&[("BRIDGE_BASE_URL", "https://bridge.example/")]).unwrap();
        assert_eq!(config.resolved_base_url(), "https://bridge.example");
    }

    #[test]
    fn bad_port_is_config_error() {
        let err = config_with(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));
    }

    #[test]
    fn blank_wallet_url_means_no_provider() {
        let config = config_with(&[("WALLET_RPC_URL", "  ")]).unwrap();
        assert!(config.wallet_rpc_url.is_none());
    }
}
