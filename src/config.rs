use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use thiserror::Error;

/// Horizon testnet passphrase, used unless the config names another network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Lowest base fee the network accepts, in stroops per operation.
pub const MIN_BASE_FEE: u32 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Dependencies held at `warn` unless an entry names its own level
    /// (`"hyper"`, `"h2=error"`)
    #[serde(default = "default_quiet_crates")]
    pub quiet_crates: Vec<String>,
    pub gateway: GatewayConfig,
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub signer: SignerConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Ledger endpoint and transaction policy
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LedgerConfig {
    /// Horizon base URL, e.g. `https://horizon-testnet.stellar.org`
    pub horizon_url: String,
    #[serde(default = "default_passphrase")]
    pub network_passphrase: String,
    /// Deployed task-list contract (`C...`)
    pub contract_id: String,
    #[serde(default = "default_base_fee")]
    pub base_fee: u32,
    /// How long the network will consider a built transaction valid
    #[serde(default = "default_tx_timeout_secs")]
    pub tx_timeout_secs: u64,
    /// Per-call timeout for Horizon requests
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Serve from an in-memory ledger instead of Horizon (local demos only)
    #[serde(default)]
    pub mock: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SignerConfig {
    /// Environment variable holding the source account secret (`S...`)
    pub secret_env: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            secret_env: "RELAY_SOURCE_SECRET".to_string(),
        }
    }
}

fn default_passphrase() -> String {
    TESTNET_PASSPHRASE.to_string()
}

fn default_base_fee() -> u32 {
    MIN_BASE_FEE
}

fn default_tx_timeout_secs() -> u64 {
    30
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_quiet_crates() -> Vec<String> {
    vec!["hyper".to_string(), "reqwest".to_string()]
}

impl LedgerConfig {
    pub fn tx_timeout(&self) -> Duration {
        Duration::from_secs(self.tx_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.rotation.as_str(), "hourly" | "daily" | "never") {
            return Err(ConfigError::Invalid(format!(
                "rotation must be hourly, daily or never, got {:?}",
                self.rotation
            )));
        }
        if let Some(bad) = self
            .quiet_crates
            .iter()
            .find(|c| c.trim().is_empty() || c.contains(','))
        {
            return Err(ConfigError::Invalid(format!(
                "quiet_crates entry {:?} must name one crate",
                bad
            )));
        }

        let ledger = &self.ledger;
        if ledger.horizon_url.trim().is_empty() && !ledger.mock {
            return Err(ConfigError::Invalid("ledger.horizon_url is empty".into()));
        }
        if ledger.network_passphrase.is_empty() {
            return Err(ConfigError::Invalid(
                "ledger.network_passphrase is empty".into(),
            ));
        }
        if ledger.contract_id.trim().is_empty() {
            return Err(ConfigError::Invalid("ledger.contract_id is empty".into()));
        }
        if ledger.base_fee < MIN_BASE_FEE {
            return Err(ConfigError::Invalid(format!(
                "ledger.base_fee must be at least {} stroops",
                MIN_BASE_FEE
            )));
        }
        if ledger.tx_timeout_secs == 0 || ledger.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeouts must be non-zero".into()));
        }
        if self.signer.secret_env.is_empty() {
            return Err(ConfigError::Invalid("signer.secret_env is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
log_level: "info"
log_dir: "./logs"
log_file: "relay.log"
use_json: false
rotation: "daily"
gateway:
  host: "0.0.0.0"
  port: 8080
ledger:
  horizon_url: "https://horizon-testnet.stellar.org"
  contract_id: "CAJN25XAZLTZEVS7ZFLNZ3HWREJRQHKUU265CK67ED2ASJ22TDQ5Y4PL"
"#;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::from_yaml_str(YAML).unwrap();

        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.ledger.network_passphrase, TESTNET_PASSPHRASE);
        assert_eq!(config.ledger.base_fee, 100);
        assert_eq!(config.ledger.tx_timeout(), Duration::from_secs(30));
        assert_eq!(config.ledger.request_timeout(), Duration::from_millis(5000));
        assert!(!config.ledger.mock);
        assert_eq!(config.signer.secret_env, "RELAY_SOURCE_SECRET");
        assert_eq!(config.quiet_crates, vec!["hyper", "reqwest"]);
    }

    #[test]
    fn test_config_quiet_crates() {
        let yaml = format!("quiet_crates: [\"h2=error\", \"tower_http\"]\n{}", YAML);
        let config = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(config.quiet_crates, vec!["h2=error", "tower_http"]);

        let yaml = format!("quiet_crates: [\"hyper,reqwest\"]\n{}", YAML);
        assert!(matches!(
            AppConfig::from_yaml_str(&yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_rejects_unknown_rotation() {
        let yaml = YAML.replace("rotation: \"daily\"", "rotation: \"weekly\"");
        let err = AppConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("weekly"));
    }

    #[test]
    fn test_config_rejects_low_fee() {
        let yaml = format!("{}  base_fee: 10\n", YAML);
        let err = AppConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("base_fee"));
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let yaml = format!("{}  request_timeout_ms: 0\n", YAML);
        assert!(matches!(
            AppConfig::from_yaml_str(&yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_parse_error() {
        let err = AppConfig::from_yaml_str("gateway: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_shipped_configs_load() {
        let dev = AppConfig::load("dev").unwrap();
        assert!(!dev.ledger.mock);
        assert!(dev.ledger.horizon_url.starts_with("https://"));

        let mock = AppConfig::load("mock").unwrap();
        assert!(mock.ledger.mock);
        assert_eq!(mock.ledger.network_passphrase, TESTNET_PASSPHRASE);
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load("does-not-exist").unwrap_err();
        assert!(err.to_string().contains("config/does-not-exist.yaml"));
    }
}
