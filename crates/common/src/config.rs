//! Suite configuration.
//!
//! The harness needs to know three things: where the device automation
//! server listens, where the staging chain's RPC node and faucet live, and
//! where to drop artifacts. Values come from a TOML file (`--config`,
//! `MERIDIAN_E2E_CONFIG`, or `config/suite.toml`) with per-field environment
//! overrides so CI can retarget a single endpoint without editing files.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default config file checked into the repository.
pub const DEFAULT_CONFIG_PATH: &str = "config/suite.toml";

const CONFIG_PATH_ENV: &str = "MERIDIAN_E2E_CONFIG";
const SERVER_URL_ENV: &str = "MERIDIAN_E2E_SERVER_URL";
const DEVICE_NAME_ENV: &str = "MERIDIAN_E2E_DEVICE_NAME";
const RPC_URL_ENV: &str = "MERIDIAN_E2E_RPC_URL";
const FAUCET_URL_ENV: &str = "MERIDIAN_E2E_FAUCET_URL";
const ARTIFACTS_DIR_ENV: &str = "MERIDIAN_E2E_ARTIFACTS_DIR";

/// Top-level suite configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    pub automation: AutomationConfig,
    pub chain: ChainConfig,

    /// Directory for failure screenshots and the results report.
    pub artifacts_dir: PathBuf,
}

/// Where the automation server lives and which app build it launches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutomationConfig {
    pub server_url: String,
    pub device_name: String,
    pub app_package: String,
    pub app_activity: String,

    /// Bound on reaching the server and creating a fresh app session.
    pub new_session_timeout_secs: u64,

    /// Per-command HTTP timeout.
    pub command_timeout_secs: u64,
}

/// Chain collaborators the wallet scenarios talk to directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub faucet_url: String,
    pub request_timeout_secs: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            automation: AutomationConfig::default(),
            chain: ChainConfig::default(),
            artifacts_dir: PathBuf::from("test-results"),
        }
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:4723".to_string(),
            device_name: "emulator-5554".to_string(),
            app_package: "im.meridian.app".to_string(),
            app_activity: ".MainActivity".to_string(),
            new_session_timeout_secs: 120,
            command_timeout_secs: 30,
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            faucet_url: "http://127.0.0.1:3001".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl AutomationConfig {
    pub fn new_session_timeout(&self) -> Duration {
        Duration::from_secs(self.new_session_timeout_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

impl ChainConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl SuiteConfig {
    /// Resolve configuration: explicit path, `MERIDIAN_E2E_CONFIG`, the
    /// checked-in default file if present, else built-in defaults. Field
    /// overrides from the environment are applied on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let mut config = match path.or(env_path.as_deref()) {
            Some(p) => Self::from_file(p)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    SuiteConfig::default()
                }
            }
        };
        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let doc = std::fs::read_to_string(path)?;
        Self::from_toml(&doc)
    }

    pub fn from_toml(doc: &str) -> Result<Self> {
        let config: SuiteConfig = toml::from_str(doc)?;
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(SERVER_URL_ENV) {
            self.automation.server_url = url;
        }
        if let Some(device) = lookup(DEVICE_NAME_ENV) {
            self.automation.device_name = device;
        }
        if let Some(url) = lookup(RPC_URL_ENV) {
            self.chain.rpc_url = url;
        }
        if let Some(url) = lookup(FAUCET_URL_ENV) {
            self.chain.faucet_url = url;
        }
        if let Some(dir) = lookup(ARTIFACTS_DIR_ENV) {
            self.artifacts_dir = PathBuf::from(dir);
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("automation.server_url", &self.automation.server_url),
            ("chain.rpc_url", &self.chain.rpc_url),
            ("chain.faucet_url", &self.chain.faucet_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::InvalidConfig(format!("{}: not an http(s) URL: {}", name, url)));
            }
        }
        if self.automation.command_timeout_secs == 0 || self.automation.new_session_timeout_secs == 0 {
            return Err(Error::InvalidConfig("automation timeouts must be non-zero".into()));
        }
        if self.chain.request_timeout_secs == 0 {
            return Err(Error::InvalidConfig("chain.request_timeout_secs must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_endpoints() {
        let config = SuiteConfig::default();
        assert_eq!(config.automation.server_url, "http://127.0.0.1:4723");
        assert_eq!(config.chain.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.artifacts_dir, PathBuf::from("test-results"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let config = SuiteConfig::from_toml(
            r#"
            artifacts_dir = "out"

            [automation]
            server_url = "http://10.0.0.5:4723"
            device_name = "pixel-ci-02"

            [chain]
            rpc_url = "https://rpc.staging.example.net"
            "#,
        )
        .unwrap();

        assert_eq!(config.automation.server_url, "http://10.0.0.5:4723");
        assert_eq!(config.automation.device_name, "pixel-ci-02");
        // untouched sections keep their defaults
        assert_eq!(config.automation.app_package, "im.meridian.app");
        assert_eq!(config.chain.rpc_url, "https://rpc.staging.example.net");
        assert_eq!(config.chain.faucet_url, "http://127.0.0.1:3001");
        assert_eq!(config.artifacts_dir, PathBuf::from("out"));
    }

    #[test]
    fn loads_from_a_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.toml");
        std::fs::write(&path, "[chain]\nfaucet_url = \"http://faucet-ci:3001\"\n").unwrap();

        let config = SuiteConfig::from_file(&path).unwrap();
        assert_eq!(config.chain.faucet_url, "http://faucet-ci:3001");

        assert!(SuiteConfig::from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(SuiteConfig::from_toml("[automation]\nserver = \"oops\"\n").is_err());
    }

    #[test]
    fn env_overrides_replace_single_fields() {
        let mut config = SuiteConfig::default();
        config.apply_overrides(|key| match key {
            "MERIDIAN_E2E_RPC_URL" => Some("http://rpc-ci:8545".to_string()),
            "MERIDIAN_E2E_ARTIFACTS_DIR" => Some("ci-artifacts".to_string()),
            _ => None,
        });

        assert_eq!(config.chain.rpc_url, "http://rpc-ci:8545");
        assert_eq!(config.artifacts_dir, PathBuf::from("ci-artifacts"));
        // everything else untouched
        assert_eq!(config.automation.server_url, "http://127.0.0.1:4723");
    }

    #[test]
    fn validation_catches_bad_urls_and_timeouts() {
        let mut config = SuiteConfig::default();
        config.chain.faucet_url = "ftp://faucet".to_string();
        assert!(config.validate().is_err());

        let mut config = SuiteConfig::default();
        config.automation.command_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
