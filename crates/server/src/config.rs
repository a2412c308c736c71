use crate::fault::{FaultPolicy, NoFaults, RandomFaults};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the record collection
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Probability in [0, 1] that a search request fails on purpose
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,

    /// Upper bound of the injected delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Turn simulated latency and failure on or off
    #[serde(default = "default_true")]
    pub fault_injection: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            data_path: default_data_path(),
            failure_rate: default_failure_rate(),
            max_delay_ms: default_max_delay_ms(),
            fault_injection: default_true(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("FRIENDS_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            anyhow::bail!(
                "failure_rate must be between 0 and 1, got {}",
                self.failure_rate
            );
        }
        if self.port == 0 {
            anyhow::bail!("port must be non-zero");
        }
        // A delay that reaches the timeout turns searches into 408s.
        if self.fault_injection && self.max_delay() >= self.timeout() {
            anyhow::bail!(
                "max_delay_ms ({}) must be below timeout_secs ({}s)",
                self.max_delay_ms,
                self.timeout_secs
            );
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the injected delay ceiling as Duration
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// Build the fault policy described by this config
    pub fn fault_policy(&self) -> Arc<dyn FaultPolicy> {
        if self.fault_injection {
            Arc::new(
                RandomFaults::default()
                    .with_failure_rate(self.failure_rate)
                    .with_max_delay(self.max_delay()),
            )
        } else {
            Arc::new(NoFaults)
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/friends.json")
}

fn default_failure_rate() -> f64 {
    0.25
}

fn default_max_delay_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.failure_rate, 0.25);
        assert_eq!(cfg.max_delay_ms, 500);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.data_path, PathBuf::from("data/friends.json"));
        assert!(cfg.fault_injection);
        assert!(cfg.enable_cors);
        assert!(cfg.metrics_enabled);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_invalid_failure_rate() {
        let cfg = ServerConfig {
            failure_rate: 1.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ServerConfig {
            failure_rate: -0.1,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let cfg = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_delay_must_stay_below_timeout() {
        let cfg = ServerConfig {
            max_delay_ms: 30_000,
            timeout_secs: 30,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ServerConfig {
            max_delay_ms: 29_999,
            timeout_secs: 30,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());

        // Without fault injection the delay is never applied.
        let cfg = ServerConfig {
            max_delay_ms: 60_000,
            fault_injection: false,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_disabled_faults_never_fail() {
        let cfg = ServerConfig {
            fault_injection: false,
            failure_rate: 1.0,
            ..Default::default()
        };
        let policy = cfg.fault_policy();
        for _ in 0..100 {
            let decision = policy.decide();
            assert!(!decision.fail);
            assert_eq!(decision.delay, Duration::ZERO);
        }
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: ServerConfig =
            serde_json::from_str(r#"{"port": 9000, "failure_rate": 0.0}"#).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.failure_rate, 0.0);
        assert_eq!(cfg.max_delay_ms, 500);
    }
}
