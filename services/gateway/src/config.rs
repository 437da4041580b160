use anyhow::Context;
use matching_engine::AssignmentPolicy;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use types::test_codes::TestCodeMap;

/// Gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in KB
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,

    /// JSON test-code table replacing the built-in one
    #[serde(default)]
    pub test_codes_path: Option<PathBuf>,

    /// How candidate pairs are turned into a 1:1 mapping
    #[serde(default)]
    pub assignment_policy: AssignmentPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_kb: default_max_body_size_kb(),
            test_codes_path: None,
            assignment_policy: AssignmentPolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// Load from an optional `gateway.*` file, overridden by `GATEWAY_*`
    /// environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("gateway").required(false))
            .add_source(
                config::Environment::with_prefix("GATEWAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }

    /// Test-code table to run the engine with.
    pub fn test_codes(&self) -> anyhow::Result<TestCodeMap> {
        let Some(path) = &self.test_codes_path else {
            return Ok(TestCodeMap::default());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading test code table {}", path.display()))?;
        let codes = TestCodeMap::from_json(&json)
            .with_context(|| format!("parsing test code table {}", path.display()))?;

        Ok(codes)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_kb() -> usize {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.max_body_size(), 1024 * 1024);
        assert_eq!(cfg.assignment_policy, AssignmentPolicy::GlobalGreedy);
        assert!(cfg.test_codes_path.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = GatewayConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);

        let cfg = GatewayConfig {
            bind_addr: "not an address".to_string(),
            ..Default::default()
        };
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_builtin_test_codes() {
        let codes = GatewayConfig::default().test_codes().unwrap();
        assert_eq!(codes, TestCodeMap::default());
    }

    #[test]
    fn test_test_codes_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "bookingTestId": "test_3", "claimTestId": "medical_service_3" }}]"#
        )
        .unwrap();

        let cfg = GatewayConfig {
            test_codes_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let codes = cfg.test_codes().unwrap();
        assert_eq!(codes.expected_service_code("test_3"), Some("medical_service_3"));
        assert_eq!(codes.expected_service_code("test_1"), None);
    }

    #[test]
    fn test_missing_test_codes_file() {
        let cfg = GatewayConfig {
            test_codes_path: Some(PathBuf::from("/nonexistent/test-codes.json")),
            ..Default::default()
        };
        let err = cfg.test_codes().unwrap_err();
        assert!(err.to_string().contains("reading test code table"));
    }

    #[test]
    fn test_policy_from_deserialized_config() {
        let cfg: GatewayConfig =
            serde_json::from_str(r#"{ "port": 9000, "assignment_policy": "max_weight" }"#).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.assignment_policy, AssignmentPolicy::MaxWeight);
        assert_eq!(cfg.bind_addr, "0.0.0.0");
    }
}
