//! Configuration loading tests

#[cfg(test)]
mod tests {
    use chainwatch::config::{Config, ServiceKind};
    use chainwatch::AlertSeverity;
    use std::collections::HashMap;
    use std::io::Write;

    const CONFIG: &str = r#"
server:
  port: 9100
monitor:
  interval_secs: 15
  probe_timeout_secs: 5
  failure_threshold: 2
services:
  - name: mainnet
    kind: rpc
    url: https://mainnet.example.org
    rpc_method: eth_chainId
  - name: explorer
    kind: http
    url: https://explorer.example.org/
    health_path: api/status
alerting:
  webhook_url: https://hooks.example.org/alerts
  webhook_min_severity: critical
"#;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[tokio::test]
    async fn test_load_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        config.validate().unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.monitor.failure_threshold, 2);
        assert_eq!(config.monitor.history_capacity, 1000);
        assert_eq!(config.services.len(), 2);

        let mainnet = config.service("mainnet").unwrap();
        assert_eq!(mainnet.kind, ServiceKind::Rpc);
        assert_eq!(mainnet.rpc_method, "eth_chainId");

        let explorer = config.service("explorer").unwrap();
        assert_eq!(explorer.probe_url(), "https://explorer.example.org/api/status");
        assert_eq!(config.alerting.webhook_min_severity, AlertSeverity::Critical);
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.yaml")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::from_yaml(CONFIG).unwrap();
        let vars = env(&[
            ("EXPLORER_API_URL", "https://other-explorer.example.org"),
            ("RPC_URL", "https://rpc.example.org"),
            ("MONITOR_FAILURE_THRESHOLD", "4"),
        ]);
        config.apply_env_with(|key| vars.get(key).cloned()).unwrap();
        config.validate().unwrap();

        assert_eq!(config.monitor.failure_threshold, 4);
        assert_eq!(config.services.len(), 3);
        assert_eq!(config.service("rpc").unwrap().url, "https://rpc.example.org");
        assert_eq!(
            config.service("explorer").unwrap().url,
            "https://other-explorer.example.org"
        );
    }

    #[test]
    fn test_env_only_configuration() {
        let mut config = Config::default();
        let vars = env(&[("RPC_URL", "https://rpc.example.org"), ("EXPLORER_API_URL", "")]);
        config.apply_env_with(|key| vars.get(key).cloned()).unwrap();
        config.validate().unwrap();

        assert_eq!(config.services.len(), 1);
        assert_eq!(config.services[0].name, "rpc");
    }

    #[test]
    fn test_invalid_env_value_rejected() {
        let mut config = Config::default();
        let vars = env(&[("MONITOR_INTERVAL_SECS", "soon")]);
        let err = config.apply_env_with(|key| vars.get(key).cloned()).unwrap_err();
        assert!(err.to_string().contains("MONITOR_INTERVAL_SECS"));
    }

    #[test]
    fn test_no_services_rejected() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains("No services configured"));
    }
}
