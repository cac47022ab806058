//! Real probes against mock upstreams

#[cfg(test)]
mod tests {
    use crate::common::ConfigFactory;
    use chainwatch::config::ServiceConfig;
    use chainwatch::{HealthState, MonitoringSystem};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn rpc_node(result: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": result}))
                    .insert_header("x-ratelimit-remaining", "42")
                    .insert_header("x-ratelimit-reset", "60"),
            )
            .mount(&server)
            .await;
        server
    }

    async fn explorer(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;
        server
    }

    fn monitoring(rpc_url: String, explorer_url: String) -> MonitoringSystem {
        let mut explorer = ServiceConfig::http("explorer", explorer_url);
        explorer.health_path = "/api/health".to_string();
        let config = ConfigFactory::with_services(vec![ServiceConfig::rpc("rpc", rpc_url), explorer]);
        MonitoringSystem::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_live_services_are_healthy() {
        let rpc = rpc_node(json!("0x12a05f")).await;
        let explorer = explorer(200).await;
        let monitoring = monitoring(rpc.uri(), explorer.uri());

        let health = monitoring.perform_health_check().await;
        assert_eq!(health.overall, HealthState::Healthy);
        assert_eq!(health.health_score, 100);
        assert_eq!(health.services.len(), 2);

        let quota = monitoring.rate_limit();
        assert_eq!(quota.remaining, Some(42));
        assert!(!quota.is_limited);

        let metrics = monitoring.metrics();
        assert_eq!(metrics.api.request_count, 2);
        assert_eq!(metrics.api.error_count, 0);
    }

    #[tokio::test]
    async fn test_explorer_server_error_degrades() {
        let rpc = rpc_node(json!("0x1")).await;
        let explorer = explorer(502).await;
        let monitoring = monitoring(rpc.uri(), explorer.uri());

        let health = monitoring.perform_health_check().await;
        assert_eq!(health.overall, HealthState::Degraded);
        let result = health.service("explorer").unwrap();
        assert_eq!(result.status, HealthState::Degraded);
        assert!(result.error.as_deref().unwrap().contains("502"));
        assert_eq!(monitoring.service_metrics("explorer").unwrap().error_count, 1);
    }

    #[tokio::test]
    async fn test_unreachable_rpc_fails_fast() {
        let explorer = explorer(200).await;
        let monitoring = monitoring("http://127.0.0.1:1".to_string(), explorer.uri());

        let health = monitoring.perform_health_check().await;
        let rpc = health.service("rpc").unwrap();
        assert_eq!(rpc.status, HealthState::Degraded);
        assert_eq!(rpc.consecutive_failures, 1);
        assert!(rpc.error.is_some());
    }

    #[tokio::test]
    async fn test_business_calls_share_metrics_with_probes() {
        let rpc = rpc_node(json!("0x5")).await;
        let explorer = explorer(200).await;
        let monitoring = monitoring(rpc.uri(), explorer.uri());
        monitoring.perform_health_check().await;

        let client = monitoring.client();
        let request = client.http().post(rpc.uri()).json(&json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "eth_getBalance",
            "params": ["0x0000000000000000000000000000000000000000", "latest"],
        }));
        let timed = client.send("rpc", request, Duration::from_secs(2)).await;
        assert!(timed.result.is_ok());

        let metrics = monitoring.service_metrics("rpc").unwrap();
        assert_eq!(metrics.request_count, 2);
        assert_eq!(metrics.success_count, 2);
    }
}
