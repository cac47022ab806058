//! HTTP API tests over an in-process actix service

#[cfg(test)]
mod tests {
    use crate::common::{ConfigFactory, ScriptedProbe};
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use chainwatch::monitoring::ServiceProbe;
    use chainwatch::server::AppState;
    use chainwatch::server::routes::configure_routes;
    use chainwatch::MonitoringSystem;
    use serde_json::Value;
    use std::sync::Arc;

    fn state(rpc: Arc<ScriptedProbe>) -> web::Data<AppState> {
        let config = ConfigFactory::create();
        let probes: Vec<Arc<dyn ServiceProbe>> = vec![rpc, ScriptedProbe::new("explorer")];
        let monitoring = MonitoringSystem::with_probes(&config, probes).unwrap();
        web::Data::new(AppState::new(config, monitoring))
    }

    fn outage() -> Arc<ScriptedProbe> {
        ScriptedProbe::new("rpc")
            .then_timeout()
            .then_timeout()
            .then_refused()
    }

    async fn run_cycles(state: &web::Data<AppState>, n: usize) {
        for _ in 0..n {
            state.monitoring.perform_health_check().await;
        }
    }

    #[actix_web::test]
    async fn test_health_reports_outage_with_503() {
        let state = state(outage());
        run_cycles(&state, 3).await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["healthScore"], 50);
        let services = body["services"].as_array().unwrap();
        let rpc = services.iter().find(|s| s["name"] == "rpc").unwrap();
        assert_eq!(rpc["status"], "unhealthy");
        assert!(rpc["responseTime"].is_u64());
        assert!(rpc["lastCheck"].is_string());
    }

    #[actix_web::test]
    async fn test_health_refresh_runs_a_cycle() {
        let state = state(ScriptedProbe::new("rpc").then_timeout());
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/health?refresh=true").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["healthScore"], 80);
        assert_eq!(body["services"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_alert_lifecycle_over_http() {
        let state = state(outage().then_ok(25));
        run_cycles(&state, 3).await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/alerts").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let active = body["active"].as_array().unwrap().clone();
        let unhealthy = active
            .iter()
            .find(|a| a["service"] == "rpc" && a["condition"] == "unhealthy")
            .unwrap();
        assert!(matches!(unhealthy["severity"].as_str(), Some("high") | Some("critical")));

        // Recovery clears the status but not the alert
        run_cycles(&state, 1).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/alerts").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["active"].as_array().unwrap().len(), active.len());

        let id = unhealthy["id"].as_str().unwrap();
        let uri = format!("/alerts/{}/resolve", id);
        let resp = test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["alertId"], id);

        let resp = test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_metrics_reset_over_http() {
        let state = state(outage());
        run_cycles(&state, 3).await;

        let recorder = state.monitoring.client().metrics();
        for latency in [5000.0, 5000.0, 3.0] {
            recorder.record_error("rpc", latency);
        }
        for latency in [20.0, 40.0, 30.0] {
            recorder.record_success("explorer", latency);
        }
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["api"]["requestCount"], 6);
        assert_eq!(body["services"]["rpc"]["errorCount"], 3);

        let req = test::TestRequest::post().uri("/metrics/reset").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["previousMetrics"]["rpc"]["requestCount"], 3);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["api"]["requestCount"], 0);

        let req = test::TestRequest::get().uri("/health/history?service=rpc").to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["history"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_history_rejects_unknown_service() {
        let state = state(ScriptedProbe::new("rpc"));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/health/history?service=ghost").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
