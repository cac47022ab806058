//! Outage and recovery scenarios driven through the public API

#[cfg(test)]
mod tests {
    use crate::common::assertions::SystemHealthAssertions;
    use crate::common::{ConfigFactory, ScriptedProbe};
    use chainwatch::monitoring::{ProbeError, ServiceProbe};
    use chainwatch::{AlertSeverity, HealthState, MonitoringSystem};
    use std::sync::Arc;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn monitoring(rpc: Arc<ScriptedProbe>) -> MonitoringSystem {
        let probes: Vec<Arc<dyn ServiceProbe>> = vec![rpc, ScriptedProbe::new("explorer")];
        MonitoringSystem::with_probes(&ConfigFactory::create(), probes).unwrap()
    }

    #[tokio::test]
    async fn test_rpc_outage_raises_single_alert() {
        let rpc = ScriptedProbe::new("rpc")
            .then_timeout()
            .then_timeout()
            .then_refused();
        let monitoring = monitoring(rpc.clone());

        let first = monitoring.perform_health_check().await;
        first.assert_service("rpc", HealthState::Degraded);
        assert_eq!(first.overall, HealthState::Degraded);

        monitoring.perform_health_check().await;
        let third = monitoring.perform_health_check().await;
        third.assert_service("rpc", HealthState::Unhealthy);
        third.assert_service("explorer", HealthState::Healthy);
        assert_eq!(third.overall, HealthState::Unhealthy);
        assert_eq!(third.overall.http_status(), 503);
        assert_eq!(rpc.calls(), 3);

        let rpc_result = third.service("rpc").unwrap();
        assert_eq!(rpc_result.consecutive_failures, 3);
        assert!(rpc_result.error.as_deref().unwrap().contains("connection"));

        let unhealthy: Vec<_> = monitoring
            .active_alerts()
            .into_iter()
            .filter(|a| a.service == "rpc" && a.condition == HealthState::Unhealthy)
            .collect();
        assert_eq!(unhealthy.len(), 1);
        assert!(matches!(
            unhealthy[0].severity,
            AlertSeverity::High | AlertSeverity::Critical
        ));

        // Continued failure does not duplicate the alert
        let rpc = rpc.then_refused();
        monitoring.perform_health_check().await;
        assert_eq!(rpc.calls(), 4);
        let still_unhealthy = monitoring
            .active_alerts()
            .into_iter()
            .filter(|a| a.service == "rpc" && a.condition == HealthState::Unhealthy)
            .count();
        assert_eq!(still_unhealthy, 1);
    }

    #[tokio::test]
    async fn test_recovery_keeps_alert_until_resolved() {
        let rpc = ScriptedProbe::new("rpc")
            .then_timeout()
            .then_timeout()
            .then_timeout()
            .then_ok(40);
        let monitoring = monitoring(rpc);

        for _ in 0..3 {
            monitoring.perform_health_check().await;
        }
        let recovered = monitoring.perform_health_check().await;
        recovered.assert_service("rpc", HealthState::Healthy);
        assert_eq!(recovered.overall, HealthState::Healthy);
        assert_eq!(recovered.health_score, 100);
        assert_eq!(recovered.service("rpc").unwrap().consecutive_failures, 0);

        let active = monitoring.active_alerts();
        assert!(!active.is_empty());
        for alert in &active {
            monitoring.resolve_alert(&alert.id).unwrap();
        }
        assert!(monitoring.active_alerts().is_empty());
        assert_eq!(monitoring.alert_summary().resolved, active.len());

        // Second resolution of the same alert is rejected
        let err = monitoring.resolve_alert(&active[0].id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_history_reflects_outage() {
        let rpc = ScriptedProbe::new("rpc").then_timeout().then_timeout();
        let monitoring = monitoring(rpc);

        for _ in 0..4 {
            monitoring.perform_health_check().await;
        }

        let rpc_history = monitoring.get_health_history(Some("rpc"), None).unwrap();
        assert_eq!(rpc_history.len(), 4);
        assert!(rpc_history.iter().all(|r| r.service == "rpc"));
        crate::assert_approx_eq!(monitoring.get_uptime_percentage(Some("rpc")), 50.0);
        crate::assert_approx_eq!(monitoring.get_uptime_percentage(Some("explorer")), 100.0);

        let limited = monitoring.get_health_history(None, Some(3)).unwrap();
        assert_eq!(limited.len(), 3);

        assert!(monitoring.get_health_history(Some("ghost"), None).is_err());
    }

    #[tokio::test]
    async fn test_reset_metrics_keeps_history_and_alerts() {
        let rpc = ScriptedProbe::new("rpc")
            .then_timeout()
            .then_timeout()
            .then_timeout();
        let monitoring = monitoring(rpc);

        for _ in 0..3 {
            monitoring.perform_health_check().await;
        }
        let alerts_before = monitoring.get_all_alerts().len();
        let history_before = monitoring.get_health_history(None, None).unwrap().len();

        let client = monitoring.client();
        for _ in 0..3 {
            client
                .call("rpc", TIMEOUT, async { Err::<(), _>(ProbeError::Timeout(2000)) })
                .await;
        }
        let timed = client.call("explorer", TIMEOUT, async { Ok("0x10") }).await;
        assert_eq!(timed.result, Ok("0x10"));

        let previous = monitoring.reset_metrics();
        assert_eq!(previous["rpc"].request_count, 3);
        assert_eq!(previous["rpc"].error_count, 3);
        assert_eq!(previous["explorer"].success_count, 1);

        let metrics = monitoring.metrics();
        assert_eq!(metrics.api.request_count, 0);
        assert_eq!(metrics.services["rpc"].request_count, 0);
        crate::assert_approx_eq!(metrics.services["rpc"].uptime_percentage, 100.0);

        assert_eq!(monitoring.get_all_alerts().len(), alerts_before);
        assert_eq!(
            monitoring.get_health_history(None, None).unwrap().len(),
            history_before
        );
    }

    #[tokio::test]
    async fn test_background_loop_probes_and_stops() {
        let mut config = ConfigFactory::create();
        config.monitor.interval_secs = 2;
        config.monitor.probe_timeout_secs = 1;
        let rpc = ScriptedProbe::new("rpc");
        let probes: Vec<Arc<dyn ServiceProbe>> = vec![rpc.clone(), ScriptedProbe::new("explorer")];
        let monitoring = MonitoringSystem::with_probes(&config, probes).unwrap();

        monitoring.start().unwrap();
        assert!(monitoring.is_running());
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        monitoring.stop().await.unwrap();
        assert!(!monitoring.is_running());

        assert!(rpc.calls() >= 1);
        assert!(monitoring.current_health().has_checks());
    }
}
