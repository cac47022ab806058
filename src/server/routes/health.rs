//! Health check and status endpoints

use super::DEFAULT_HISTORY_LIMIT;
use crate::server::state::AppState;
use crate::server::types::{
    AlertCounts, DetailedHealthResponse, DetailedMetrics, HealthQuery, HealthResponse,
    HistoryEntry, HistoryQuery, HistoryResponse, UptimeView, VersionInfo,
};
use crate::utils::error::MonitorError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/detailed", web::get().to(detailed_health_check))
            .route("/history", web::get().to(health_history)),
    )
    .route("/version", web::get().to(version_info));
}

fn status_code(status: crate::monitoring::HealthState) -> StatusCode {
    StatusCode::from_u16(status.http_status()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE)
}

/// Overall and per-service status.
///
/// Answers from the last committed snapshot unless `refresh=true`, which
/// runs (or joins) a probe cycle first. 200 healthy, 206 degraded, 503 unhealthy.
pub async fn health_check(
    state: web::Data<AppState>,
    query: web::Query<HealthQuery>,
) -> HttpResponse {
    debug!(refresh = query.refresh, "Health check requested");

    let health = if query.refresh {
        state.monitoring.perform_health_check().await
    } else {
        (*state.monitoring.current_health()).clone()
    };

    HttpResponse::build(status_code(health.overall)).json(HealthResponse::from(&health))
}

/// Snapshot plus call metrics, uptime trend and alert counts
async fn detailed_health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Detailed health check requested");

    let monitoring = &state.monitoring;
    let health = (*monitoring.current_health()).clone();
    let metrics = monitoring.metrics();
    let summary = monitoring.alert_summary();

    let body = DetailedHealthResponse {
        metrics: DetailedMetrics {
            api: metrics.api,
            services: metrics.services,
            uptime: UptimeView {
                percentage: monitoring.get_uptime_percentage(None),
                trend: monitoring.get_health_trend(None),
            },
        },
        alerts: AlertCounts::from(&summary),
        health,
    };

    HttpResponse::build(status_code(body.health.overall)).json(body)
}

/// Stored results with summary statistics; 404 for an unknown service
async fn health_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if limit == 0 {
        return Err(MonitorError::bad_request("limit must be at least 1").into());
    }

    let results = state
        .monitoring
        .get_health_history(query.service.as_deref(), Some(limit))?;
    let statistics = state.monitoring.history_statistics(&results);

    Ok(HttpResponse::Ok().json(HistoryResponse {
        history: results.into_iter().map(HistoryEntry::from).collect(),
        statistics,
    }))
}

/// Version and build information
async fn version_info() -> HttpResponse {
    let build = crate::build_info();
    HttpResponse::Ok().json(VersionInfo {
        name: Cow::Borrowed(crate::NAME),
        version: Cow::Borrowed(build.version),
        build_time: Cow::Borrowed(build.build_time),
        git_hash: Cow::Borrowed(build.git_hash),
        rust_version: Cow::Borrowed(build.rust_version),
    })
}
