//! Alert endpoints

use super::RECENT_RESOLVED_ALERTS;
use crate::server::state::AppState;
use crate::server::types::{AlertsResponse, ResolveResponse};
use actix_web::{HttpResponse, Result as ActixResult, web};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/alerts")
            .route("", web::get().to(list_alerts))
            .route("/{id}/resolve", web::post().to(resolve_alert)),
    );
}

/// Active alerts, the most recently resolved ones, and a summary
async fn list_alerts(state: web::Data<AppState>) -> HttpResponse {
    let monitoring = &state.monitoring;

    HttpResponse::Ok().json(AlertsResponse {
        active: monitoring.active_alerts(),
        resolved: monitoring.resolved_alerts(Some(RECENT_RESOLVED_ALERTS)),
        summary: monitoring.alert_summary(),
    })
}

/// Resolve an active alert; unknown or already resolved IDs are 404
async fn resolve_alert(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let alert = state.monitoring.resolve_alert(&id)?;

    Ok(HttpResponse::Ok().json(ResolveResponse {
        success: true,
        message: format!("Alert for {} resolved", alert.service),
        alert_id: alert.id,
    }))
}
