//! Call metrics endpoints

use crate::server::state::AppState;
use crate::server::types::{MetricsResponse, ResetResponse};
use actix_web::{HttpResponse, web};
use tracing::info;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/metrics")
            .route("", web::get().to(get_metrics))
            .route("/reset", web::post().to(reset_metrics)),
    );
}

async fn get_metrics(state: web::Data<AppState>) -> HttpResponse {
    let body: MetricsResponse = state.monitoring.metrics();
    HttpResponse::Ok().json(body)
}

/// Zero call counters; history and alerts are kept
async fn reset_metrics(state: web::Data<AppState>) -> HttpResponse {
    info!("Metrics reset requested over HTTP");

    HttpResponse::Ok().json(ResetResponse {
        success: true,
        previous_metrics: state.monitoring.reset_metrics(),
    })
}
