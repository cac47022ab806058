//! HTTP server core implementation

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::monitoring::MonitoringSystem;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{MonitorError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
#[derive(Debug)]
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a server and the monitor it serves
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let monitoring = MonitoringSystem::new(config)?;
        Ok(Self::with_monitoring(config, monitoring))
    }

    /// Create a server around an existing monitor
    pub fn with_monitoring(config: &Config, monitoring: MonitoringSystem) -> Self {
        Self {
            config: config.server.clone(),
            state: AppState::new(config.clone(), monitoring),
        }
    }

    pub(crate) fn cors(config: &CorsConfig) -> Cors {
        if !config.enabled {
            return Cors::default();
        }

        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .max_age(config.max_age as usize);

        if config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }
        cors
    }

    /// Create the Actix-web application
    pub(crate) fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = Self::cors(&state.config.server.cors);

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", concat!("chainwatch/", env!("CARGO_PKG_VERSION")))))
            .configure(routes::configure_routes)
    }

    /// Start monitoring and serve until the process is signalled to stop.
    ///
    /// The monitor is stopped once the HTTP server has shut down.
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let monitoring = self.state.monitoring.clone();
        monitoring.start()?;

        let workers = self.config.workers;
        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        let server = match server.bind(&bind_addr) {
            Ok(server) => server.run(),
            Err(e) => {
                monitoring.stop().await?;
                return Err(Self::format_bind_error(e, &bind_addr));
            }
        };

        info!("HTTP server listening on {}", bind_addr);
        let served = server.await;

        info!("HTTP server stopped, shutting down monitoring");
        monitoring.stop().await?;

        served.map_err(|e| MonitorError::internal(format!("Server error: {}", e)))
    }

    fn format_bind_error(e: std::io::Error, bind_addr: &str) -> MonitorError {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            warn!("Address {} is already in use", bind_addr);
            MonitorError::config(format!(
                "Failed to bind {}: address already in use; set CHAINWATCH_PORT to another port",
                bind_addr
            ))
        } else {
            MonitorError::config(format!("Failed to bind {}: {}", bind_addr, e))
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
