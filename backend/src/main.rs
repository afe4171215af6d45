//! Backend entry-point: wires REST endpoints, persistence adapters, and
//! OpenAPI docs.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
use backend::api::employees::{current_employee, list_employees};
use backend::api::health::{HealthState, live, ready};
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::EmployeeDirectory;
use backend::outbound::persistence::{
    DbPool, DieselEmployeeDirectory, PoolConfig, run_pending_migrations,
};

/// Server configuration, from flags or environment.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Multi-tenant HR backend")]
struct Config {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Socket address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pool_size: u32,

    /// Seconds a request may wait for a free connection before failing
    /// with a service error.
    #[arg(long, env = "DB_CHECKOUT_TIMEOUT_SECS", default_value_t = 30)]
    checkout_timeout_secs: u64,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = Config::parse();

    // Schema and isolation policies land before any traffic is accepted.
    run_pending_migrations(&config.database_url).map_err(std::io::Error::other)?;

    let pool_config = PoolConfig::new(&config.database_url)
        .with_max_size(config.pool_size)
        .with_checkout_timeout(Duration::from_secs(config.checkout_timeout_secs));
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;

    let directory: Arc<dyn EmployeeDirectory> = Arc::new(DieselEmployeeDirectory::new(pool));
    let directory_data = web::Data::from(directory);

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(directory_data.clone())
            .wrap(Trace)
            .service(list_employees)
            .service(current_employee)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, "server ready");
    server.run().await
}
