//! Service entry-point: load settings, wire storage and serve HTTP.

mod server;

use std::ffi::OsString;

use actix_web::{HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ortho_config::OrthoConfig;
use ticker_watch::config::AppSettings;
use ticker_watch::inbound::http::health::HealthState;

use server::{StartupError, build_app, build_http_state};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(StartupError::from)?;

    let health_state = web::Data::new(HealthState::default());
    let http_state = web::Data::new(build_http_state(&settings).await?);

    let server_health = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    info!(%bind_addr, "ticker-watch listening");

    let handle = server.handle();
    let shutdown_health = health_state.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown_health.mark_draining();
            handle.stop(true).await;
        }
    });

    server.await
}
