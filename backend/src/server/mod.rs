//! Server construction.

mod state_builders;

pub use state_builders::{StartupError, build_http_state};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, web};
use utoipa::OpenApi;

use ticker_watch::ApiDoc;
use ticker_watch::inbound::http::health::{HealthState, live, ready};
use ticker_watch::inbound::http::json_config;
use ticker_watch::inbound::http::routes;
use ticker_watch::inbound::http::state::HttpState;

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Assemble the application for one actix worker.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Logger::new("%r %s %Dms"))
        .service(web::scope("/api/v1").configure(routes::configure))
        .route("/api-docs/openapi.json", web::get().to(openapi_json))
        .service(ready)
        .service(live)
}
