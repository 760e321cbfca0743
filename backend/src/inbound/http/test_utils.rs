//! Helpers shared by the HTTP handler tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::{SubscriptionRegistry, TickerAlertService};
use crate::outbound::memory::{InMemorySubscriberRepository, InMemoryTickerRepository};
use crate::outbound::sms::LoggingSmsSender;

use super::state::HttpState;
use super::error::json_config;
use super::routes;

/// State backed by a fresh in-memory registry and the logging SMS sender.
pub(crate) fn memory_state() -> HttpState {
    let registry = Arc::new(SubscriptionRegistry::new(
        Arc::new(InMemorySubscriberRepository::default()),
        Arc::new(InMemoryTickerRepository::default()),
    ));
    let alerts = TickerAlertService::new(registry.clone(), Arc::new(LoggingSmsSender));
    HttpState::new(registry.clone(), registry, Arc::new(alerts))
}

/// App with every subscription and ticker route mounted under `/api/v1`.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .service(web::scope("/api/v1").configure(routes::configure))
}
