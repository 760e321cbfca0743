//! OpenAPI document for the REST API, served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::domain::{AlertReport, Carrier, DomainError, ErrorCode, FailedDelivery};
use crate::inbound::http::tickers::{AlertRequest, SubscribersResponse};
use crate::inbound::http::users::{
    AvailabilityResponse, ContactResponse, RegisterRequest, SubscribeRequest, SubscriberResponse,
    SubscriptionsResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ticker Watch API",
        description = "Register subscribers, follow stock tickers and fan alerts out over SMS gateways."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_subscriber,
        crate::inbound::http::users::username_availability,
        crate::inbound::http::users::subscriber_contact,
        crate::inbound::http::users::list_subscriptions,
        crate::inbound::http::users::subscribe,
        crate::inbound::http::tickers::list_subscribers,
        crate::inbound::http::tickers::broadcast_alert,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        Carrier,
        AlertReport,
        FailedDelivery,
        RegisterRequest,
        SubscriberResponse,
        AvailabilityResponse,
        ContactResponse,
        SubscriptionsResponse,
        SubscribeRequest,
        SubscribersResponse,
        AlertRequest,
    )),
    tags(
        (name = "users", description = "Subscriber registration and subscriptions"),
        (name = "tickers", description = "Ticker subscriber lists and alerts"),
        (name = "health", description = "Probes for orchestrators")
    )
)]
pub struct ApiDoc;
