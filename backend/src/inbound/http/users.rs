//! Subscriber API handlers.
//!
//! ```text
//! POST /api/v1/users {"userId":"bob","password":"pw","phone":"(555) 123-4567","carrier":"verizon"}
//! GET  /api/v1/users/bob/availability
//! GET  /api/v1/users/bob/contact
//! GET  /api/v1/users/bob/subscriptions
//! POST /api/v1/users/bob/subscriptions {"ticker":"aapl"}
//! ```

use std::collections::BTreeSet;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RegisterSubscriberRequest;
use crate::domain::{Carrier, Contact, DomainError, Subscriber, TickerSymbol};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/v1/users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "bob")]
    pub user_id: String,
    pub password: String,
    /// Any formatting is accepted; exactly ten digits must remain.
    #[schema(example = "(555) 123-4567")]
    pub phone: String,
    #[schema(example = "verizon")]
    pub carrier: String,
}

impl From<RegisterRequest> for RegisterSubscriberRequest {
    fn from(value: RegisterRequest) -> Self {
        Self {
            user_id: value.user_id,
            password: value.password,
            phone: value.phone,
            carrier: value.carrier,
        }
    }
}

/// Registered subscriber, without the credential.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberResponse {
    pub user_id: String,
    #[schema(example = "5551234567")]
    pub phone: String,
    pub carrier: Carrier,
}

impl From<Subscriber> for SubscriberResponse {
    fn from(value: Subscriber) -> Self {
        Self {
            user_id: value.user_id().to_string(),
            phone: value.contact().phone.to_string(),
            carrier: value.contact().carrier,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub user_id: String,
    pub available: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub phone: String,
    pub carrier: Carrier,
    #[schema(example = "5551234567@vtext.com")]
    pub sms_address: String,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            sms_address: value.sms_address(),
            phone: value.phone.to_string(),
            carrier: value.carrier,
        }
    }
}

/// Tickers followed by a user, in symbol order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionsResponse {
    pub user_id: String,
    #[schema(value_type = Vec<String>, example = json!(["AAPL", "MSFT"]))]
    pub tickers: BTreeSet<TickerSymbol>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[schema(example = "aapl")]
    pub ticker: String,
}

/// Register a subscriber.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Subscriber registered", body = SubscriberResponse),
        (status = 400, description = "Invalid phone, carrier or username", body = DomainError),
        (status = 409, description = "Username already taken", body = DomainError),
        (status = 503, description = "Store unavailable", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "registerSubscriber"
)]
#[post("/users")]
pub async fn register_subscriber(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let subscriber = state
        .subscriptions
        .register(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(SubscriberResponse::from(subscriber)))
}

/// Check whether a username is free.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/availability",
    params(("userId" = String, Path, description = "Username to check")),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
        (status = 400, description = "Invalid username", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "usernameAvailability"
)]
#[get("/users/{user_id}/availability")]
pub async fn username_availability(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AvailabilityResponse>> {
    let user_id = path.into_inner();
    let available = state.subscriptions_query.username_available(&user_id).await?;
    Ok(web::Json(AvailabilityResponse { user_id, available }))
}

/// Phone number, carrier and gateway address for a subscriber.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/contact",
    params(("userId" = String, Path)),
    responses(
        (status = 200, description = "Contact details", body = ContactResponse),
        (status = 404, description = "Unknown user", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "subscriberContact"
)]
#[get("/users/{user_id}/contact")]
pub async fn subscriber_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContactResponse>> {
    let contact = state.subscriptions_query.contact(&path).await?;
    Ok(web::Json(contact.into()))
}

/// List the tickers a user follows.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/subscriptions",
    params(("userId" = String, Path)),
    responses(
        (status = 200, description = "Followed tickers", body = SubscriptionsResponse),
        (status = 404, description = "Unknown user", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "listSubscriptions"
)]
#[get("/users/{user_id}/subscriptions")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SubscriptionsResponse>> {
    let user_id = path.into_inner();
    let tickers = state.subscriptions_query.subscriptions(&user_id).await?;
    Ok(web::Json(SubscriptionsResponse { user_id, tickers }))
}

/// Follow a ticker. Replaying the request is harmless.
#[utoipa::path(
    post,
    path = "/api/v1/users/{userId}/subscriptions",
    params(("userId" = String, Path)),
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Updated subscriptions", body = SubscriptionsResponse),
        (status = 400, description = "Empty ticker", body = DomainError),
        (status = 404, description = "Unknown user", body = DomainError),
        (status = 503, description = "Store unavailable", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "subscribe"
)]
#[post("/users/{user_id}/subscriptions")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<SubscribeRequest>,
) -> ApiResult<web::Json<SubscriptionsResponse>> {
    let user_id = path.into_inner();
    let tickers = state
        .subscriptions
        .follow(&user_id, &payload.ticker)
        .await?;
    Ok(web::Json(SubscriptionsResponse { user_id, tickers }))
}
