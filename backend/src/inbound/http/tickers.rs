//! Ticker API handlers.
//!
//! ```text
//! GET  /api/v1/tickers/AAPL/subscribers
//! POST /api/v1/tickers/AAPL/alerts {"message":"earnings beat"}
//! ```

use std::collections::BTreeSet;

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AlertReport, DomainError, TickerSymbol, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Subscribers of a ticker, in username order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribersResponse {
    #[schema(value_type = String, example = "AAPL")]
    pub ticker: TickerSymbol,
    #[schema(value_type = Vec<String>)]
    pub subscribers: BTreeSet<Username>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertRequest {
    #[schema(example = "earnings beat estimates")]
    pub message: String,
}

/// List users subscribed to a ticker. Unknown tickers return an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/tickers/{ticker}/subscribers",
    params(("ticker" = String, Path, description = "Symbol; case and padding are ignored")),
    responses(
        (status = 200, description = "Subscribers", body = SubscribersResponse),
        (status = 400, description = "Empty ticker", body = DomainError)
    ),
    tags = ["tickers"],
    operation_id = "listSubscribers"
)]
#[get("/tickers/{ticker}/subscribers")]
pub async fn list_subscribers(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SubscribersResponse>> {
    let ticker = TickerSymbol::normalise(&path)?;
    let subscribers = state.subscriptions_query.subscribers(ticker.as_str()).await?;
    Ok(web::Json(SubscribersResponse {
        ticker,
        subscribers,
    }))
}

/// Text an alert to every subscriber of a ticker.
#[utoipa::path(
    post,
    path = "/api/v1/tickers/{ticker}/alerts",
    params(("ticker" = String, Path)),
    request_body = AlertRequest,
    responses(
        (status = 200, description = "Delivery report", body = AlertReport),
        (status = 400, description = "Empty ticker or message", body = DomainError),
        (status = 503, description = "Store unavailable", body = DomainError)
    ),
    tags = ["tickers"],
    operation_id = "broadcastAlert"
)]
#[post("/tickers/{ticker}/alerts")]
pub async fn broadcast_alert(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AlertRequest>,
) -> ApiResult<web::Json<AlertReport>> {
    let report = state.alerts.broadcast(&path, &payload.message).await?;
    Ok(web::Json(report))
}
