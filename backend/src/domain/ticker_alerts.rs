//! Fan a ticker alert out to every subscriber over their carrier's SMS
//! gateway.
//!
//! Delivery failures for one subscriber do not stop the broadcast; they are
//! collected in the [`AlertReport`] so callers can see who missed the alert.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::ports::{SmsSender, SubscriptionQuery, TickerAlertCommand};
use crate::domain::{DomainError, ErrorCode, TickerSymbol, Username, ValidationError};

/// A subscriber the alert could not reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedDelivery {
    #[schema(value_type = String, example = "bob")]
    pub user_id: Username,
    #[schema(example = "sms gateway unavailable: timeout")]
    pub reason: String,
}

/// Outcome of a broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertReport {
    #[schema(value_type = String, example = "AAPL")]
    pub ticker: TickerSymbol,
    #[schema(value_type = Vec<String>)]
    pub delivered: Vec<Username>,
    pub failed: Vec<FailedDelivery>,
}

/// Alert service composed from the subscription read port and an SMS sender.
pub struct TickerAlertService<Q: ?Sized, M: ?Sized> {
    subscriptions: Arc<Q>,
    sender: Arc<M>,
}

impl<Q: ?Sized, M: ?Sized> TickerAlertService<Q, M> {
    pub fn new(subscriptions: Arc<Q>, sender: Arc<M>) -> Self {
        Self {
            subscriptions,
            sender,
        }
    }
}

impl<Q, M> TickerAlertService<Q, M>
where
    Q: SubscriptionQuery + ?Sized,
    M: SmsSender + ?Sized,
{
    async fn deliver(&self, user_id: &Username, body: &str) -> Result<(), String> {
        let contact = self
            .subscriptions
            .contact(user_id.as_str())
            .await
            .map_err(|err| match err.code() {
                ErrorCode::InternalError => "contact lookup failed".to_owned(),
                _ => err.message().to_owned(),
            })?;
        self.sender
            .send(&contact.sms_address(), body)
            .await
            .map_err(|err| err.to_string())
    }
}

#[async_trait]
impl<Q, M> TickerAlertCommand for TickerAlertService<Q, M>
where
    Q: SubscriptionQuery + ?Sized,
    M: SmsSender + ?Sized,
{
    async fn broadcast(&self, ticker: &str, message: &str) -> Result<AlertReport, DomainError> {
        let ticker = TickerSymbol::normalise(ticker)?;
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }

        let recipients = self.subscriptions.subscribers(ticker.as_str()).await?;
        let body = format!("{ticker}: {message}");
        let mut report = AlertReport {
            ticker,
            delivered: Vec::with_capacity(recipients.len()),
            failed: Vec::new(),
        };

        for user_id in recipients {
            match self.deliver(&user_id, &body).await {
                Ok(()) => report.delivered.push(user_id),
                Err(reason) => {
                    warn!(%user_id, ticker = %report.ticker, %reason, "alert delivery failed");
                    report.failed.push(FailedDelivery { user_id, reason });
                }
            }
        }

        info!(
            ticker = %report.ticker,
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "ticker alert broadcast"
        );
        Ok(report)
    }
}
