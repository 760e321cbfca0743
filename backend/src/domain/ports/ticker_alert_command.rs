//! Driving port for fanning a ticker alert out to its subscribers.

use async_trait::async_trait;

use crate::domain::{AlertReport, DomainError};

/// Domain use-case port for ticker alerts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TickerAlertCommand: Send + Sync {
    /// Text `message` to every subscriber of `ticker`.
    async fn broadcast(&self, ticker: &str, message: &str) -> Result<AlertReport, DomainError>;
}
