//! Driving port for reading either side of the subscription mapping.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{Contact, DomainError, TickerSymbol, Username};

/// Domain use-case port for subscription reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionQuery: Send + Sync {
    /// `true` when no subscriber holds this username.
    async fn username_available(&self, user_id: &str) -> Result<bool, DomainError>;

    /// Tickers followed by a user. Unknown users are `not_found`.
    async fn subscriptions(&self, user_id: &str) -> Result<BTreeSet<TickerSymbol>, DomainError>;

    /// Users following a ticker. Unknown tickers yield an empty set.
    async fn subscribers(&self, ticker: &str) -> Result<BTreeSet<Username>, DomainError>;

    /// Phone number and carrier for a user. Unknown users are `not_found`.
    async fn contact(&self, user_id: &str) -> Result<Contact, DomainError>;
}
