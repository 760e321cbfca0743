//! Driving port for registration and subscription writes.
//!
//! Inbound adapters call this port with raw request values; validation and
//! normalisation happen behind it.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{DomainError, Subscriber, TickerSymbol};

/// Raw registration values as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSubscriberRequest {
    pub user_id: String,
    pub password: String,
    pub phone: String,
    pub carrier: String,
}

/// Domain use-case port for mutating subscriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionCommand: Send + Sync {
    /// Register a new subscriber and return the stored record.
    async fn register(&self, request: RegisterSubscriberRequest) -> Result<Subscriber, DomainError>;

    /// Subscribe a user to a ticker and return their full subscription set.
    async fn follow(&self, user_id: &str, ticker: &str) -> Result<BTreeSet<TickerSymbol>, DomainError>;
}
