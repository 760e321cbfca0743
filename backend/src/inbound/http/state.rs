//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! tests can swap in mocks or in-memory registries.

use std::sync::Arc;

use crate::domain::ports::{SubscriptionCommand, SubscriptionQuery, TickerAlertCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub subscriptions: Arc<dyn SubscriptionCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionQuery>,
    pub alerts: Arc<dyn TickerAlertCommand>,
}

impl HttpState {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionCommand>,
        subscriptions_query: Arc<dyn SubscriptionQuery>,
        alerts: Arc<dyn TickerAlertCommand>,
    ) -> Self {
        Self {
            subscriptions,
            subscriptions_query,
            alerts,
        }
    }
}
