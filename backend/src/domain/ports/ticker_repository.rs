//! Port for ticker subscriber-list persistence.

use async_trait::async_trait;

use crate::domain::{Ticker, TickerSymbol, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ticker repository adapters.
    pub enum TickerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ticker repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "ticker repository query failed: {message}",
    }
}

/// Port for ticker records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TickerRepository: Send + Sync {
    /// Ensure `user_id` is in the ticker's subscriber set, creating the ticker
    /// record when it does not exist yet.
    ///
    /// Create-or-append happens as one atomic upsert. Returns `true` when the
    /// subscriber set changed.
    async fn add_subscriber(
        &self,
        ticker: &TickerSymbol,
        user_id: &Username,
    ) -> Result<bool, TickerRepositoryError>;

    /// Fetch a ticker record.
    async fn find(&self, ticker: &TickerSymbol) -> Result<Option<Ticker>, TickerRepositoryError>;
}
