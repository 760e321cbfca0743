//! Wire driven adapters into the HTTP state.

use std::sync::Arc;

use tracing::info;

use ticker_watch::config::{AppSettings, SettingsError};
use ticker_watch::domain::ports::{SmsSender, SubscriberRepository, TickerRepository};
use ticker_watch::domain::{SubscriptionRegistry, TickerAlertService};
use ticker_watch::inbound::http::state::HttpState;
use ticker_watch::outbound::memory::{InMemorySubscriberRepository, InMemoryTickerRepository};
use ticker_watch::outbound::persistence::{
    DbPool, DieselSubscriberRepository, DieselTickerRepository, MigrationError, PoolConfig,
    PoolError, run_pending_migrations,
};
use ticker_watch::outbound::sms::LoggingSmsSender;

/// Failures that stop the service from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

impl From<StartupError> for std::io::Error {
    fn from(error: StartupError) -> Self {
        std::io::Error::other(error)
    }
}

type Repositories = (Arc<dyn SubscriberRepository>, Arc<dyn TickerRepository>);

async fn build_repositories(settings: &AppSettings) -> Result<Repositories, StartupError> {
    let Some(url) = settings.database_url() else {
        info!("no database configured; using in-memory subscription store");
        return Ok((
            Arc::new(InMemorySubscriberRepository::default()),
            Arc::new(InMemoryTickerRepository::default()),
        ));
    };

    run_pending_migrations(url).await?;
    let config = PoolConfig::new(url).with_max_size(settings.db_max_connections()?);
    let pool = DbPool::new(config).await?;
    info!("using PostgreSQL subscription store");
    Ok((
        Arc::new(DieselSubscriberRepository::new(pool.clone())),
        Arc::new(DieselTickerRepository::new(pool)),
    ))
}

/// Build the registry and alert service over the configured storage.
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let (subscribers, tickers) = build_repositories(settings).await?;
    let registry = Arc::new(SubscriptionRegistry::new(subscribers, tickers));
    let sender: Arc<dyn SmsSender> = Arc::new(LoggingSmsSender);
    let alerts = Arc::new(TickerAlertService::new(registry.clone(), sender));
    Ok(HttpState::new(registry.clone(), registry, alerts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn memory_store_is_used_without_database() {
        let settings = AppSettings {
            bind_addr: None,
            database_url: None,
            db_max_connections: None,
        };

        let state = build_http_state(&settings).await.expect("state builds");

        state
            .subscriptions
            .register(ticker_watch::domain::ports::RegisterSubscriberRequest {
                user_id: "bob".to_owned(),
                password: "pw".to_owned(),
                phone: "5551234567".to_owned(),
                carrier: "vtext".to_owned(),
            })
            .await
            .expect_err("vtext is a domain, not a carrier");
        let available = state
            .subscriptions_query
            .username_available("bob")
            .await
            .expect("lookup");
        assert!(available);
    }
}
