//! Subscription registry.
//!
//! Keeps the user → tickers and ticker → users mappings consistent. Each side
//! is updated through one atomic set-insert on its repository, so replaying a
//! subscription is a no-op and concurrent first subscriptions to the same new
//! ticker never drop a subscriber.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    RegisterSubscriberRequest, SubscriberRepository, SubscriberRepositoryError,
    SubscriptionCommand, SubscriptionQuery, TickerRepository, TickerRepositoryError,
};
use crate::domain::{
    Carrier, Contact, DomainError, PhoneNumber, Secret, Subscriber, Ticker, TickerSymbol, Username,
    ValidationError,
};

/// Persistence failures surfaced by the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store could not be reached.
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },
    /// A read or write failed while executing.
    #[error("storage operation failed: {message}")]
    Failed { message: String },
    /// A write targeted a user record that does not exist.
    #[error("cannot update missing user: {user_id}")]
    MissingRecord { user_id: String },
}

/// Failures raised by [`SubscriptionRegistry`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Lookup on a user that does not exist.
    #[error("user not found: {user_id}")]
    NotFound { user_id: String },
    /// The storage layer's uniqueness constraint rejected a registration.
    #[error("username already taken: {user_id}")]
    UsernameTaken { user_id: String },
    /// Persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<SubscriberRepositoryError> for RegistryError {
    fn from(error: SubscriberRepositoryError) -> Self {
        match error {
            SubscriberRepositoryError::Connection { message } => {
                StorageError::Unavailable { message }.into()
            }
            SubscriberRepositoryError::Query { message } => StorageError::Failed { message }.into(),
            SubscriberRepositoryError::DuplicateUsername { user_id } => {
                Self::UsernameTaken { user_id }
            }
            SubscriberRepositoryError::MissingSubscriber { user_id } => {
                StorageError::MissingRecord { user_id }.into()
            }
        }
    }
}

impl From<TickerRepositoryError> for RegistryError {
    fn from(error: TickerRepositoryError) -> Self {
        match error {
            TickerRepositoryError::Connection { message } => {
                StorageError::Unavailable { message }.into()
            }
            TickerRepositoryError::Query { message } => StorageError::Failed { message }.into(),
        }
    }
}

/// Client-facing text for storage outages; driver detail stays in the logs.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "subscription store unavailable";

impl From<RegistryError> for DomainError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::Validation(err) => err.into(),
            RegistryError::NotFound { user_id } => Self::not_found(format!("user not found: {user_id}"))
                .with_details(json!({ "userId": user_id, "code": "user_not_found" })),
            RegistryError::UsernameTaken { user_id } => {
                Self::conflict(format!("username already taken: {user_id}"))
                    .with_details(json!({ "field": "userId", "code": "username_taken" }))
            }
            RegistryError::Storage(StorageError::Unavailable { message }) => {
                warn!(%message, "subscription store unavailable");
                Self::service_unavailable(STORE_UNAVAILABLE_MESSAGE)
            }
            RegistryError::Storage(StorageError::Failed { message }) => {
                Self::internal(format!("subscription store error: {message}"))
            }
            RegistryError::Storage(StorageError::MissingRecord { user_id }) => {
                Self::not_found(format!("user not found: {user_id}"))
                    .with_details(json!({ "userId": user_id, "code": "user_not_found" }))
            }
        }
    }
}

/// What a [`SubscriptionRegistry::subscribe`] call changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeOutcome {
    /// Normalised ticker the user is now subscribed to.
    pub ticker: TickerSymbol,
    /// The ticker was newly added to the user's set.
    pub added_to_user: bool,
    /// The user was newly added to the ticker's subscriber set.
    pub added_to_ticker: bool,
}

impl SubscribeOutcome {
    /// `true` when the call left stored state untouched.
    pub fn is_replay(&self) -> bool {
        !self.added_to_user && !self.added_to_ticker
    }
}

/// Registry holding injected subscriber and ticker repositories.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use ticker_watch::domain::SubscriptionRegistry;
/// use ticker_watch::outbound::memory::{InMemorySubscriberRepository, InMemoryTickerRepository};
///
/// # async fn demo() -> Result<(), ticker_watch::domain::RegistryError> {
/// let registry = SubscriptionRegistry::new(
///     Arc::new(InMemorySubscriberRepository::default()),
///     Arc::new(InMemoryTickerRepository::default()),
/// );
/// registry.create_user("bob", "pw", "(555) 123-4567", "verizon").await?;
/// registry.subscribe("bob", " aapl ").await?;
/// assert!(registry.get_subscribers("AAPL").await?.len() == 1);
/// # Ok(())
/// # }
/// ```
pub struct SubscriptionRegistry<S: ?Sized, T: ?Sized> {
    subscribers: Arc<S>,
    tickers: Arc<T>,
}

impl<S: ?Sized, T: ?Sized> Clone for SubscriptionRegistry<S, T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
            tickers: Arc::clone(&self.tickers),
        }
    }
}

impl<S: ?Sized, T: ?Sized> SubscriptionRegistry<S, T> {
    /// Create a registry over the given repositories.
    pub fn new(subscribers: Arc<S>, tickers: Arc<T>) -> Self {
        Self {
            subscribers,
            tickers,
        }
    }
}

impl<S, T> SubscriptionRegistry<S, T>
where
    S: SubscriberRepository + ?Sized,
    T: TickerRepository + ?Sized,
{
    /// Register a user with an empty subscription set.
    ///
    /// The phone number is reduced to its digits and must contain exactly ten.
    /// Callers are expected to check [`Self::is_username_available`] first;
    /// the store still rejects duplicates with [`RegistryError::UsernameTaken`].
    pub async fn create_user(
        &self,
        user_id: &str,
        secret: &str,
        phone: &str,
        carrier: &str,
    ) -> Result<Subscriber, RegistryError> {
        let user_id = Username::new(user_id)?;
        let secret = Secret::new(secret)?;
        let phone = PhoneNumber::normalise(phone)?;
        let carrier: Carrier = carrier.parse()?;

        let subscriber = Subscriber::register(user_id, secret, phone, carrier);
        self.subscribers.insert(&subscriber).await?;
        info!(user_id = %subscriber.user_id(), %carrier, "subscriber registered");
        Ok(subscriber)
    }

    /// `true` when no stored user has this identifier.
    pub async fn is_username_available(&self, user_id: &str) -> Result<bool, RegistryError> {
        let user_id = Username::new(user_id)?;
        let taken = self.subscribers.exists(&user_id).await?;
        Ok(!taken)
    }

    /// Subscribe `user_id` to `ticker_symbol`.
    ///
    /// The symbol is trimmed and uppercased. The user's set is updated first;
    /// an unknown user therefore fails with [`StorageError::MissingRecord`]
    /// before any ticker record is created.
    pub async fn subscribe(
        &self,
        user_id: &str,
        ticker_symbol: &str,
    ) -> Result<SubscribeOutcome, RegistryError> {
        let user_id = Username::new(user_id)?;
        let ticker = TickerSymbol::normalise(ticker_symbol)?;

        let added_to_user = self.subscribers.add_ticker(&user_id, &ticker).await?;
        let added_to_ticker = self.tickers.add_subscriber(&ticker, &user_id).await?;

        let outcome = SubscribeOutcome {
            ticker,
            added_to_user,
            added_to_ticker,
        };
        debug!(
            %user_id,
            ticker = %outcome.ticker,
            added_to_user,
            added_to_ticker,
            "subscription recorded"
        );
        Ok(outcome)
    }

    /// Tickers followed by `user_id`.
    pub async fn get_subscriptions(
        &self,
        user_id: &str,
    ) -> Result<BTreeSet<TickerSymbol>, RegistryError> {
        let subscriber = self.require_subscriber(user_id).await?;
        Ok(subscriber.tickers().clone())
    }

    /// Users following `ticker_symbol`; empty when the ticker has no record.
    pub async fn get_subscribers(
        &self,
        ticker_symbol: &str,
    ) -> Result<BTreeSet<Username>, RegistryError> {
        let ticker = TickerSymbol::normalise(ticker_symbol)?;
        let record = self.tickers.find(&ticker).await?;
        Ok(record.map(Ticker::into_subscribers).unwrap_or_default())
    }

    /// Phone number and carrier for `user_id`.
    pub async fn get_contact(&self, user_id: &str) -> Result<Contact, RegistryError> {
        let subscriber = self.require_subscriber(user_id).await?;
        Ok(subscriber.contact().clone())
    }

    async fn require_subscriber(&self, user_id: &str) -> Result<Subscriber, RegistryError> {
        let user_id = Username::new(user_id)?;
        self.subscribers
            .find(&user_id)
            .await?
            .ok_or_else(|| RegistryError::NotFound {
                user_id: user_id.into(),
            })
    }
}

#[async_trait]
impl<S, T> SubscriptionCommand for SubscriptionRegistry<S, T>
where
    S: SubscriberRepository + ?Sized,
    T: TickerRepository + ?Sized,
{
    async fn register(&self, request: RegisterSubscriberRequest) -> Result<Subscriber, DomainError> {
        let RegisterSubscriberRequest {
            user_id,
            password,
            phone,
            carrier,
        } = request;
        self.create_user(&user_id, &password, &phone, &carrier)
            .await
            .map_err(DomainError::from)
    }

    async fn follow(&self, user_id: &str, ticker: &str) -> Result<BTreeSet<TickerSymbol>, DomainError> {
        self.subscribe(user_id, ticker).await?;
        Ok(self.get_subscriptions(user_id).await?)
    }
}

#[async_trait]
impl<S, T> SubscriptionQuery for SubscriptionRegistry<S, T>
where
    S: SubscriberRepository + ?Sized,
    T: TickerRepository + ?Sized,
{
    async fn username_available(&self, user_id: &str) -> Result<bool, DomainError> {
        Ok(self.is_username_available(user_id).await?)
    }

    async fn subscriptions(&self, user_id: &str) -> Result<BTreeSet<TickerSymbol>, DomainError> {
        Ok(self.get_subscriptions(user_id).await?)
    }

    async fn subscribers(&self, ticker: &str) -> Result<BTreeSet<Username>, DomainError> {
        Ok(self.get_subscribers(ticker).await?)
    }

    async fn contact(&self, user_id: &str) -> Result<Contact, DomainError> {
        Ok(self.get_contact(user_id).await?)
    }
}

#[cfg(test)]
#[path = "subscription_registry_tests.rs"]
mod tests;
