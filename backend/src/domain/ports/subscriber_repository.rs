//! Port for subscriber (user record) persistence.
//!
//! Every mutation exposed here must be a single atomic conditional write so
//! concurrent requests cannot lose each other's updates.

use async_trait::async_trait;

use crate::domain::{Subscriber, TickerSymbol, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by subscriber repository adapters.
    pub enum SubscriberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "subscriber repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "subscriber repository query failed: {message}",
        /// A record with this username already exists.
        DuplicateUsername { user_id: String } =>
            "username already registered: {user_id}",
        /// The record targeted by an update does not exist.
        MissingSubscriber { user_id: String } =>
            "subscriber does not exist: {user_id}",
    }
}

/// Port for subscriber storage and retrieval.
///
/// Usernames are unique at the storage layer: [`SubscriberRepository::insert`]
/// fails with [`SubscriberRepositoryError::DuplicateUsername`] rather than
/// overwriting an existing record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Store a newly registered subscriber.
    async fn insert(&self, subscriber: &Subscriber) -> Result<(), SubscriberRepositoryError>;

    /// Report whether a subscriber with this username exists.
    async fn exists(&self, user_id: &Username) -> Result<bool, SubscriberRepositoryError>;

    /// Fetch a subscriber by username.
    async fn find(&self, user_id: &Username)
    -> Result<Option<Subscriber>, SubscriberRepositoryError>;

    /// Add `ticker` to the subscriber's set in one atomic step.
    ///
    /// Returns `true` when the set changed and `false` when the ticker was
    /// already present. Fails with
    /// [`SubscriberRepositoryError::MissingSubscriber`] for unknown users.
    async fn add_ticker(
        &self,
        user_id: &Username,
        ticker: &TickerSymbol,
    ) -> Result<bool, SubscriberRepositoryError>;
}
