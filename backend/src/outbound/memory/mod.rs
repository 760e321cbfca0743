//! In-process repositories used when no database is configured.
//!
//! Each mutation runs under a single mutex guard, so the read-modify-write of
//! a set-insert is atomic with respect to every other caller.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    SubscriberRepository, SubscriberRepositoryError, TickerRepository, TickerRepositoryError,
};
use crate::domain::{Subscriber, Ticker, TickerSymbol, Username};

fn lock<'a, K, V, E>(
    state: &'a Mutex<HashMap<K, V>>,
    poisoned: impl FnOnce(&'static str) -> E,
) -> Result<MutexGuard<'a, HashMap<K, V>>, E> {
    state
        .lock()
        .map_err(|_| poisoned("in-memory store lock poisoned"))
}

/// Subscriber records keyed by username.
#[derive(Debug, Default)]
pub struct InMemorySubscriberRepository {
    state: Mutex<HashMap<Username, Subscriber>>,
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberRepository {
    async fn insert(&self, subscriber: &Subscriber) -> Result<(), SubscriberRepositoryError> {
        let mut state = lock(&self.state, SubscriberRepositoryError::connection)?;
        if state.contains_key(subscriber.user_id()) {
            return Err(SubscriberRepositoryError::duplicate_username(
                subscriber.user_id().as_str(),
            ));
        }
        state.insert(subscriber.user_id().clone(), subscriber.clone());
        Ok(())
    }

    async fn exists(&self, user_id: &Username) -> Result<bool, SubscriberRepositoryError> {
        let state = lock(&self.state, SubscriberRepositoryError::connection)?;
        Ok(state.contains_key(user_id))
    }

    async fn find(
        &self,
        user_id: &Username,
    ) -> Result<Option<Subscriber>, SubscriberRepositoryError> {
        let state = lock(&self.state, SubscriberRepositoryError::connection)?;
        Ok(state.get(user_id).cloned())
    }

    async fn add_ticker(
        &self,
        user_id: &Username,
        ticker: &TickerSymbol,
    ) -> Result<bool, SubscriberRepositoryError> {
        let mut state = lock(&self.state, SubscriberRepositoryError::connection)?;
        let subscriber = state
            .get_mut(user_id)
            .ok_or_else(|| SubscriberRepositoryError::missing_subscriber(user_id.as_str()))?;
        Ok(subscriber.follow(ticker.clone()))
    }
}

/// Ticker records keyed by symbol.
#[derive(Debug, Default)]
pub struct InMemoryTickerRepository {
    state: Mutex<HashMap<TickerSymbol, Ticker>>,
}

#[async_trait]
impl TickerRepository for InMemoryTickerRepository {
    async fn add_subscriber(
        &self,
        ticker: &TickerSymbol,
        user_id: &Username,
    ) -> Result<bool, TickerRepositoryError> {
        let mut state = lock(&self.state, TickerRepositoryError::connection)?;
        match state.get_mut(ticker) {
            Some(record) => Ok(record.add_subscriber(user_id.clone())),
            None => {
                state.insert(
                    ticker.clone(),
                    Ticker::first_subscription(ticker.clone(), user_id.clone()),
                );
                Ok(true)
            }
        }
    }

    async fn find(&self, ticker: &TickerSymbol) -> Result<Option<Ticker>, TickerRepositoryError> {
        let state = lock(&self.state, TickerRepositoryError::connection)?;
        Ok(state.get(ticker).cloned())
    }
}
