//! PostgreSQL persistence adapters using Diesel with `diesel-async` and a
//! `bb8` pool.
//!
//! Row structs and table definitions stay private to this module; the
//! repositories translate them into domain aggregates.
//!
//! # Example
//!
//! ```ignore
//! use ticker_watch::outbound::persistence::{DbPool, DieselSubscriberRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tickers")).await?;
//! let subscribers = DieselSubscriberRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_subscriber_repository;
mod diesel_ticker_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_subscriber_repository::DieselSubscriberRepository;
pub use diesel_ticker_repository::DieselTickerRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
