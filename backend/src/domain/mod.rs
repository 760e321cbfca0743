//! Domain primitives, aggregates and services.
//!
//! Purpose: keep the user ↔ ticker subscription mapping consistent and
//! validate every value before it reaches a port. Transport and storage
//! concerns live in `inbound` and `outbound`.
//!
//! Public surface:
//! - DomainError / ErrorCode: API error payload and stable identifiers.
//! - Subscriber, Contact, Username, PhoneNumber, Carrier: user records.
//! - Ticker, TickerSymbol: ticker records.
//! - SubscriptionRegistry: the registry service.
//! - TickerAlertService: SMS fan-out for a ticker.

pub mod error;
pub mod ports;
mod subscriber;
mod subscription_registry;
mod ticker;
mod ticker_alerts;
mod validation;

pub use self::error::{DomainError, ErrorCode, ErrorValidationError};
pub use self::subscriber::{
    Carrier, Contact, PHONE_DIGITS, PhoneNumber, Secret, Subscriber, Username,
};
pub use self::subscription_registry::{
    RegistryError, StorageError, SubscribeOutcome, SubscriptionRegistry,
};
pub use self::ticker::{Ticker, TickerSymbol};
pub use self::ticker_alerts::{AlertReport, FailedDelivery, TickerAlertService};
pub use self::validation::ValidationError;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use ticker_watch::domain::{ApiResult, DomainError};
///
/// fn handler() -> ApiResult<()> {
///     Err(DomainError::not_found("user not found: bob"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, DomainError>;
