//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod sms_sender;
mod subscriber_repository;
mod subscription_command;
mod subscription_query;
mod ticker_alert_command;
mod ticker_repository;

#[cfg(test)]
pub use sms_sender::MockSmsSender;
pub use sms_sender::{SmsDeliveryError, SmsSender};
#[cfg(test)]
pub use subscriber_repository::MockSubscriberRepository;
pub use subscriber_repository::{SubscriberRepository, SubscriberRepositoryError};
#[cfg(test)]
pub use subscription_command::MockSubscriptionCommand;
pub use subscription_command::{RegisterSubscriberRequest, SubscriptionCommand};
#[cfg(test)]
pub use subscription_query::MockSubscriptionQuery;
pub use subscription_query::SubscriptionQuery;
#[cfg(test)]
pub use ticker_alert_command::MockTickerAlertCommand;
pub use ticker_alert_command::TickerAlertCommand;
#[cfg(test)]
pub use ticker_repository::MockTickerRepository;
pub use ticker_repository::{TickerRepository, TickerRepositoryError};
