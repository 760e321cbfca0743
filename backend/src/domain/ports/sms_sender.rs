//! Driven port for handing a text message to an email-to-SMS gateway.
//!
//! SMTP delivery lives outside this crate; adapters only need to accept a
//! gateway address such as `5551234567@vtext.com` and a message body.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by SMS gateway adapters.
    pub enum SmsDeliveryError {
        /// The gateway refused the message for this address.
        Rejected { message: String } => "sms gateway rejected message: {message}",
        /// The gateway could not be reached.
        Unavailable { message: String } => "sms gateway unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver `body` to a single gateway `address`.
    async fn send(&self, address: &str, body: &str) -> Result<(), SmsDeliveryError>;
}
