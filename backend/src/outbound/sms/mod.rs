//! SMS sender that records deliveries in the log instead of talking SMTP.
//!
//! Only the gateway domain is logged; the local part of the address is the
//! subscriber's phone number.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{SmsDeliveryError, SmsSender};

/// Writes each outgoing alert to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSmsSender;

#[async_trait]
impl SmsSender for LoggingSmsSender {
    async fn send(&self, address: &str, body: &str) -> Result<(), SmsDeliveryError> {
        let (_, gateway) = address
            .split_once('@')
            .filter(|(local, domain)| !local.is_empty() && !domain.is_empty())
            .ok_or_else(|| SmsDeliveryError::rejected("malformed gateway address"))?;
        info!(gateway, body_len = body.len(), "sms alert queued");
        Ok(())
    }
}
