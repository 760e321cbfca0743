//! Validation failures raised while constructing domain values.

use serde_json::json;

use super::DomainError;

/// Reasons raw input was rejected by a domain constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Username was empty.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username carried leading or trailing whitespace.
    #[error("username must not start or end with whitespace")]
    UsernameWhitespace,
    /// Credential secret was empty.
    #[error("password must not be empty")]
    EmptySecret,
    /// Phone number did not reduce to exactly ten digits.
    #[error("phone number must contain exactly {expected} digits, found {found}")]
    InvalidPhoneNumber { expected: usize, found: usize },
    /// Carrier is not one of the supported gateway operators.
    #[error("unsupported carrier: {value}")]
    UnsupportedCarrier { value: String },
    /// Ticker symbol was empty after trimming.
    #[error("ticker symbol must not be empty")]
    EmptyTicker,
    /// Alert message body was empty.
    #[error("alert message must not be empty")]
    EmptyMessage,
}

impl ValidationError {
    /// Field name reported to clients alongside the error.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameWhitespace => "userId",
            Self::EmptySecret => "password",
            Self::InvalidPhoneNumber { .. } => "phone",
            Self::UnsupportedCarrier { .. } => "carrier",
            Self::EmptyTicker => "ticker",
            Self::EmptyMessage => "message",
        }
    }

    /// Stable machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::UsernameWhitespace => "username_whitespace",
            Self::EmptySecret => "empty_password",
            Self::InvalidPhoneNumber { .. } => "invalid_phone_number",
            Self::UnsupportedCarrier { .. } => "unsupported_carrier",
            Self::EmptyTicker => "empty_ticker",
            Self::EmptyMessage => "empty_message",
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(error: ValidationError) -> Self {
        let details = json!({ "field": error.field(), "code": error.reason() });
        Self::invalid_request(error.to_string()).with_details(details)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn converts_into_invalid_request_with_field_details() {
        let error = DomainError::from(ValidationError::InvalidPhoneNumber {
            expected: 10,
            found: 7,
        });

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.message(),
            "phone number must contain exactly 10 digits, found 7"
        );
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "phone");
        assert_eq!(details["code"], "invalid_phone_number");
    }

    #[rstest]
    #[case(ValidationError::EmptyUsername, "userId")]
    #[case(ValidationError::EmptySecret, "password")]
    #[case(ValidationError::UnsupportedCarrier { value: "sprint".to_owned() }, "carrier")]
    #[case(ValidationError::EmptyTicker, "ticker")]
    #[case(ValidationError::EmptyMessage, "message")]
    fn reports_offending_field(#[case] error: ValidationError, #[case] field: &str) {
        assert_eq!(error.field(), field);
    }
}
