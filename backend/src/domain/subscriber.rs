//! Subscriber aggregate and its contact details.
//!
//! A subscriber is a registered user together with the phone number and
//! carrier used to reach them and the set of tickers they follow.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{TickerSymbol, ValidationError};

/// Number of digits in a normalised phone number.
pub const PHONE_DIGITS: usize = 10;

/// Unique username identifying a subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Examples
    /// ```
    /// use ticker_watch::domain::Username;
    ///
    /// assert!(Username::new("bob").is_ok());
    /// assert!(Username::new(" bob").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if value.trim() != value {
            return Err(ValidationError::UsernameWhitespace);
        }
        Ok(Self(value))
    }

    /// Borrow the username as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Credential secret supplied at registration.
///
/// The value is redacted from `Debug` output and wiped when dropped. Hashing
/// is the job of the authentication layer, not this type.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Construct a secret, rejecting empty input.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptySecret);
        }
        Ok(Self(Zeroizing::new(value)))
    }

    /// Borrow the raw secret for persistence adapters.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Phone number reduced to its ten digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strip every non-digit character and require exactly ten digits.
    ///
    /// # Examples
    /// ```
    /// use ticker_watch::domain::PhoneNumber;
    ///
    /// let phone = PhoneNumber::normalise("(555) 123-4567").expect("valid phone");
    /// assert_eq!(phone.as_ref(), "5551234567");
    /// assert!(PhoneNumber::normalise("555-1234").is_err());
    /// ```
    pub fn normalise(raw: &str) -> Result<Self, ValidationError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != PHONE_DIGITS {
            return Err(ValidationError::InvalidPhoneNumber {
                expected: PHONE_DIGITS,
                found: digits.len(),
            });
        }
        Ok(Self(digits))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalise(&value)
    }
}

/// Mobile operator used to pick an email-to-SMS gateway.
///
/// Parsing is case-sensitive. `att` and `at&t` are distinct stored values
/// that share a gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Carrier {
    #[serde(rename = "att")]
    Att,
    #[serde(rename = "at&t")]
    AtAndT,
    #[serde(rename = "verizon")]
    Verizon,
    #[serde(rename = "boost")]
    Boost,
    #[serde(rename = "virgin")]
    Virgin,
}

impl Carrier {
    /// Every supported carrier.
    pub const ALL: [Self; 5] = [
        Self::Att,
        Self::AtAndT,
        Self::Verizon,
        Self::Boost,
        Self::Virgin,
    ];

    /// Stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Att => "att",
            Self::AtAndT => "at&t",
            Self::Verizon => "verizon",
            Self::Boost => "boost",
            Self::Virgin => "virgin",
        }
    }

    /// Domain suffix of the carrier's email-to-SMS gateway.
    ///
    /// # Examples
    /// ```
    /// use ticker_watch::domain::Carrier;
    ///
    /// assert_eq!(Carrier::AtAndT.gateway_domain(), "txt.att.net");
    /// assert_eq!(Carrier::Verizon.gateway_domain(), "vtext.com");
    /// ```
    pub fn gateway_domain(&self) -> &'static str {
        match self {
            Self::Att | Self::AtAndT => "txt.att.net",
            Self::Verizon => "vtext.com",
            Self::Boost => "myboostmobile.com",
            Self::Virgin => "vmobl.com",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Carrier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|carrier| carrier.as_str() == s)
            .ok_or_else(|| ValidationError::UnsupportedCarrier {
                value: s.to_owned(),
            })
    }
}

/// How to reach a subscriber by SMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub phone: PhoneNumber,
    pub carrier: Carrier,
}

impl Contact {
    /// Email address of the carrier gateway that forwards to this phone.
    ///
    /// # Examples
    /// ```
    /// use ticker_watch::domain::{Carrier, Contact, PhoneNumber};
    ///
    /// let contact = Contact {
    ///     phone: PhoneNumber::normalise("555 123 4567").expect("valid phone"),
    ///     carrier: Carrier::Virgin,
    /// };
    /// assert_eq!(contact.sms_address(), "5551234567@vmobl.com");
    /// ```
    pub fn sms_address(&self) -> String {
        format!("{}@{}", self.phone, self.carrier.gateway_domain())
    }
}

/// Registered user and the tickers they follow.
///
/// ## Invariants
/// - `phone` holds exactly ten digits.
/// - `tickers` contains normalised symbols only, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    user_id: Username,
    secret: Secret,
    contact: Contact,
    tickers: BTreeSet<TickerSymbol>,
}

impl Subscriber {
    /// Build a freshly registered subscriber with no subscriptions.
    pub fn register(user_id: Username, secret: Secret, phone: PhoneNumber, carrier: Carrier) -> Self {
        Self::from_parts(user_id, secret, Contact { phone, carrier }, BTreeSet::new())
    }

    /// Rebuild a subscriber from stored components.
    pub fn from_parts(
        user_id: Username,
        secret: Secret,
        contact: Contact,
        tickers: BTreeSet<TickerSymbol>,
    ) -> Self {
        Self {
            user_id,
            secret,
            contact,
            tickers,
        }
    }

    /// Unique username.
    pub fn user_id(&self) -> &Username {
        &self.user_id
    }

    /// Credential secret.
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// Phone number and carrier.
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Followed tickers in symbol order.
    pub fn tickers(&self) -> &BTreeSet<TickerSymbol> {
        &self.tickers
    }

    /// Add a ticker, returning `true` when it was not already followed.
    pub fn follow(&mut self, ticker: TickerSymbol) -> bool {
        self.tickers.insert(ticker)
    }
}

#[cfg(test)]
mod tests;
