//! Ticker symbols and the subscriber set recorded per ticker.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Username, ValidationError};

/// Stock symbol normalised to uppercase with no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Trim and uppercase `raw`, rejecting empty results.
    ///
    /// # Examples
    /// ```
    /// use ticker_watch::domain::TickerSymbol;
    ///
    /// let symbol = TickerSymbol::normalise(" aapl ").expect("valid ticker");
    /// assert_eq!(symbol.as_ref(), "AAPL");
    /// assert!(TickerSymbol::normalise("   ").is_err());
    /// ```
    pub fn normalise(raw: &str) -> Result<Self, ValidationError> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TickerSymbol {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TickerSymbol> for String {
    fn from(value: TickerSymbol) -> Self {
        value.0
    }
}

impl TryFrom<String> for TickerSymbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalise(&value)
    }
}

/// Ticker record listing the users subscribed to it.
///
/// Created lazily on first subscription and never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    symbol: TickerSymbol,
    subscribers: BTreeSet<Username>,
}

impl Ticker {
    /// Record a ticker with a single initial subscriber.
    pub fn first_subscription(symbol: TickerSymbol, user_id: Username) -> Self {
        Self::from_parts(symbol, BTreeSet::from([user_id]))
    }

    /// Rebuild a ticker from stored components.
    pub fn from_parts(symbol: TickerSymbol, subscribers: BTreeSet<Username>) -> Self {
        Self {
            symbol,
            subscribers,
        }
    }

    /// Normalised symbol.
    pub fn symbol(&self) -> &TickerSymbol {
        &self.symbol
    }

    /// Subscribed usernames in order.
    pub fn subscribers(&self) -> &BTreeSet<Username> {
        &self.subscribers
    }

    /// Add a subscriber, returning `true` when they were not already present.
    pub fn add_subscriber(&mut self, user_id: Username) -> bool {
        self.subscribers.insert(user_id)
    }

    /// Consume the record, yielding its subscriber set.
    pub fn into_subscribers(self) -> BTreeSet<Username> {
        self.subscribers
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::lowercase("aapl", "AAPL")]
    #[case::padded("  msft\t", "MSFT")]
    #[case::mixed("BrK.b", "BRK.B")]
    fn normalise_trims_and_uppercases(#[case] raw: &str, #[case] expected: &str) {
        let symbol = TickerSymbol::normalise(raw).expect("valid ticker");
        assert_eq!(symbol.as_ref(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank(" \n ")]
    fn normalise_rejects_blank_input(#[case] raw: &str) {
        assert_eq!(TickerSymbol::normalise(raw), Err(ValidationError::EmptyTicker));
    }

    #[rstest]
    fn deserialising_normalises_symbol() {
        let symbol: TickerSymbol = serde_json::from_str("\" goog \"").expect("deserialise");
        assert_eq!(symbol.as_ref(), "GOOG");
    }

    #[rstest]
    fn add_subscriber_is_set_insert() {
        let alice = Username::new("alice").expect("username");
        let mut ticker = Ticker::first_subscription(
            TickerSymbol::normalise("aapl").expect("ticker"),
            alice.clone(),
        );

        assert!(!ticker.add_subscriber(alice));
        assert!(ticker.add_subscriber(Username::new("bob").expect("username")));
        assert_eq!(ticker.subscribers().len(), 2);
    }
}
