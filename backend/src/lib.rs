//! Ticker subscription registry service.
//!
//! Users register a phone number and carrier, follow stock tickers, and
//! receive SMS alerts through their carrier's email gateway.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface.
pub use doc::ApiDoc;
