//! HTTP inbound adapter exposing the subscription REST endpoints.

pub mod error;
pub mod health;
pub mod routes;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod tickers;
pub mod users;

pub use error::{ApiResult, json_config};
