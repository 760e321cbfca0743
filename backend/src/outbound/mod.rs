//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local repositories, used when no database is set.
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **sms**: SMS sender that logs instead of sending.

pub mod memory;
pub mod persistence;
pub mod sms;
