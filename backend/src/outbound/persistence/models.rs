//! Internal Diesel row structs. Never exposed to the domain.

use diesel::prelude::*;

use super::schema::{tickers, users};

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubscriberRow {
    pub user_id: String,
    pub password: String,
    pub number: String,
    pub carrier: String,
    pub stock_list: Vec<String>,
}

/// Insertable user record. `stock_list` takes the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewSubscriberRow<'a> {
    pub user_id: &'a str,
    pub password: &'a str,
    pub number: &'a str,
    pub carrier: &'a str,
}

/// Row read from the tickers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tickers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TickerRow {
    pub ticker: String,
    pub user_list: Vec<String>,
}
