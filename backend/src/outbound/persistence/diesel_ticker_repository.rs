//! PostgreSQL-backed `TickerRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TickerRepository, TickerRepositoryError};
use crate::domain::{Ticker, TickerSymbol, Username};

use super::diesel_error_mapping::{FailureKind, classify, map_pool_error};
use super::models::TickerRow;
use super::pool::DbPool;
use super::schema::tickers;

/// Create the ticker with one subscriber, or append when it already exists.
/// The conflict branch's `WHERE` turns a replay into a zero-row no-op.
const UPSERT_SUBSCRIBER_SQL: &str = "INSERT INTO tickers (ticker, user_list) \
     VALUES ($1, ARRAY[$2]) \
     ON CONFLICT (ticker) DO UPDATE \
     SET user_list = array_append(tickers.user_list, $2) \
     WHERE NOT ($2 = ANY(tickers.user_list))";

/// Diesel implementation of [`TickerRepository`].
#[derive(Clone)]
pub struct DieselTickerRepository {
    pool: DbPool,
}

impl DieselTickerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> TickerRepositoryError {
    match classify(&error) {
        (FailureKind::Connection, message) => TickerRepositoryError::connection(message),
        (_, message) => TickerRepositoryError::query(message),
    }
}

fn row_to_ticker(row: TickerRow) -> Result<Ticker, TickerRepositoryError> {
    let corrupt = || {
        warn!(ticker = %row.ticker, "stored ticker record is invalid");
        TickerRepositoryError::query("stored ticker record is invalid")
    };
    let symbol = TickerSymbol::normalise(&row.ticker).map_err(|_| corrupt())?;
    let subscribers = row
        .user_list
        .iter()
        .map(|user_id| Username::new(user_id.as_str()))
        .collect::<Result<_, _>>()
        .map_err(|_| corrupt())?;
    Ok(Ticker::from_parts(symbol, subscribers))
}

#[async_trait]
impl TickerRepository for DieselTickerRepository {
    async fn add_subscriber(
        &self,
        ticker: &TickerSymbol,
        user_id: &Username,
    ) -> Result<bool, TickerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TickerRepositoryError::connection))?;
        let changed = diesel::sql_query(UPSERT_SUBSCRIBER_SQL)
            .bind::<Text, _>(ticker.as_str())
            .bind::<Text, _>(user_id.as_str())
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(changed > 0)
    }

    async fn find(&self, ticker: &TickerSymbol) -> Result<Option<Ticker>, TickerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TickerRepositoryError::connection))?;
        let row: Option<TickerRow> = tickers::table
            .filter(tickers::ticker.eq(ticker.as_str()))
            .select(TickerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_ticker).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn converts_stored_row() {
        let ticker = row_to_ticker(TickerRow {
            ticker: "AAPL".to_owned(),
            user_list: vec!["bob".to_owned(), "alice".to_owned()],
        })
        .expect("valid row");

        assert_eq!(ticker.symbol().as_ref(), "AAPL");
        let names: Vec<&str> = ticker.subscribers().iter().map(AsRef::as_ref).collect();
        assert_eq!(names, ["alice", "bob"]);
    }

    #[rstest]
    fn rejects_blank_usernames() {
        let error = row_to_ticker(TickerRow {
            ticker: "AAPL".to_owned(),
            user_list: vec![String::new()],
        })
        .expect_err("corrupt row");

        assert_eq!(
            error,
            TickerRepositoryError::query("stored ticker record is invalid")
        );
    }
}
