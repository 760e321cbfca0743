//! PostgreSQL-backed `SubscriberRepository`.
//!
//! Ticker follows are applied with a single conditional `UPDATE` so the
//! array append and the membership check happen in one statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{SubscriberRepository, SubscriberRepositoryError};
use crate::domain::{
    Carrier, Contact, PhoneNumber, Secret, Subscriber, TickerSymbol, Username, ValidationError,
};

use super::diesel_error_mapping::{FailureKind, classify, map_pool_error};
use super::models::{NewSubscriberRow, SubscriberRow};
use super::pool::DbPool;
use super::schema::users;

const APPEND_TICKER_SQL: &str = "UPDATE users \
     SET stock_list = array_append(stock_list, $1) \
     WHERE user_id = $2 AND NOT ($1 = ANY(stock_list))";

/// Diesel implementation of [`SubscriberRepository`].
#[derive(Clone)]
pub struct DieselSubscriberRepository {
    pool: DbPool,
}

impl DieselSubscriberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SubscriberRepositoryError {
    match classify(&error) {
        (FailureKind::Connection, message) => SubscriberRepositoryError::connection(message),
        (FailureKind::UniqueViolation | FailureKind::Query, message) => {
            SubscriberRepositoryError::query(message)
        }
    }
}

fn map_insert_error(error: diesel::result::Error, user_id: &Username) -> SubscriberRepositoryError {
    match classify(&error) {
        (FailureKind::UniqueViolation, _) => {
            SubscriberRepositoryError::duplicate_username(user_id.as_str())
        }
        _ => map_diesel_error(error),
    }
}

fn row_to_subscriber(row: SubscriberRow) -> Result<Subscriber, SubscriberRepositoryError> {
    let corrupt = |err: ValidationError| {
        warn!(user_id = %row.user_id, reason = err.reason(), "stored subscriber is invalid");
        SubscriberRepositoryError::query("stored subscriber record is invalid")
    };
    let user_id = Username::new(row.user_id.as_str()).map_err(corrupt)?;
    let secret = Secret::new(row.password.as_str()).map_err(corrupt)?;
    let phone = PhoneNumber::normalise(&row.number).map_err(corrupt)?;
    let carrier: Carrier = row.carrier.parse().map_err(corrupt)?;
    let tickers = row
        .stock_list
        .iter()
        .map(|symbol| TickerSymbol::normalise(symbol))
        .collect::<Result<_, _>>()
        .map_err(corrupt)?;
    Ok(Subscriber::from_parts(
        user_id,
        secret,
        Contact { phone, carrier },
        tickers,
    ))
}

#[async_trait]
impl SubscriberRepository for DieselSubscriberRepository {
    async fn insert(&self, subscriber: &Subscriber) -> Result<(), SubscriberRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SubscriberRepositoryError::connection))?;
        let contact = subscriber.contact();
        let row = NewSubscriberRow {
            user_id: subscriber.user_id().as_str(),
            password: subscriber.secret().expose(),
            number: contact.phone.as_ref(),
            carrier: contact.carrier.as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, subscriber.user_id()))
    }

    async fn exists(&self, user_id: &Username) -> Result<bool, SubscriberRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SubscriberRepositoryError::connection))?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::user_id.eq(user_id.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn find(
        &self,
        user_id: &Username,
    ) -> Result<Option<Subscriber>, SubscriberRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SubscriberRepositoryError::connection))?;
        let row: Option<SubscriberRow> = users::table
            .filter(users::user_id.eq(user_id.as_str()))
            .select(SubscriberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_subscriber).transpose()
    }

    async fn add_ticker(
        &self,
        user_id: &Username,
        ticker: &TickerSymbol,
    ) -> Result<bool, SubscriberRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SubscriberRepositoryError::connection))?;
        let changed = diesel::sql_query(APPEND_TICKER_SQL)
            .bind::<Text, _>(ticker.as_str())
            .bind::<Text, _>(user_id.as_str())
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if changed > 0 {
            return Ok(true);
        }

        // Zero rows: either already followed or no such user.
        let present: bool = diesel::select(diesel::dsl::exists(
            users::table.filter(users::user_id.eq(user_id.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if present {
            Ok(false)
        } else {
            Err(SubscriberRepositoryError::missing_subscriber(user_id.as_str()))
        }
    }
}
