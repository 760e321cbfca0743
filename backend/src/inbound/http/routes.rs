//! Route table for the versioned API scope.

use actix_web::web;

use super::{tickers, users};

/// Mount every subscription and ticker handler on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use ticker_watch::inbound::http::routes::configure;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register_subscriber)
        .service(users::username_availability)
        .service(users::subscriber_contact)
        .service(users::list_subscriptions)
        .service(users::subscribe)
        .service(tickers::list_subscribers)
        .service(tickers::broadcast_alert);
}
