//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Registered subscribers and the tickers each one follows.
    users (user_id) {
        user_id -> Text,
        password -> Text,
        /// Ten-digit phone number.
        number -> Varchar,
        carrier -> Text,
        stock_list -> Array<Text>,
    }
}

diesel::table! {
    /// Subscriber usernames recorded per ticker symbol.
    tickers (ticker) {
        ticker -> Text,
        user_list -> Array<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, tickers);
