//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod customers;
pub mod health;
pub mod quotes;
pub mod rates;
pub mod share;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(customers::routes())
        .merge(transactions::routes())
        .merge(quotes::routes())
        .merge(share::routes())
        .merge(rates::routes())
}
