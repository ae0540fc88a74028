use axum::{
    Router,
    routing::{get, post},
};

pub mod accounts;
pub mod dispenser;
pub mod investments;
pub mod system;
pub mod transfers;

/// Router for every ledger endpoint; expects `Arc<AppServices>` as an extension.
pub fn router() -> Router {
    Router::new()
        .route("/balance", get(accounts::balance))
        .route("/deposit", post(accounts::deposit))
        .route("/withdraw", post(accounts::withdraw))
        .route("/statement", get(accounts::statement))
        .route("/statement/clear", post(accounts::clear_statement))
        .route("/transfer", post(transfers::transfer))
        .nest("/investments", investments::router())
        .route("/dispenser/withdraw", post(dispenser::withdraw))
}
