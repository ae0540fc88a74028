use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Extension, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn balance(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::AccountQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let result = dto::resolve_account(query.account)
        .and_then(|account| services.with_ledger(|ledger| ledger.balance(account.as_str())));

    match result {
        Ok(balance) => (StatusCode::OK, Json(json!({ "balance": balance }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn deposit(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::AmountRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let result = dto::resolve_account(body.account)
        .and_then(|account| services.with_ledger(|ledger| ledger.deposit(body.amount, account.as_str())));

    match result {
        Ok(new_balance) => (
            StatusCode::OK,
            Json(json!({ "message": "Deposit completed", "new_balance": new_balance })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn withdraw(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::AmountRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let result = dto::resolve_account(body.account)
        .and_then(|account| services.with_ledger(|ledger| ledger.withdraw(body.amount, account.as_str())));

    match result {
        Ok(new_balance) => (
            StatusCode::OK,
            Json(json!({ "message": "Withdrawal completed", "new_balance": new_balance })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn statement(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::AccountQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let result = dto::resolve_account(query.account)
        .and_then(|account| services.with_ledger(|ledger| ledger.statement(account.as_str())));

    match result {
        Ok(entries) => (StatusCode::OK, Json(dto::statement_to_json(entries))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn clear_statement(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::AccountQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let result = dto::resolve_account(query.account)
        .and_then(|account| services.with_ledger(|ledger| ledger.clear_statement(account.as_str())));

    match result {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Statement cleared" }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
