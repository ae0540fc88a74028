use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_positions))
        .route("/apply", post(apply))
        .route("/redeem", post(redeem))
}

pub async fn list_positions(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.with_ledger(|ledger| Ok(ledger.investment_positions())) {
        Ok(positions) => (StatusCode::OK, Json(dto::positions_to_json(positions))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn apply(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ApplyInvestmentRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let now = services.now();
    let result = dto::resolve_account(body.account).and_then(|account| {
        services.with_ledger(|ledger| ledger.apply_investment(body.amount, body.kind, account.as_str(), now))
    });

    match result {
        Ok(receipt) => (StatusCode::OK, Json(dto::investment_receipt_to_json(&receipt))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn redeem(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<dto::RedeemInvestmentRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let now = services.now();
    let result = dto::resolve_account(body.account)
        .and_then(|account| services.with_ledger(|ledger| ledger.redeem_investment(body.kind, account.as_str(), now)));

    match result {
        Ok(redemption) => {
            tracing::info!(
                request_id = %ctx.request_id(),
                kind = body.kind.as_str(),
                total = %redemption.total,
                days = redemption.days,
                "investment redeemed"
            );
            (StatusCode::OK, Json(dto::redemption_to_json(&redemption))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
