use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use tsbank_core::display_amount;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn withdraw(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::DispenserWithdrawRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let result = dto::resolve_account(body.account).and_then(|account| {
        services.with_ledger(|ledger| ledger.withdraw_at_dispenser(body.amount, body.dispenser_kind, account.as_str()))
    });

    match result {
        Ok(new_balance) => (
            StatusCode::OK,
            Json(json!({
                "message": format!(
                    "Withdrew {} in {} notes",
                    display_amount(body.amount),
                    body.dispenser_kind.denomination()
                ),
                "new_balance": new_balance,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
