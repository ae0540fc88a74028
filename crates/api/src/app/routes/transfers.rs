use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequestContext;

/// Policy-checked transfer, evaluated at the server clock's local time.
pub async fn transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<dto::TransferRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let source = match dto::resolve_account(body.source_account) {
        Ok(a) => a,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let now = services.now();
    let result = services.with_ledger(|ledger| {
        ledger.transfer_with_policy(body.kind, body.amount, source.as_str(), &body.dest_account, now)
    });

    match result {
        Ok(receipt) => {
            tracing::info!(
                request_id = %ctx.request_id(),
                kind = body.kind.as_str(),
                from = %receipt.from,
                to = %receipt.to,
                amount = %receipt.amount,
                "transfer accepted"
            );
            (StatusCode::OK, Json(dto::transfer_to_json(body.kind, &receipt))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
