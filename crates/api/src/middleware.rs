use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::context::RequestContext;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Attach a `RequestContext`, echo its id in `x-request-id`, and log one line
/// per completed request.
pub async fn request_context(mut req: Request, next: Next) -> Response {
    let ctx = RequestContext::new();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    req.extensions_mut().insert(ctx);

    let started = Instant::now();
    let mut res = next.run(req).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id().to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    tracing::info!(
        request_id = %ctx.request_id(),
        %method,
        path = %path,
        status = res.status().as_u16(),
        elapsed_ms,
        "request completed"
    );
    res
}
