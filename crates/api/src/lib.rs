//! HTTP API: configuration, routing, and request/response mapping over the
//! ledger service.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
