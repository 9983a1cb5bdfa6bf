//! The typed client for the bookkeeping backend's REST API.

mod client;
mod models;

pub use client::{BackendApi, HttpBackendApi};
pub use models::{ApiResponse, CreateAccountRequest, CreateTransactionRequest, SyncStats};
