//! Finboard is a web dashboard for your bank and credit-card accounts.
//!
//! It renders account balances, transaction histories and a monthly spending
//! chart as HTML pages, reading its data from a bookkeeping REST API (or,
//! alternatively, straight from a SimpleFin aggregation endpoint) and
//! triggering the backend's aggregation sync on demand.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod account;
mod alert;
mod api;
mod app_state;
mod config;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod provider;
mod routing;
mod simplefin;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use account::{Account, AccountKind};
pub use api::{
    BackendApi, CreateAccountRequest, CreateTransactionRequest, HttpBackendApi, SyncStats,
};
pub use app_state::AppState;
pub use config::{ACCESS_URL_VAR, API_URL_VAR, Config, DataSource, SourceKind};
pub use logging::logging_middleware;
pub use provider::{DataProvider, LoadPhase, Snapshot, spawn_background_refresh};
pub use routing::build_router;
pub use simplefin::SimplefinBackend;
pub use transaction::Transaction;

use crate::{
    alert::Alert, html::render, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backend's aggregation service answered 503.
    ///
    /// The service is expected to come back on its own; the user should
    /// simply retry later.
    #[error("SimpleFin sync service is currently unavailable")]
    ServiceUnavailable,

    /// The backend answered 500.
    #[error("An internal server error occurred. Please try again later.")]
    Internal,

    /// The requested resource was not found (404).
    ///
    /// For transaction lookups this means the account ID did not match any
    /// account known to the backend.
    #[error("The requested resource was not found")]
    NotFound,

    /// The request never reached the backend (connection refused, DNS
    /// failure, timeout).
    #[error("Unable to connect to the server. Please check your connection.")]
    Network,

    /// The backend rejected a create request as malformed (400).
    ///
    /// Only the create-account and create-transaction flows can produce this.
    #[error("{0}")]
    InvalidRequest(String),

    /// Any failure the client could not classify.
    #[error("{0}")]
    Unexpected(String),

    /// The SimpleFin data source was selected but no access URL was
    /// configured.
    #[error("The environment variable 'SIMPLEFIN_ACCESS_URL' must be set")]
    MissingAccessUrl,

    /// The configured SimpleFin access URL could not be parsed or carries no
    /// embedded credentials.
    #[error("invalid SimpleFin access URL: {0}")]
    InvalidAccessUrl(String),

    /// The operation is not available on the configured data source, e.g.
    /// creating accounts while reading straight from SimpleFin.
    #[error("the configured data source does not support {0}")]
    UnsupportedOperation(&'static str),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::ServiceUnavailable => render(
                StatusCode::SERVICE_UNAVAILABLE,
                Alert::error(
                    "Sync unavailable",
                    "SimpleFin sync is currently unavailable. Please try again later.",
                )
                .into_html(),
            ),
            Error::Network => render(
                StatusCode::BAD_GATEWAY,
                Alert::error(
                    "Connection failed",
                    "Unable to connect to the server. Please check your connection and try again.",
                )
                .into_html(),
            ),
            Error::InvalidRequest(details) => render(
                StatusCode::BAD_REQUEST,
                Alert::error("Invalid request", &details).into_html(),
            ),
            Error::NotFound => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Not found",
                    "The requested resource could not be found. \
                    Try syncing again to refresh the account list.",
                )
                .into_html(),
            ),
            Error::UnsupportedOperation(operation) => render(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Not supported",
                    &format!(
                        "The configured data source does not support {operation}. \
                        Restart the server with the backend API data source to use it."
                    ),
                )
                .into_html(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    )
                    .into_html(),
                )
            }
        }
    }
}
