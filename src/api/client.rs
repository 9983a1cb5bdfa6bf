//! The HTTP client for the backend REST API, and the trait that lets the
//! rest of the application swap it out.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{
    Error,
    account::Account,
    api::models::{ApiResponse, CreateAccountRequest, CreateTransactionRequest, SyncStats},
    transaction::Transaction,
};

/// The operations the dashboard needs from its data source.
///
/// [HttpBackendApi] is the implementation used in production; tests exercise
/// the provider and page handlers against an in-memory fake, and
/// [SimplefinBackend](crate::SimplefinBackend) implements the read side on
/// top of a direct SimpleFin fetch.
pub trait BackendApi: Send + Sync + 'static {
    /// List all accounts.
    fn list_accounts(&self) -> impl Future<Output = Result<Vec<Account>, Error>> + Send;

    /// List the transactions belonging to `account_id`.
    fn account_transactions(
        &self,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<Transaction>, Error>> + Send;

    /// Ask the backend to re-pull account data from the aggregation service.
    fn trigger_sync(&self) -> impl Future<Output = Result<SyncStats, Error>> + Send;

    /// Create an account and return it as stored by the backend.
    fn create_account(
        &self,
        request: &CreateAccountRequest,
    ) -> impl Future<Output = Result<Account, Error>> + Send;

    /// Create a transaction and return it as stored by the backend.
    fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> impl Future<Output = Result<Transaction, Error>> + Send;
}

/// A [BackendApi] that talks to the bookkeeping backend over HTTP.
///
/// No explicit request timeout is set; the transport default applies.
#[derive(Debug, Clone)]
pub struct HttpBackendApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackendApi {
    /// Create a client for the backend at `base_url`, e.g.
    /// `http://localhost:3001`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(classify_transport_error)?;

        unwrap_envelope(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        unwrap_envelope(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(classify_transport_error)?;

        unwrap_envelope(response).await
    }
}

impl BackendApi for HttpBackendApi {
    async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.get("/api/accounts").await
    }

    async fn account_transactions(&self, account_id: &str) -> Result<Vec<Transaction>, Error> {
        self.get(&format!("/api/accounts/{account_id}/transactions"))
            .await
    }

    async fn trigger_sync(&self) -> Result<SyncStats, Error> {
        self.post_empty("/api/sync").await
    }

    async fn create_account(&self, request: &CreateAccountRequest) -> Result<Account, Error> {
        self.post("/api/accounts", request).await
    }

    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<Transaction, Error> {
        self.post("/api/transactions", request).await
    }
}

/// Map an HTTP error status onto the error kinds surfaced to the UI.
fn classify_status(status: StatusCode) -> Error {
    match status {
        StatusCode::SERVICE_UNAVAILABLE => Error::ServiceUnavailable,
        StatusCode::INTERNAL_SERVER_ERROR => Error::Internal,
        StatusCode::NOT_FOUND => Error::NotFound,
        StatusCode::BAD_REQUEST => {
            Error::InvalidRequest("The request was rejected as invalid.".to_owned())
        }
        status => Error::Unexpected(format!("the server answered with status {status}")),
    }
}

/// Map a transport-level failure (no response at all) onto [Error].
fn classify_transport_error(error: reqwest::Error) -> Error {
    if error.is_connect() || error.is_timeout() || error.is_request() {
        Error::Network
    } else {
        Error::Unexpected(error.to_string())
    }
}

/// Check the response status and pull the payload out of the `{ data: ... }`
/// envelope.
async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let status = response.status();
    if !status.is_success() {
        return Err(classify_status(status));
    }

    let envelope: ApiResponse<T> = response
        .json()
        .await
        .map_err(|error| Error::Unexpected(format!("could not parse the response body: {error}")))?;

    match envelope.data {
        Some(data) if envelope.success => Ok(data),
        _ => Err(Error::Unexpected(
            envelope
                .error
                .unwrap_or_else(|| "the server answered without data".to_owned()),
        )),
    }
}

#[cfg(test)]
mod classify_status_tests {
    use reqwest::StatusCode;

    use crate::Error;

    use super::classify_status;

    #[test]
    fn service_unavailable_maps_to_its_own_kind() {
        assert_eq!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE),
            Error::ServiceUnavailable
        );
    }

    #[test]
    fn internal_server_error_maps_to_internal() {
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Error::Internal
        );
    }

    #[test]
    fn not_found_maps_to_not_found() {
        assert_eq!(classify_status(StatusCode::NOT_FOUND), Error::NotFound);
    }

    #[test]
    fn bad_request_maps_to_invalid_request() {
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST),
            Error::InvalidRequest(_)
        ));
    }

    #[test]
    fn anything_else_is_unexpected() {
        assert!(matches!(
            classify_status(StatusCode::IM_A_TEAPOT),
            Error::Unexpected(_)
        ));
    }
}
