//! Builders and fakes shared across test modules.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{body::Body, http::Response};
use scraper::Html;
use time::Date;
use tokio::sync::Notify;

use crate::{
    Error,
    account::Account,
    api::{BackendApi, CreateAccountRequest, CreateTransactionRequest, SyncStats},
    transaction::Transaction,
};

/// An account with sensible defaults: a checking account at Chase holding
/// $100 with $100 available.
pub fn account(id: &str, name: &str) -> Account {
    Account {
        id: id.to_owned(),
        name: name.to_owned(),
        institution: "Chase".to_owned(),
        account_type: "checking".to_owned(),
        balance: 100.0,
        available_balance: Some(100.0),
        is_credit_card: Some(false),
    }
}

/// A credit-card account carrying `balance` as debt.
pub fn credit_card(id: &str, name: &str, balance: f64) -> Account {
    Account {
        id: id.to_owned(),
        name: name.to_owned(),
        institution: "Chase".to_owned(),
        account_type: "credit".to_owned(),
        balance,
        available_balance: Some(0.0),
        is_credit_card: Some(true),
    }
}

/// A settled, uncategorized transaction.
pub fn transaction(id: &str, account_id: &str, amount: f64, transaction_date: Date) -> Transaction {
    Transaction {
        id: id.to_owned(),
        account_id: account_id.to_owned(),
        amount,
        description: "Card purchase".to_owned(),
        transaction_date,
        posted_date: None,
        payee: None,
        memo: None,
        pending: None,
        category: None,
    }
}

/// Stats for a sync that touched a handful of records.
pub fn sync_stats() -> SyncStats {
    SyncStats {
        accounts_updated: 2,
        accounts_created: 0,
        transactions_created: 7,
        balance_records_created: 2,
        sync_duration_ms: 1250,
    }
}

/// Collect a response body into parsed HTML.
pub async fn parse_html(response: Response<Body>) -> Html {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let text = String::from_utf8_lossy(&body).to_string();

    Html::parse_document(&text)
}

#[derive(Default)]
struct FakeState {
    list_responses: Mutex<VecDeque<Result<Vec<Account>, Error>>>,
    default_accounts: Mutex<Vec<Account>>,
    transactions: Mutex<HashMap<String, Result<Vec<Transaction>, Error>>>,
    sync_responses: Mutex<VecDeque<Result<SyncStats, Error>>>,
    list_calls: AtomicUsize,
    sync_calls: AtomicUsize,
    hold_next_list: Mutex<Option<Hold>>,
    hold_next_sync: Mutex<Option<Hold>>,
    create_failure: Mutex<Option<Error>>,
}

struct Hold {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Hold {
    async fn wait(self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// An in-memory [BackendApi] with scripted responses.
///
/// Clones share state, so tests can keep a handle for assertions while the
/// provider owns another.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<FakeState>,
}

impl FakeBackend {
    /// A backend whose account list always answers with `accounts`.
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let backend = Self::default();
        *backend.state.default_accounts.lock().unwrap() = accounts;
        backend
    }

    /// Queue a one-shot response for the next account-list call.
    pub fn push_list_response(&self, response: Result<Vec<Account>, Error>) {
        self.state
            .list_responses
            .lock()
            .unwrap()
            .push_back(response);
    }

    /// Set the response for transaction fetches of `account_id`.
    pub fn set_transactions(&self, account_id: &str, response: Result<Vec<Transaction>, Error>) {
        self.state
            .transactions
            .lock()
            .unwrap()
            .insert(account_id.to_owned(), response);
    }

    /// Queue a one-shot response for the next sync call.
    pub fn push_sync_response(&self, response: Result<SyncStats, Error>) {
        self.state
            .sync_responses
            .lock()
            .unwrap()
            .push_back(response);
    }

    /// Make the next account-list call block until released.
    ///
    /// Returns `(entered, release)`: the call signals `entered` once it has
    /// started and then waits for `release`.
    pub fn hold_next_list(&self) -> (Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        *self.state.hold_next_list.lock().unwrap() = Some(Hold {
            entered: entered.clone(),
            release: release.clone(),
        });
        (entered, release)
    }

    /// Make the next sync call block until released.
    pub fn hold_next_sync(&self) -> (Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        *self.state.hold_next_sync.lock().unwrap() = Some(Hold {
            entered: entered.clone(),
            release: release.clone(),
        });
        (entered, release)
    }

    /// Make the next create call fail with `error`.
    pub fn fail_next_create(&self, error: Error) {
        *self.state.create_failure.lock().unwrap() = Some(error);
    }

    /// How many times the account list was fetched.
    pub fn list_calls(&self) -> usize {
        self.state.list_calls.load(Ordering::SeqCst)
    }

    /// How many times a sync was triggered.
    pub fn sync_calls(&self) -> usize {
        self.state.sync_calls.load(Ordering::SeqCst)
    }
}

impl BackendApi for FakeBackend {
    async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.state.list_calls.fetch_add(1, Ordering::SeqCst);

        // Pick the response up front so it is tied to call order even when
        // the call is held.
        let response = match self.state.list_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(self.state.default_accounts.lock().unwrap().clone()),
        };

        let hold = self.state.hold_next_list.lock().unwrap().take();
        if let Some(hold) = hold {
            hold.wait().await;
        }

        response
    }

    async fn account_transactions(&self, account_id: &str) -> Result<Vec<Transaction>, Error> {
        self.state
            .transactions
            .lock()
            .unwrap()
            .get(account_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn trigger_sync(&self) -> Result<SyncStats, Error> {
        self.state.sync_calls.fetch_add(1, Ordering::SeqCst);

        let response = match self.state.sync_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(sync_stats()),
        };

        let hold = self.state.hold_next_sync.lock().unwrap().take();
        if let Some(hold) = hold {
            hold.wait().await;
        }

        response
    }

    async fn create_account(&self, request: &CreateAccountRequest) -> Result<Account, Error> {
        if let Some(error) = self.state.create_failure.lock().unwrap().take() {
            return Err(error);
        }

        Ok(Account {
            id: "act-created".to_owned(),
            name: request.name.clone(),
            institution: request.institution.clone(),
            account_type: request.account_type.clone(),
            balance: request.balance,
            available_balance: None,
            is_credit_card: None,
        })
    }

    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<Transaction, Error> {
        if let Some(error) = self.state.create_failure.lock().unwrap().take() {
            return Err(error);
        }

        Ok(Transaction {
            id: "txn-created".to_owned(),
            account_id: request.account_id.clone(),
            amount: request.amount,
            description: request.description.clone(),
            transaction_date: request.transaction_date,
            posted_date: None,
            payee: None,
            memo: None,
            pending: None,
            category: request.category.clone(),
        })
    }
}
