//! The data provider sitting between the data source and the pages.
//!
//! It owns the only mutable copy of the fetched accounts and transactions,
//! runs the load and sync cycles, and hands immutable snapshots to the route
//! handlers. Loads are numbered so a slow fetch that is overtaken by a newer
//! one cannot overwrite fresher state.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::RwLock, task::JoinHandle};

use crate::{
    Error,
    account::Account,
    api::{BackendApi, SyncStats},
    transaction::Transaction,
};

/// How often the background refresh re-runs the load cycle.
const REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Where the provider is in its load lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    /// The initial load has not finished yet.
    Loading,
    /// Data is loaded and ready to render.
    Ready,
    /// The last load or sync failed; the message is shown to the user.
    Failed(String),
}

/// A point-in-time copy of the provider state, taken once per request.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Where the provider is in its load lifecycle.
    pub phase: LoadPhase,
    /// All fetched accounts, in backend order.
    pub accounts: Vec<Account>,
    /// All fetched transactions across accounts, in backend order.
    pub transactions: Vec<Transaction>,
    /// Whether a sync cycle is currently running.
    pub syncing: bool,
    /// The stats reported by the most recent successful sync.
    pub sync_stats: Option<SyncStats>,
    /// How many accounts had their transaction fetch fail during the last
    /// load.
    pub skipped_accounts: usize,
}

impl Snapshot {
    /// Find an account by its ID.
    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.id == account_id)
    }

    /// The transactions belonging to `account_id`, in backend order.
    pub fn account_transactions(&self, account_id: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| transaction.account_id == account_id)
            .collect()
    }
}

#[derive(Debug)]
struct ProviderState {
    phase: LoadPhase,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    syncing: bool,
    sync_stats: Option<SyncStats>,
    skipped_accounts: usize,
}

struct LoadOutcome {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    skipped_accounts: usize,
}

/// Holds the dashboard data and runs the load/sync cycles against a
/// [BackendApi].
pub struct DataProvider<A> {
    api: A,
    state: RwLock<ProviderState>,
    // Counts started load cycles; a cycle's results are only applied while
    // its number is still the latest.
    generation: AtomicU64,
}

impl<A: BackendApi> DataProvider<A> {
    /// Create a provider in the [Loading](LoadPhase::Loading) phase.
    ///
    /// No data is fetched until [load](DataProvider::load) is called.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(ProviderState {
                phase: LoadPhase::Loading,
                accounts: Vec::new(),
                transactions: Vec::new(),
                syncing: false,
                sync_stats: None,
                skipped_accounts: 0,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// The data source the provider reads from, for operations that bypass
    /// the provider's own state (the create flows).
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Take a copy of the current state for rendering.
    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;

        Snapshot {
            phase: state.phase.clone(),
            accounts: state.accounts.clone(),
            transactions: state.transactions.clone(),
            syncing: state.syncing,
            sync_stats: state.sync_stats.clone(),
            skipped_accounts: state.skipped_accounts,
        }
    }

    /// Run a full load cycle: fetch the account list, then each account's
    /// transactions.
    ///
    /// An account whose transaction fetch fails is logged, counted and
    /// skipped; only a failure of the account-list fetch itself moves the
    /// provider to [Failed](LoadPhase::Failed). Previously loaded data stays
    /// in place on failure.
    pub async fn load(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        match self.fetch_all().await {
            Ok(outcome) => {
                self.apply(generation, |state| {
                    state.accounts = outcome.accounts;
                    state.transactions = outcome.transactions;
                    state.skipped_accounts = outcome.skipped_accounts;
                    state.phase = LoadPhase::Ready;
                })
                .await;
            }
            Err(error) => {
                tracing::error!("failed to load accounts: {error}");
                self.apply(generation, |state| {
                    state.phase = LoadPhase::Failed(error.to_string());
                })
                .await;
            }
        }
    }

    /// Trigger a sync on the backend and, when it succeeds, re-run the load
    /// cycle.
    ///
    /// A sync requested while one is already running returns without
    /// starting a second cycle. On failure the previously loaded data stays
    /// in place and the failure message becomes the page-level error.
    pub async fn sync(&self) {
        {
            let mut state = self.state.write().await;
            if state.syncing {
                tracing::debug!("ignoring sync request while a sync is already running");
                return;
            }
            state.syncing = true;
            state.sync_stats = None;
        }

        match self.api.trigger_sync().await {
            Ok(stats) => {
                tracing::info!(
                    "sync finished in {}ms: {} accounts updated, {} transactions created",
                    stats.sync_duration_ms,
                    stats.accounts_updated,
                    stats.transactions_created,
                );
                self.state.write().await.sync_stats = Some(stats);
                self.load().await;
            }
            Err(error) => {
                tracing::error!("sync failed: {error}");
                self.state.write().await.phase = LoadPhase::Failed(sync_failure_message(&error));
            }
        }

        self.state.write().await.syncing = false;
    }

    async fn fetch_all(&self) -> Result<LoadOutcome, Error> {
        let accounts = self.api.list_accounts().await?;

        let mut transactions = Vec::new();
        let mut skipped_accounts = 0;

        for account in &accounts {
            match self.api.account_transactions(&account.id).await {
                Ok(mut batch) => transactions.append(&mut batch),
                Err(error) => {
                    tracing::warn!(
                        "failed to load transactions for account {}: {error}",
                        account.id
                    );
                    skipped_accounts += 1;
                }
            }
        }

        Ok(LoadOutcome {
            accounts,
            transactions,
            skipped_accounts,
        })
    }

    async fn apply(&self, generation: u64, update: impl FnOnce(&mut ProviderState)) {
        let mut state = self.state.write().await;

        if generation == self.generation.load(Ordering::SeqCst) {
            update(&mut state);
        } else {
            tracing::debug!("discarding results of superseded load cycle {generation}");
        }
    }
}

/// The user-facing message for a failed sync, by error kind.
pub(crate) fn sync_failure_message(error: &Error) -> String {
    match error {
        Error::ServiceUnavailable => {
            "SimpleFin sync is currently unavailable. Please try again later.".to_owned()
        }
        Error::Network => {
            "Unable to connect to the server. Please check your connection and try again."
                .to_owned()
        }
        error => error.to_string(),
    }
}

/// Spawn a task that silently re-runs the provider's load cycle every five
/// minutes.
///
/// The loading phase is not touched, so pages keep rendering the existing
/// data while a refresh is in flight; only the accounts/transactions and the
/// error state change. Abort the returned handle on shutdown.
pub fn spawn_background_refresh<A: BackendApi>(provider: Arc<DataProvider<A>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REFRESH_INTERVAL);
        // The first tick fires immediately and would race the initial load.
        interval.tick().await;

        loop {
            interval.tick().await;
            tracing::debug!("running background refresh");
            provider.load().await;
        }
    })
}

#[cfg(test)]
mod load_tests {
    use time::macros::date;

    use crate::{
        Error,
        provider::{DataProvider, LoadPhase},
        test_utils::{FakeBackend, account, transaction},
    };

    #[tokio::test]
    async fn load_aggregates_transactions_across_accounts() {
        let api = FakeBackend::with_accounts(vec![
            account("act-1", "Everyday Checking"),
            account("act-2", "Rewards Card"),
        ]);
        api.set_transactions(
            "act-1",
            Ok(vec![transaction("txn-1", "act-1", -20.0, date!(2026 - 08 - 03))]),
        );
        api.set_transactions(
            "act-2",
            Ok(vec![transaction("txn-2", "act-2", -5.0, date!(2026 - 08 - 04))]),
        );
        let provider = DataProvider::new(api);

        provider.load().await;

        let snapshot = provider.snapshot().await;
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert_eq!(snapshot.accounts.len(), 2);
        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.skipped_accounts, 0);
    }

    #[tokio::test]
    async fn one_failing_account_does_not_fail_the_load() {
        let api = FakeBackend::with_accounts(vec![
            account("act-1", "Everyday Checking"),
            account("act-2", "Rewards Card"),
            account("act-3", "Holiday Savings"),
        ]);
        api.set_transactions(
            "act-1",
            Ok(vec![transaction("txn-1", "act-1", -20.0, date!(2026 - 08 - 03))]),
        );
        api.set_transactions("act-2", Err(Error::Internal));
        api.set_transactions(
            "act-3",
            Ok(vec![transaction("txn-3", "act-3", 120.0, date!(2026 - 08 - 01))]),
        );
        let provider = DataProvider::new(api);

        provider.load().await;

        let snapshot = provider.snapshot().await;
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert_eq!(snapshot.transactions.len(), 2);
        assert!(
            snapshot
                .transactions
                .iter()
                .all(|transaction| transaction.account_id != "act-2")
        );
        assert_eq!(snapshot.skipped_accounts, 1);
    }

    #[tokio::test]
    async fn failing_account_list_moves_to_failed() {
        let api = FakeBackend::default();
        api.push_list_response(Err(Error::Internal));
        let provider = DataProvider::new(api);

        provider.load().await;

        let snapshot = provider.snapshot().await;
        assert_eq!(
            snapshot.phase,
            LoadPhase::Failed(
                "An internal server error occurred. Please try again later.".to_owned()
            )
        );
    }

    #[tokio::test]
    async fn superseded_load_does_not_overwrite_newer_state() {
        let api = FakeBackend::default();
        api.push_list_response(Ok(vec![account("act-old", "Stale Account")]));
        api.push_list_response(Ok(vec![account("act-new", "Fresh Account")]));
        let (entered, release) = api.hold_next_list();
        let provider = std::sync::Arc::new(DataProvider::new(api));

        // Start a load that blocks inside the account-list fetch.
        let stale_load = tokio::spawn({
            let provider = provider.clone();
            async move { provider.load().await }
        });
        entered.notified().await;

        // A second load completes while the first is still stuck.
        provider.load().await;
        let snapshot = provider.snapshot().await;
        assert_eq!(snapshot.accounts[0].id, "act-new");

        // Let the first load finish; its results must be discarded.
        release.notify_one();
        stale_load.await.unwrap();

        let snapshot = provider.snapshot().await;
        assert_eq!(snapshot.accounts.len(), 1);
        assert_eq!(snapshot.accounts[0].id, "act-new");
    }
}

#[cfg(test)]
mod sync_tests {
    use crate::{
        Error,
        provider::{DataProvider, LoadPhase, sync_failure_message},
        test_utils::{FakeBackend, account, sync_stats},
    };

    #[tokio::test]
    async fn successful_sync_reloads_and_stores_stats() {
        let api = FakeBackend::with_accounts(vec![account("act-1", "Everyday Checking")]);
        api.push_sync_response(Ok(sync_stats()));
        let provider = DataProvider::new(api.clone());

        provider.sync().await;

        let snapshot = provider.snapshot().await;
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert!(!snapshot.syncing);
        assert_eq!(snapshot.sync_stats, Some(sync_stats()));
        assert_eq!(snapshot.accounts.len(), 1);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn unavailable_sync_surfaces_the_service_message() {
        let api = FakeBackend::with_accounts(vec![account("act-1", "Everyday Checking")]);
        let provider = DataProvider::new(api.clone());
        provider.load().await;

        api.push_sync_response(Err(Error::ServiceUnavailable));
        provider.sync().await;

        let snapshot = provider.snapshot().await;
        assert_eq!(
            snapshot.phase,
            LoadPhase::Failed(
                "SimpleFin sync is currently unavailable. Please try again later.".to_owned()
            )
        );
        // The data loaded before the failed sync stays in place.
        assert_eq!(snapshot.accounts.len(), 1);
        assert!(!snapshot.syncing);
    }

    #[tokio::test]
    async fn network_failure_surfaces_the_connection_message() {
        let api = FakeBackend::with_accounts(vec![account("act-1", "Everyday Checking")]);
        api.push_sync_response(Err(Error::Network));
        let provider = DataProvider::new(api);

        provider.sync().await;

        let snapshot = provider.snapshot().await;
        assert_eq!(
            snapshot.phase,
            LoadPhase::Failed(
                "Unable to connect to the server. Please check your connection and try again."
                    .to_owned()
            )
        );
    }

    #[tokio::test]
    async fn sync_while_syncing_is_ignored() {
        let api = FakeBackend::with_accounts(vec![account("act-1", "Everyday Checking")]);
        let (entered, release) = api.hold_next_sync();
        let provider = std::sync::Arc::new(DataProvider::new(api.clone()));

        let blocked_sync = tokio::spawn({
            let provider = provider.clone();
            async move { provider.sync().await }
        });
        entered.notified().await;

        // A second request while the first is in flight must not start
        // another cycle.
        provider.sync().await;
        assert_eq!(api.sync_calls(), 1);

        release.notify_one();
        blocked_sync.await.unwrap();
        assert_eq!(api.sync_calls(), 1);
    }

    #[test]
    fn other_errors_surface_their_own_message() {
        assert_eq!(
            sync_failure_message(&Error::Internal),
            "An internal server error occurred. Please try again later."
        );
    }
}
