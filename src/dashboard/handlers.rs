//! Dashboard HTTP handlers and view rendering.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    account::account_card,
    alert::Alert,
    api::{BackendApi, SyncStats},
    dashboard::{
        chart::spending_chart_view,
        spending::{month_name, monthly_spending},
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, HeadElement, base, loading_spinner, render},
    navigation::NavBar,
    provider::{LoadPhase, Snapshot},
    timezone::get_local_offset,
};

const SECTION_HEADING_STYLE: &str = "text-xl font-semibold mb-4";
const CARD_GRID_STYLE: &str = "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4";
const EMPTY_SECTION_STYLE: &str = "text-gray-500";

/// Display the dashboard: account cards grouped by kind, the monthly
/// spending chart and the sync button.
pub async fn get_dashboard_page<A: BackendApi>(
    State(state): State<AppState<A>>,
) -> Result<Response, Error> {
    let snapshot = state.provider.snapshot().await;
    let today = local_today(&state.local_timezone)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let content = html!(
        (nav_bar)

        (dashboard_content_view(&snapshot, today))
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    Ok(render(StatusCode::OK, base("Dashboard", &scripts, &content)))
}

/// Trigger a sync and answer with the refreshed dashboard content for htmx
/// to swap in.
///
/// On success a confirmation alert rides along as an out-of-band swap.
pub async fn post_sync<A: BackendApi>(State(state): State<AppState<A>>) -> Response {
    state.provider.sync().await;

    let snapshot = state.provider.snapshot().await;
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let content = dashboard_content_view(&snapshot, today);

    match (&snapshot.phase, &snapshot.sync_stats) {
        (LoadPhase::Ready, Some(stats)) => html!(
            (content)

            (Alert::success("Sync complete", &sync_stats_summary(stats)).into_html())
        )
        .into_response(),
        _ => content.into_response(),
    }
}

fn local_today(local_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {local_timezone}");
        Error::InvalidTimezoneError(local_timezone.to_owned())
    })?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

/// The swappable part of the dashboard, keyed by the provider's phase.
fn dashboard_content_view(snapshot: &Snapshot, today: Date) -> Markup {
    html!(
        div
            id="dashboard-content"
            class="container mx-auto px-4 py-8 max-w-screen-xl
                text-gray-900 dark:text-white"
        {
            (header_view(snapshot))

            @match &snapshot.phase {
                LoadPhase::Loading => {
                    div class="flex items-center justify-center h-64 text-gray-600 dark:text-gray-400"
                    {
                        "Loading accounts…"
                    }
                }
                LoadPhase::Failed(message) => {
                    div class="flex items-center justify-center h-64 text-red-600"
                    {
                        (message)
                    }
                }
                LoadPhase::Ready => {
                    (accounts_and_spending_view(snapshot, today))
                }
            }
        }
    )
}

fn header_view(snapshot: &Snapshot) -> Markup {
    html!(
        header class="mb-8"
        {
            div class="flex justify-between items-center"
            {
                div
                {
                    h1 class="text-3xl font-bold" { "Financial Dashboard" }
                    p class="text-gray-600 dark:text-gray-400" { "View your accounts and spending" }
                }

                button
                    id="sync-indicator"
                    hx-post=(endpoints::SYNC)
                    hx-target="#dashboard-content"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    disabled[snapshot.syncing]
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    (loading_spinner())
                    "Sync Data"
                }
            }

            @if let Some(stats) = &snapshot.sync_stats {
                p class="text-sm text-gray-600 dark:text-gray-400 mt-2"
                {
                    (sync_stats_summary(stats))
                }
            }

            @if snapshot.skipped_accounts > 0 {
                p class="text-sm text-amber-600 dark:text-amber-400 mt-2"
                {
                    (skipped_accounts_notice(snapshot.skipped_accounts))
                }
            }
        }
    )
}

fn sync_stats_summary(stats: &SyncStats) -> String {
    format!(
        "Last sync: {} accounts updated, {} created, {} new transactions in {}ms.",
        stats.accounts_updated,
        stats.accounts_created,
        stats.transactions_created,
        stats.sync_duration_ms,
    )
}

fn skipped_accounts_notice(skipped_accounts: usize) -> String {
    if skipped_accounts == 1 {
        "Transactions for 1 account could not be loaded.".to_owned()
    } else {
        format!("Transactions for {skipped_accounts} accounts could not be loaded.")
    }
}

fn accounts_and_spending_view(snapshot: &Snapshot, today: Date) -> Markup {
    let (credit_cards, bank_accounts): (Vec<_>, Vec<_>) = snapshot
        .accounts
        .iter()
        .partition(|account| account.is_credit_card());

    let spending = monthly_spending(&snapshot.accounts, &snapshot.transactions, today);

    html!(
        section class="mb-8"
        {
            h2 class=(SECTION_HEADING_STYLE) { "Credit Cards" }

            @if credit_cards.is_empty() {
                p class=(EMPTY_SECTION_STYLE) { "No credit card accounts found." }
            } @else {
                div class=(CARD_GRID_STYLE)
                {
                    @for card in &credit_cards {
                        (account_card(card))
                    }
                }
            }
        }

        section class="mb-8"
        {
            h2 class=(SECTION_HEADING_STYLE) { "Bank Accounts" }

            @if bank_accounts.is_empty() {
                p class=(EMPTY_SECTION_STYLE) { "No bank accounts found." }
            } @else {
                div class=(CARD_GRID_STYLE)
                {
                    @for account in &bank_accounts {
                        (account_card(account))
                    }
                }
            }
        }

        section class="mb-8"
        {
            h2 class=(SECTION_HEADING_STYLE) { "Monthly Spending" }

            div class="bg-white dark:bg-gray-800 p-4 rounded-lg shadow-sm"
            {
                (spending_chart_view(&spending, month_name(today.month())))
            }
        }
    )
}
