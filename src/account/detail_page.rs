//! The account detail page: header, balance and transaction history.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    account::{Account, AccountKind},
    api::BackendApi,
    endpoints,
    html::{base, format_currency, link, render},
    navigation::NavBar,
    provider::LoadPhase,
    transaction::{Transaction, transaction_table},
};

/// Display a single account and its transactions.
///
/// The account is looked up by ID in the provider's state; an unknown ID
/// (or an unknown kind segment) is a 404. While the provider is still
/// loading, a placeholder is shown instead.
pub async fn get_account_page<A: BackendApi>(
    State(state): State<AppState<A>>,
    Path((kind, account_id)): Path<(String, String)>,
) -> Result<Response, Error> {
    if kind.parse::<AccountKind>().is_err() {
        return Err(Error::NotFound);
    }

    let snapshot = state.provider.snapshot().await;

    if snapshot.phase == LoadPhase::Loading {
        return Ok(render(StatusCode::OK, loading_view()));
    }

    let account = snapshot.account(&account_id).ok_or(Error::NotFound)?;
    let transactions = snapshot.account_transactions(&account_id);

    Ok(render(StatusCode::OK, account_view(account, &transactions)))
}

fn loading_view() -> Markup {
    let nav_bar = NavBar::new("").into_html();

    let content = html!(
        (nav_bar)

        div class="flex items-center justify-center h-64 text-gray-600 dark:text-gray-400"
        {
            "Loading account…"
        }
    );

    base("Account", &[], &content)
}

fn account_view(account: &Account, transactions: &[&Transaction]) -> Markup {
    let nav_bar = NavBar::new("").into_html();
    let icon_style = match account.kind() {
        AccountKind::Credit => "p-3 rounded-full mr-4 bg-blue-50 text-blue-500",
        AccountKind::Bank => "p-3 rounded-full mr-4 bg-green-50 text-green-500",
    };

    let content = html!(
        (nav_bar)

        div class="container mx-auto px-4 py-8 max-w-screen-xl text-gray-900 dark:text-white"
        {
            (link(endpoints::DASHBOARD_VIEW, "Back to Dashboard"))

            div class="flex items-center my-6"
            {
                div class=(icon_style)
                {
                    span class="text-2xl" { "$" }
                }

                div
                {
                    h1 class="text-2xl font-bold" { (account.name) }
                    p class="text-gray-600 dark:text-gray-400" { (account.institution_name()) }
                }

                div class="ml-auto text-right"
                {
                    p class="text-sm text-gray-500" { "Current Balance" }
                    p class="text-2xl font-bold"
                    {
                        (format_currency(account.display_balance()))
                    }
                }
            }

            div class="bg-white dark:bg-gray-800 rounded-lg shadow-sm p-4 mb-8"
            {
                h2 class="text-lg font-medium mb-4" { "Recent Transactions" }

                @if transactions.is_empty() {
                    p class="text-gray-500" { "No transactions found for this account." }
                } @else {
                    (transaction_table(transactions))
                }
            }
        }
    );

    base(&account.name, &[], &content)
}
