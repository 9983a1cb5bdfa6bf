//! The account card shown on the dashboard.

use maud::{Markup, html};

use crate::{
    account::{Account, AccountKind},
    endpoints::{self, format_endpoint},
    html::format_currency,
};

/// Render an account as a card that links to its detail page.
///
/// Credit cards get a card icon and a "Balance" caption under the amount;
/// everything else gets a wallet icon.
pub fn account_card(account: &Account) -> Markup {
    let kind = account.kind();
    let detail_url = format_endpoint(endpoints::ACCOUNT_VIEW, &[kind.as_str(), &account.id]);
    let icon_style = match kind {
        AccountKind::Credit => "p-2 rounded-full mr-4 bg-blue-50 text-blue-500",
        AccountKind::Bank => "p-2 rounded-full mr-4 bg-green-50 text-green-500",
    };

    html!(
        a href=(detail_url)
        {
            div
                class="bg-white dark:bg-gray-800 rounded-lg shadow-sm p-4 border
                    border-gray-100 dark:border-gray-700 cursor-pointer
                    hover:shadow-md transition-shadow"
            {
                div class="flex items-start"
                {
                    div class=(icon_style)
                    {
                        (kind_icon(kind))
                    }

                    div class="flex-1"
                    {
                        h3 class="font-medium text-gray-800 dark:text-white" { (account.name) }

                        p class="text-sm text-gray-500" { (account.institution_name()) }

                        p class="text-xl font-semibold mt-2 dark:text-white"
                        {
                            (format_currency(account.display_balance()))
                        }

                        @if kind == AccountKind::Credit {
                            p class="text-xs text-gray-500 mt-1" { "Balance" }
                        }
                    }
                }
            }
        }
    )
}

fn kind_icon(kind: AccountKind) -> Markup {
    match kind {
        AccountKind::Credit => credit_card_icon(),
        AccountKind::Bank => wallet_icon(),
    }
}

// Icons adapted from https://lucide.dev (ISC license)
fn credit_card_icon() -> Markup {
    html!(
        svg
            xmlns="http://www.w3.org/2000/svg"
            width="24" height="24" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2"
            stroke-linecap="round" stroke-linejoin="round"
            aria-hidden="true"
        {
            rect width="20" height="14" x="2" y="5" rx="2" {}
            line x1="2" x2="22" y1="10" y2="10" {}
        }
    )
}

fn wallet_icon() -> Markup {
    html!(
        svg
            xmlns="http://www.w3.org/2000/svg"
            width="24" height="24" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2"
            stroke-linecap="round" stroke-linejoin="round"
            aria-hidden="true"
        {
            path d="M19 7V4a1 1 0 0 0-1-1H5a2 2 0 0 0 0 4h15a1 1 0 0 1 1 1v4h-3a2 2 0 0 0 0 4h3a1 1 0 0 0 1-1v-2a1 1 0 0 0-1-1" {}
            path d="M3 5v14a2 2 0 0 0 2 2h15a1 1 0 0 0 1-1v-4" {}
        }
    )
}
