//! The transaction table shown on the account detail page.

use maud::{Markup, html};
use time::{Date, Month};

use crate::{
    html::{
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, amount_color_class,
        format_signed_currency,
    },
    transaction::Transaction,
};

/// Shown in the category column when the source assigned no category.
const NO_CATEGORY_LABEL: &str = "Category not available";

/// Render transactions as a table, in the order they are given.
///
/// The provider delivers transactions in backend order and the table does
/// not re-sort them.
pub fn transaction_table(transactions: &[&Transaction]) -> Markup {
    html!(
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (table_row(transaction))
                    }
                }
            }
        }
    )
}

fn table_row(transaction: &Transaction) -> Markup {
    let amount_style = format!(
        "{} {} text-right font-medium",
        TABLE_CELL_STYLE,
        amount_color_class(transaction.amount)
    );

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                (format_short_date(transaction.display_date()))
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="font-medium text-gray-900 dark:text-white"
                {
                    (transaction.display_description())

                    @if transaction.is_pending() {
                        span class="text-gray-500 ml-1" { "(Pending)" }
                    }
                }

                @if let Some(memo) = &transaction.memo {
                    div class="text-xs text-gray-500 mt-1" { (memo) }
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                @match &transaction.category {
                    Some(category) => { (category) }
                    None => { (NO_CATEGORY_LABEL) }
                }
            }

            td class=(amount_style)
            {
                (format_signed_currency(transaction.amount))
            }
        }
    )
}

/// Format a date as short month and day, e.g. "Aug 6".
fn format_short_date(date: Date) -> String {
    let month = match date.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{month} {}", date.day())
}
