//! The page and endpoint for entering a transaction by hand.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::html;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    api::{BackendApi, CreateTransactionRequest},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        render,
    },
    navigation::NavBar,
    timezone::get_local_offset,
};

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The account the transaction belongs to.
    pub account_id: String,
    /// The signed amount in dollars; spending is negative.
    pub amount: f64,
    /// The description shown in the transaction table.
    pub description: String,
    /// The date the transaction happened.
    pub transaction_date: Date,
    /// The spending category, if any.
    pub category: Option<String>,
}

/// Renders the page for entering a transaction, with an account picker fed
/// from the provider's state.
pub async fn get_new_transaction_page<A: BackendApi>(
    State(state): State<AppState<A>>,
) -> Result<Response, Error> {
    let snapshot = state.provider.snapshot().await;

    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!(
            "could not get local time offset from timezone {}",
            &state.local_timezone
        );
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;
    let max_date = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold my-4" { "New Transaction" }

            form
                hx-post=(endpoints::TRANSACTIONS)
                hx-target-error="#alert-container"
                class="w-full space-y-4"
            {
                div
                {
                    label for="account_id" class=(FORM_LABEL_STYLE) { "Account" }

                    select
                        name="account_id"
                        id="account_id"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required
                    {
                        @for account in &snapshot.accounts {
                            option value=(account.id) { (account.name) }
                        }
                    }
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        type="number"
                        name="amount"
                        id="amount"
                        step="0.01"
                        placeholder="-12.50"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        type="text"
                        name="description"
                        id="description"
                        placeholder="Card purchase"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                div
                {
                    label for="transaction_date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        type="date"
                        name="transaction_date"
                        id="transaction_date"
                        value=(max_date)
                        max=(max_date)
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category (optional)" }

                    input
                        type="text"
                        name="category"
                        id="category"
                        placeholder="Groceries"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Transaction" }
            }
        }
    );

    Ok(render(StatusCode::OK, base("New Transaction", &[], &content)))
}

/// Create the transaction on the backend and redirect to the dashboard.
pub async fn create_transaction_endpoint<A: BackendApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let request = CreateTransactionRequest {
        account_id: form.account_id,
        amount: form.amount,
        description: form.description,
        transaction_date: form.transaction_date,
        category: form.category.filter(|category| !category.is_empty()),
    };

    match state.provider.api().create_transaction(&request).await {
        Ok(transaction) => {
            tracing::info!("created transaction {}", transaction.id);
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            return error.into_alert_response();
        }
    }

    state.provider.load().await;

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
