//! The page and endpoint for creating an account through the backend.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::html;
use serde::Deserialize;

use crate::{
    AppState,
    api::{BackendApi, CreateAccountRequest},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        render,
    },
    navigation::NavBar,
};

/// The form data for creating an account.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    /// The account name.
    pub name: String,
    /// The institution holding the account.
    pub institution: String,
    /// A label such as "checking" or "credit".
    pub account_type: String,
    /// The opening balance in dollars.
    pub balance: f64,
}

/// Renders the page for creating an account.
pub async fn get_new_account_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_ACCOUNT_VIEW).into_html();

    let text_input = |name: &str, label: &str, placeholder: &str| {
        html!(
            div
            {
                label for=(name) class=(FORM_LABEL_STYLE) { (label) }

                input
                    type="text"
                    name=(name)
                    id=(name)
                    placeholder=(placeholder)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold my-4" { "New Account" }

            form
                hx-post=(endpoints::ACCOUNTS)
                hx-target-error="#alert-container"
                class="w-full space-y-4"
            {
                (text_input("name", "Name", "Everyday Checking"))
                (text_input("institution", "Institution", "Chase"))
                (text_input("account_type", "Account type", "checking"))

                div
                {
                    label for="balance" class=(FORM_LABEL_STYLE) { "Balance" }

                    input
                        type="number"
                        name="balance"
                        id="balance"
                        step="0.01"
                        value="0.00"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Account" }
            }
        }
    );

    render(StatusCode::OK, base("New Account", &[], &content))
}

/// Create the account on the backend and redirect to the dashboard.
///
/// The backend rejecting the request (400) or being unreachable surfaces as
/// an alert; the form stays on screen so the user can fix and resubmit.
pub async fn create_account_endpoint<A: BackendApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<AccountForm>,
) -> Response {
    let request = CreateAccountRequest {
        name: form.name,
        institution: form.institution,
        account_type: form.account_type,
        balance: form.balance,
    };

    match state.provider.api().create_account(&request).await {
        Ok(account) => {
            tracing::info!("created account {}", account.id);
        }
        Err(error) => {
            tracing::error!("could not create account: {error}");
            return error.into_alert_response();
        }
    }

    // Pick up the new account before the redirect lands.
    state.provider.load().await;

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
