//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{create_account_endpoint, get_account_page, get_new_account_page},
    api::BackendApi,
    dashboard::{get_dashboard_page, post_sync},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{create_transaction_endpoint, get_new_transaction_page},
};

/// Return a router with all the app's routes.
pub fn build_router<A: BackendApi>(state: AppState<A>) -> Router {
    let routes: Router<AppState<A>> = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::ACCOUNT_VIEW, get(get_account_page))
        .route(endpoints::NEW_ACCOUNT_VIEW, get(get_new_account_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(endpoints::SYNC, post(post_sync))
        .route(endpoints::ACCOUNTS, post(create_account_endpoint))
        .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    routes
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
