//! The 404 page, also used as the fallback route.

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Sorry, we couldn't find that page.",
            "Check the address, or head back to the dashboard.",
        ),
    )
}
