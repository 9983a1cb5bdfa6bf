//! The application's route URIs.
//!
//! For routes that take a parameter, e.g., '/accounts/{account_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with account cards and the spending chart.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying a single account and its transactions.
pub const ACCOUNT_VIEW: &str = "/accounts/{kind}/{account_id}";
/// The page for creating a new account.
pub const NEW_ACCOUNT_VIEW: &str = "/accounts/new";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route that triggers a SimpleFin sync and returns the refreshed dashboard.
pub const SYNC: &str = "/sync";
/// The route the new-account form posts to.
pub const ACCOUNTS: &str = "/accounts";
/// The route the new-transaction form posts to.
pub const TRANSACTIONS: &str = "/transactions";

/// Replace the parameters in `endpoint_path` with `values`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the path '/accounts/{account_id}', '{account_id}' is the
/// parameter.
///
/// Values are substituted left to right; surplus values are ignored, and
/// parameters without a value are left in place.
pub fn format_endpoint(endpoint_path: &str, values: &[&str]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut remainder = endpoint_path;
    let mut values = values.iter();

    while let Some(param_start) = remainder.find('{') {
        let Some(param_len) = remainder[param_start..].find('}') else {
            break;
        };

        formatted.push_str(&remainder[..param_start]);

        match values.next() {
            Some(value) => formatted.push_str(value),
            None => formatted.push_str(&remainder[param_start..param_start + param_len + 1]),
        }

        remainder = &remainder[param_start + param_len + 1..];
    }

    formatted.push_str(remainder);
    formatted
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::ACCOUNT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_ACCOUNT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::SYNC);
        assert_endpoint_is_valid_uri(endpoints::ACCOUNTS);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/accounts/{kind}/{account_id}", &["credit", "act-1"]);

        assert_eq!(formatted_path, "/accounts/credit/act-1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/accounts/new", &["act-1"]);

        assert_eq!(formatted_path, "/accounts/new");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn keeps_parameter_without_value() {
        let formatted_path = format_endpoint("/accounts/{kind}/{account_id}", &["credit"]);

        assert_eq!(formatted_path, "/accounts/credit/{account_id}");
    }
}
