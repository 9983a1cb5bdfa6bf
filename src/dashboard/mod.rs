//! The dashboard page: account cards, the monthly spending chart and the
//! sync action.

mod chart;
mod handlers;
mod spending;

pub use handlers::{get_dashboard_page, post_sync};
