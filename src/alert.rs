//! Alert messages swapped into the fixed alert container via htmx.

use maud::{Markup, html};

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success {
        message: String,
        details: String,
    },
    Error {
        message: String,
        details: String,
    },
}

impl Alert {
    pub fn success(message: &str, details: &str) -> Self {
        Alert::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn error(message: &str, details: &str) -> Self {
        Alert::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        let (message, details, container_style, heading_style) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "p-4 mb-4 rounded-lg bg-green-50 text-green-800 \
                dark:bg-gray-800 dark:text-green-400",
                "font-medium",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "p-4 mb-4 rounded-lg bg-red-50 text-red-800 \
                dark:bg-gray-800 dark:text-red-400",
                "font-medium",
            ),
        };

        html!(
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role="alert"
                {
                    p class=(heading_style) { (message) }

                    @if !details.is_empty() {
                        p class="text-sm" { (details) }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod alert_tests {
    use super::Alert;

    #[test]
    fn renders_message_and_details() {
        let markup = Alert::error("Sync unavailable", "Please try again later.").into_html();
        let rendered = markup.into_string();

        assert!(rendered.contains("Sync unavailable"));
        assert!(rendered.contains("Please try again later."));
    }

    #[test]
    fn omits_empty_details() {
        let markup = Alert::success("Saved", "").into_html();
        let rendered = markup.into_string();

        assert!(rendered.contains("Saved"));
        assert!(!rendered.contains("<p class=\"text-sm\">"));
    }
}
