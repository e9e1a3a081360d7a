//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments. Error responses are retargeted to
//! the `#alert-container` element by the htmx `response-targets` extension.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An error message shown to the user, with `details` on how to fix it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
                class="alert alert-error"
                role="alert"
            {
                p class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    span { (self.details) }
                }

                button
                    type="button"
                    class="alert-dismiss"
                    aria-label="Close"
                    onclick="this.parentElement.remove()"
                {
                    "Dismiss"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let markup = Alert::error("Transaction not found.", "Try refreshing the page.").into_html();

        let fragment = Html::parse_fragment(&markup.into_string());
        let message = fragment
            .select(&Selector::parse("div[role=alert] p").unwrap())
            .next()
            .expect("No alert message found")
            .text()
            .collect::<String>();
        let details = fragment
            .select(&Selector::parse("div[role=alert] span").unwrap())
            .next()
            .expect("No alert details found")
            .text()
            .collect::<String>();

        assert_eq!(message.trim(), "Transaction not found.");
        assert_eq!(details.trim(), "Try refreshing the page.");
    }

    #[test]
    fn empty_details_are_omitted() {
        let markup = Alert::error("Something went wrong", "").into_html();

        let fragment = Html::parse_fragment(&markup.into_string());

        assert!(
            fragment
                .select(&Selector::parse("span").unwrap())
                .next()
                .is_none()
        );
    }
}
