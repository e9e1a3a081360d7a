//! Shared HTML building blocks: the page skeleton and the error page.

use maud::{DOCTYPE, Markup, html};

pub const PAGE_CONTAINER_STYLE: &str = "page";
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";
pub const BUTTON_PRIMARY_STYLE: &str = "button button-primary";
pub const BUTTON_DELETE_STYLE: &str = "button-delete";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Tracker" }
                link href="/static/main.css" rel="stylesheet";

                script src="https://unpkg.com/htmx.org@2.0.4/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.2/response-targets.js" {}
            }

            body hx-ext="response-targets"
            {
                (content)

                // Alert container for error responses
                div id="alert-container" class="alert-container" {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error-page"
        {
            h1 { (header) }
            p class="error-description" { (description) }
            p { (fix) }
            a href="/" { "Back to Homepage" }
        }
    );

    base(title, &content)
}
