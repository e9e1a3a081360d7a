use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

async fn response_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&response_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// The descriptions of the rendered expense rows, in page order.
pub(crate) fn expense_descriptions(html: &Html) -> Vec<String> {
    html.select(&Selector::parse("#expense-list > li h2").unwrap())
        .map(|heading| heading.text().collect::<String>().trim().to_owned())
        .collect()
}

/// The text of the rendered total, e.g. "Total Expense: EGP 3.50".
#[track_caller]
pub(crate) fn total_text(html: &Html) -> String {
    html.select(&Selector::parse("#total-expense").unwrap())
        .next()
        .expect("No total found")
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}
