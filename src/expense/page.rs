//! Defines the route handler for the expense tracker page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, currency::CurrencyFormatter, store::TransactionStore, timezone::today,
};

use super::{form::ExpenseForm, view::expenses_page};

/// The state needed to render the expense tracker and handle its form.
#[derive(Debug, Clone)]
pub struct ExpenseTrackerState {
    /// The local timezone as a canonical timezone name, e.g. "Africa/Cairo".
    pub local_timezone: String,
    /// Formats amounts for display.
    pub currency: CurrencyFormatter,
    /// The transactions to display.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for ExpenseTrackerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            currency: state.currency.clone(),
            store: state.store.clone(),
        }
    }
}

/// Renders the expense tracker page with an empty form dated today.
pub async fn get_expenses_page(
    State(state): State<ExpenseTrackerState>,
) -> Result<Response, Error> {
    let today = today(&state.local_timezone)?;

    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    Ok(expenses_page(&ExpenseForm::cleared(today), &store, &state.currency).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use scraper::Selector;
    use time::OffsetDateTime;

    use crate::{
        currency::CurrencyFormatter,
        endpoints,
        expense::page::{ExpenseTrackerState, get_expenses_page},
        storage::MemoryStorage,
        store::TransactionStore,
        test_utils::{
            assert_content_type, assert_form_input_with_value, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_form, parse_html_document,
        },
        transaction::DATE_FORMAT,
    };

    fn get_test_state() -> ExpenseTrackerState {
        let mut store = TransactionStore::load(Box::new(MemoryStorage::default())).unwrap();
        store.add("Coffee", 3.5, "2024-01-01").unwrap();

        ExpenseTrackerState {
            local_timezone: "Etc/UTC".to_owned(),
            currency: CurrencyFormatter::default(),
            store: Arc::new(Mutex::new(store)),
        }
    }

    #[tokio::test]
    async fn page_has_form_list_and_total() {
        let response = get_expenses_page(State(get_test_state())).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::EXPENSES, "hx-post");
        let today = OffsetDateTime::now_utc().date().format(DATE_FORMAT).unwrap();
        assert_form_input_with_value(&form, "date", "date", &today);
        assert_form_input_with_value(&form, "amount", "number", "0");

        let rows = document
            .select(&Selector::parse("#expense-list > li").unwrap())
            .count();
        assert_eq!(rows, 1);
        let total = document
            .select(&Selector::parse("#total-expense").unwrap())
            .next()
            .expect("No total found")
            .text()
            .collect::<String>();
        assert_eq!(total.trim(), "Total Expense: EGP 3.50");
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let mut state = get_test_state();
        state.local_timezone = "Nowhere/Special".to_owned();

        let result = get_expenses_page(State(state)).await;

        assert!(result.is_err());
    }
}
