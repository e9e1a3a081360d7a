use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, currency::CurrencyFormatter, store::TransactionStore,
    transaction::TransactionId,
};

use super::view::expense_summary_view;

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// Formats amounts for display.
    pub currency: CurrencyFormatter,
    /// The transactions to delete from.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            currency: state.currency.clone(),
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting an expense, responds with the updated list and total.
///
/// Responds with a 404 and an alert if there is no expense with the ID `expense_id`.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<TransactionId>,
) -> Response {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.remove(&expense_id) {
        Ok(_) => expense_summary_view(&store, &state.currency).into_response(),
        Err(Error::TransactionNotFound(id)) => {
            tracing::warn!("Tried to delete missing transaction {id}");
            Error::TransactionNotFound(id).into_alert_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}
