//! Defines the endpoint the expense form is submitted to.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since that handles missing fields and empty
// strings more gracefully than axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRequest;

use crate::{Error, endpoints, timezone::today};

use super::{form::ExpenseForm, page::ExpenseTrackerState, view::expense_tracker_view};

/// A route handler for the expense form.
///
/// A complete submission creates an expense and resets the form. An incomplete
/// or invalid submission is ignored: nothing is created and the form keeps the
/// submitted values. Either way the form, list and total are rendered again.
///
/// Requests that do not come from htmx are redirected to the expense tracker page.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseTrackerState>,
    HxRequest(is_htmx_request): HxRequest,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let form = match form.validate() {
        None => {
            tracing::debug!("Ignoring incomplete expense form {form:?}");
            form
        }
        Some(expense) => match store.add(&expense.description, expense.amount, &expense.date) {
            Ok(_) => match today(&state.local_timezone) {
                Ok(today) => ExpenseForm::cleared(today),
                Err(error) => return error.into_alert_response(),
            },
            Err(Error::Validation(error)) => {
                tracing::debug!("Ignoring invalid expense form: {error}");
                form
            }
            Err(error) => return error.into_alert_response(),
        },
    };

    if !is_htmx_request {
        return Redirect::to(endpoints::ROOT).into_response();
    }

    expense_tracker_view(&form, &store, &state.currency).into_response()
}
