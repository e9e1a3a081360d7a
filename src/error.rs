//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, html::error_view, transaction::TransactionId};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The fields used to create a transaction were missing or invalid.
    #[error("invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    /// Tried to delete a transaction that is not in the store.
    #[error("the transaction {0} could not be found")]
    TransactionNotFound(TransactionId),

    /// The storage slot could not be read from or written to.
    ///
    /// The operation that triggered the read or write is aborted and the
    /// in-memory collection is left as it was before the operation.
    #[error("could not access transaction storage: {0}")]
    Storage(String),

    /// The storage slot holds a payload that cannot be parsed as a list of
    /// transactions.
    ///
    /// This error is fatal at startup. The slot is never overwritten to
    /// "repair" it, so the user can inspect or restore the file by hand.
    #[error("the stored transactions are malformed: {0}")]
    CorruptStorage(String),

    /// Could not acquire the lock on the transaction store.
    #[error("could not acquire the transaction store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The currency code cannot be used as a display prefix.
    #[error("invalid currency code \"{0}\"")]
    InvalidCurrency(String),
}

/// The reasons a new transaction can be rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    /// The description was empty or only whitespace.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The amount was NaN or infinite.
    #[error("amount must be a finite number")]
    NonFiniteAmount,

    /// The date could not be parsed as a calendar date.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::TransactionNotFound(_) => (
                StatusCode::NOT_FOUND,
                error_view(
                    "Not Found",
                    "404",
                    "Transaction not found.",
                    "It may have already been deleted.",
                ),
            )
                .into_response(),
            Error::InvalidTimezone(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_view(
                    "Internal Server Error",
                    "500",
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Internal Server Error",
                        "500",
                        "Sorry, something went wrong.",
                        "Try again later or check the server logs",
                    ),
                )
                    .into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for htmx requests.
    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            Error::TransactionNotFound(_) => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Transaction not found.",
                    "Try refreshing the page to see if the transaction has already been deleted.",
                ),
            )
                .into_response(),
            Error::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Could not save your changes",
                    "Your transactions were not changed. Check the server logs for more details.",
                ),
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            )
                .into_response(),
        }
    }
}
