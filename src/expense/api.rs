//! JSON endpoints for listing and creating transactions.
//!
//! Transactions use the same JSON representation as the storage slot.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, storage::TransactionRecord, store::TransactionStore};

/// The state needed for the transactions API.
#[derive(Debug, Clone)]
pub struct TransactionsApiState {
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for TransactionsApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TransactionsResponse {
    transactions: Vec<TransactionRecord>,
    total: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// The request body for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransactionRequest {
    pub description: String,
    pub amount: f64,
    /// The date of the transaction, "YYYY-MM-DD".
    pub date: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

impl Error {
    fn into_json_response(self) -> Response {
        match self {
            Error::Validation(error) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string())
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        }
    }
}

/// Lists all transactions in order along with their total.
pub async fn list_transactions_endpoint(State(state): State<TransactionsApiState>) -> Response {
    let store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_json_response();
        }
    };

    let transactions = match store
        .list()
        .iter()
        .map(TransactionRecord::from_transaction)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(transactions) => transactions,
        Err(error) => return error.into_json_response(),
    };

    Json(TransactionsResponse {
        transactions,
        total: store.total(),
    })
    .into_response()
}

/// Creates a transaction, responding with the new transaction or a 422 and
/// an error message if the request is invalid.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionsApiState>,
    Json(request): Json<NewTransactionRequest>,
) -> Response {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_json_response();
        }
    };

    let result = store
        .add(&request.description, request.amount, &request.date)
        .and_then(|transaction| TransactionRecord::from_transaction(&transaction));

    match result {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => error.into_json_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::StatusCode,
        routing::get,
    };
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{AppState, endpoints, storage::MemoryStorage};

    use super::{NewTransactionRequest, create_transaction_endpoint, list_transactions_endpoint};

    fn get_test_server() -> TestServer {
        let state = AppState::new(Box::new(MemoryStorage::default()), "Etc/UTC", "EGP").unwrap();
        let app = Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                get(list_transactions_endpoint).post(create_transaction_endpoint),
            )
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn request(description: &str, amount: f64, date: &str) -> NewTransactionRequest {
        NewTransactionRequest {
            description: description.to_owned(),
            amount,
            date: date.to_owned(),
        }
    }

    #[tokio::test]
    async fn create_then_list() {
        let server = get_test_server();

        let created = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&request("Groceries", 120.0, "2024-01-01"))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created = created.json::<serde_json::Value>();
        assert_eq!(created["description"], "Groceries");
        assert_eq!(created["date"], "2024-01-01T00:00:00.000Z");
        assert_eq!(created["type"], "expense");
        assert!(created["id"].is_string());

        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&request("Returned shoes", -50.0, "2024-01-02"))
            .await
            .assert_status(StatusCode::CREATED);

        let listed = server
            .get(endpoints::TRANSACTIONS_API)
            .await
            .json::<serde_json::Value>();
        assert_eq!(listed["total"], json!(70.0));
        assert_eq!(listed["transactions"][0]["id"], created["id"]);
        assert_eq!(listed["transactions"][1]["description"], "Returned shoes");
    }

    #[tokio::test]
    async fn invalid_request_returns_error_message() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&request("", 12.0, "2024-01-01"))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.json::<serde_json::Value>(),
            json!({ "error": "description cannot be empty" })
        );

        let listed = server
            .get(endpoints::TRANSACTIONS_API)
            .await
            .json::<serde_json::Value>();
        assert_eq!(listed["transactions"], json!([]));
        assert_eq!(listed["total"], json!(0.0));
    }
}
