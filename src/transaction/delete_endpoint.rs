//! Defines the endpoint for deleting a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, Error, endpoints, transaction::TransactionId};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the delete transaction endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQueryParams {
    /// Where to send the user after the delete, e.g. back to a filtered
    /// transactions listing.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// A route handler for deleting a transaction, redirects back to the listing
/// on success so the table is re-rendered without the deleted row.
///
/// Deleting a transaction that is already gone responds with an alert instead
/// of pretending the delete worked.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query_params): Query<DeleteQueryParams>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_transaction(transaction_id, &connection) {
        Ok(0) => {
            tracing::error!(
                "Could not delete transaction {transaction_id}: delete returned zero rows affected"
            );
            Error::DeleteMissingTransaction.into_alert_response()
        }
        Ok(_) => {
            let redirect_url = query_params
                .redirect
                .unwrap_or(endpoints::TRANSACTIONS_VIEW.to_owned());

            (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

type RowsAffected = usize;

fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )
        .map_err(|err| err.into())
}
