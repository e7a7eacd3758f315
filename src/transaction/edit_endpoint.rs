//! Defines the endpoint for saving changes to a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, Query};
use axum_htmx::HxRedirect;
use rusqlite::{Connection, params};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    transaction::{TransactionId, core::NewTransaction},
};

use super::create_endpoint::TransactionForm;

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the edit transaction endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct EditQueryParams {
    /// Where to send the user after a successful edit.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// A route handler for saving changes to a transaction, redirects back to the
/// listing the user came from on success.
///
/// Saving a transaction that was deleted in the meantime responds with an
/// alert rather than silently doing nothing.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query_params): Query<EditQueryParams>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let updated = NewTransaction::from(form);

    if let Err(error) = updated.validate() {
        return error.into_alert_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_transaction(transaction_id, &updated, &connection) {
        Ok(0) => {
            tracing::error!(
                "Could not update transaction {transaction_id}: update returned zero rows affected"
            );
            return Error::UpdateMissingTransaction.into_alert_response();
        }
        Ok(_) => {}
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    }

    let redirect_url = query_params
        .redirect
        .unwrap_or(endpoints::TRANSACTIONS_VIEW.to_owned());

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

type RowsAffected = usize;

fn update_transaction(
    id: TransactionId,
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE \"transaction\" \
             SET date = ?1, description = ?2, category = ?3, kind = ?4, amount = ?5 \
             WHERE id = ?6;",
            params![
                transaction.date,
                transaction.description,
                transaction.category,
                transaction.kind,
                transaction.amount,
                id,
            ],
        )
        .map_err(Error::from)
}
