//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    transaction::{
        TransactionKind,
        core::{NewTransaction, create_transaction},
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in pesos.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The category the transaction belongs to.
    #[serde(default)]
    pub category: Option<String>,
    /// Whether the transaction is income or an expense. Named "type" on the
    /// wire, which is a reserved word here.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl From<TransactionForm> for NewTransaction {
    fn from(form: TransactionForm) -> Self {
        NewTransaction {
            date: form.date,
            description: form.description.unwrap_or_default(),
            category: form.category.unwrap_or_else(|| "Uncategorized".to_owned()),
            kind: form.kind,
            amount: form.amount,
        }
    }
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
///
/// A validation failure responds with an alert and leaves the database
/// untouched, so nothing was added and the form keeps its contents.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let new_transaction = NewTransaction::from(form);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_transaction(new_transaction, &connection) {
        tracing::error!("could not create transaction: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
