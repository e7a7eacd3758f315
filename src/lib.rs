//! Gastos is a small web app for tracking personal income and expenses.
//!
//! This library provides an HTTP server that directly serves HTML pages:
//! route handlers render maud templates and htmx drives form submissions,
//! delete confirmations, and post-mutation refreshes.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod db;
mod endpoints;
mod html;
mod not_found;
mod routing;
mod shared_templates;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use routing::build_router;

use crate::{
    alert::AlertView, html::render_internal_server_error,
    not_found::get_404_not_found_response, shared_templates::render,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A string other than "income" or "expense" was used as a transaction kind.
    #[error("\"{0}\" is not a valid transaction kind, expected \"income\" or \"expense\"")]
    InvalidTransactionKind(String),

    /// A zero or negative amount was used to create or update a transaction.
    ///
    /// The direction of the money flow is carried by the transaction kind, so
    /// amounts are always stored as positive values.
    #[error("transaction amounts must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => render_internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs",
                )
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::NonPositiveAmount(amount) => render(
                StatusCode::BAD_REQUEST,
                AlertView::error(
                    "Invalid transaction amount",
                    &format!("{amount} is not a valid amount, enter an amount greater than zero."),
                )
                .into_markup(),
            ),
            Error::InvalidTransactionKind(kind) => render(
                StatusCode::BAD_REQUEST,
                AlertView::error(
                    "Invalid transaction type",
                    &format!("\"{kind}\" is not a valid transaction type."),
                )
                .into_markup(),
            ),
            Error::UpdateMissingTransaction => render(
                StatusCode::NOT_FOUND,
                AlertView::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                )
                .into_markup(),
            ),
            Error::DeleteMissingTransaction => render(
                StatusCode::NOT_FOUND,
                AlertView::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                )
                .into_markup(),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                AlertView::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_markup(),
            ),
        }
    }
}
