//! Defines the route handler for the page with the form to edit a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::html;
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base,
        render_internal_server_error,
    },
    not_found::get_404_not_found_response,
    shared_templates::render,
    timezone::get_local_offset,
    transaction::{TransactionId, TransactionKind, core::get_transaction},
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the edit transaction page.
#[derive(Debug, Default, Deserialize)]
pub struct EditPageQuery {
    /// Where to send the user once the edit completes, e.g. back to a
    /// filtered transactions listing.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Renders the page for editing a transaction.
///
/// Editing a transaction that no longer exists renders the not found page.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<EditPageQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return render_internal_server_error(
                "Sorry, something went wrong.",
                "Try again later or check the server logs",
            );
        }
    };

    let transaction = match get_transaction(transaction_id, &connection) {
        Ok(transaction) => transaction,
        Err(Error::NotFound) => {
            return get_404_not_found_response();
        }
        Err(error) => {
            tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
            return render_internal_server_error(
                "Sorry, something went wrong.",
                "Try again later or check the server logs",
            );
        }
    };

    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    let mut edit_endpoint = format_endpoint(endpoints::EDIT_TRANSACTION, transaction_id);
    let back_url = match query.redirect.as_deref().filter(|url| !url.is_empty()) {
        Some(redirect_url) => {
            match serde_urlencoded::to_string([("redirect", redirect_url)]) {
                Ok(encoded) => edit_endpoint = format!("{edit_endpoint}?{encoded}"),
                Err(error) => {
                    tracing::error!("Could not encode redirect URL {redirect_url}: {error}")
                }
            }
            redirect_url.to_owned()
        }
        None => endpoints::TRANSACTIONS_VIEW.to_owned(),
    };

    let content = html! {
        div class=(FORM_CONTAINER_STYLE) {
            h1 class="text-2xl font-bold mb-4" { "Edit Transaction" }
            form
                hx-post=(edit_endpoint)
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class="flex flex-col gap-4"
            {
                fieldset class="flex gap-4" {
                    legend class=(FORM_LABEL_STYLE) { "Type" }
                    label class=(FORM_RADIO_LABEL_STYLE) {
                        input
                            type="radio"
                            name="type"
                            value=(TransactionKind::Income)
                            class=(FORM_RADIO_INPUT_STYLE)
                            checked[transaction.kind == TransactionKind::Income]
                            required;
                        "Income"
                    }
                    label class=(FORM_RADIO_LABEL_STYLE) {
                        input
                            type="radio"
                            name="type"
                            value=(TransactionKind::Expense)
                            class=(FORM_RADIO_INPUT_STYLE)
                            checked[transaction.kind == TransactionKind::Expense]
                            required;
                        "Expense"
                    }
                }
                div {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                    input
                        id="amount"
                        name="amount"
                        type="number"
                        min="0.01"
                        step="0.01"
                        value=(transaction.amount)
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }
                div {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                    input
                        id="date"
                        name="date"
                        type="date"
                        value=(transaction.date)
                        max=(today)
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }
                div {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                    input
                        id="description"
                        name="description"
                        type="text"
                        value=(transaction.description)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
                div {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    input
                        id="category"
                        name="category"
                        type="text"
                        value=(transaction.category)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
                button type="submit" hx-disabled-elt="this" class=(BUTTON_PRIMARY_STYLE) {
                    "Save"
                }
            }
            a href=(back_url) class=(LINK_STYLE) { "Back to transactions" }
        }
    };

    render(StatusCode::OK, base("Edit Transaction", &content))
}
