//! Defines the route handler for the page with the form to add a transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base,
    },
    timezone::get_local_offset,
    transaction::TransactionKind,
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the form for adding a transaction.
///
/// The date input defaults to today in the configured timezone and does not
/// accept future dates.
pub async fn get_new_transaction_page(
    State(state): State<NewTransactionPageState>,
) -> Result<Response, Error> {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Err(Error::InvalidTimezoneError(state.local_timezone));
    };
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    let content = html! {
        div class=(FORM_CONTAINER_STYLE) {
            h1 class="text-2xl font-bold mb-4" { "Add Transaction" }
            (new_transaction_form(&today.to_string()))
            a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Back to transactions" }
        }
    };

    Ok(base("Add Transaction", &content).into_response())
}

/// The form for adding a transaction.
///
/// The submit button is disabled while the request is in flight so a slow
/// server cannot collect duplicate submissions. Validation errors come back
/// as alerts without leaving the page.
fn new_transaction_form(today: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::ADD_TRANSACTION)
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
                        required;
                    "Income"
                }
                label class=(FORM_RADIO_LABEL_STYLE) {
                    input
                        type="radio"
                        name="type"
                        value=(TransactionKind::Expense)
                        class=(FORM_RADIO_INPUT_STYLE)
                        checked
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
                    placeholder="0.00"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }
            div {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    id="date"
                    name="date"
                    type="date"
                    value=(today)
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
                    placeholder="e.g. Groceries"
                    class=(FORM_TEXT_INPUT_STYLE);
            }
            div {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                input
                    id="category"
                    name="category"
                    type="text"
                    placeholder="e.g. Food"
                    class=(FORM_TEXT_INPUT_STYLE);
            }
            button
                type="submit"
                hx-disabled-elt="this"
                class=(BUTTON_PRIMARY_STYLE)
            { "Add" }
        }
    }
}
