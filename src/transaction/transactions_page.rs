//! Defines the route handler for the page that displays transactions as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRequest;
use rusqlite::Connection;

use crate::AppState;

use super::{
    models::TransactionTableRow,
    query::{TransactionFilter, get_transactions},
    view::{TableBody, transaction_table, transactions_view},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the user's transactions, filtered by the query parameters.
///
/// A request made by the filter controls gets back just the table so htmx can
/// swap it in place, a normal browser request gets the full page.
///
/// Load failures do not fail the request: the page still renders, with an
/// error row in place of the table body.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    let filter = filter.normalized();
    let body = load_table_body(&filter, &state);

    if is_htmx_request {
        transaction_table(body).into_response()
    } else {
        transactions_view(&filter, body).into_response()
    }
}

fn load_table_body(filter: &TransactionFilter, state: &TransactionsViewState) -> TableBody {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return TableBody::Error;
        }
    };

    let transactions = match get_transactions(filter, &connection) {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not get transactions: {error}");
            return TableBody::Error;
        }
    };

    if transactions.is_empty() {
        return TableBody::Empty;
    }

    let redirect_query = filter.to_query_string();
    let redirect_query = (!redirect_query.is_empty()).then_some(redirect_query);

    TableBody::Rows(
        transactions
            .iter()
            .map(|transaction| {
                TransactionTableRow::new_from_transaction(transaction, redirect_query.as_deref())
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum_extra::extract::Query;
    use axum_htmx::HxRequest;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::transaction::{
        TransactionKind,
        core::{
            create_transaction,
            test_utils::{get_test_connection, new_transaction},
        },
        query::TransactionFilter,
    };

    use super::{TransactionsViewState, get_transactions_page};

    fn get_test_state() -> TransactionsViewState {
        TransactionsViewState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    async fn render_page(
        state: TransactionsViewState,
        is_htmx_request: bool,
        filter: TransactionFilter,
    ) -> Html {
        let response = get_transactions_page(
            State(state),
            HxRequest(is_htmx_request),
            Query(filter),
        )
        .await;

        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    fn seed_transactions(state: &TransactionsViewState) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            new_transaction(
                date!(2024 - 03 - 05),
                "Salary",
                "Salary",
                TransactionKind::Income,
                25_000.0,
            ),
            &connection,
        )
        .unwrap();
        create_transaction(
            new_transaction(
                date!(2024 - 03 - 01),
                "Groceries",
                "Food",
                TransactionKind::Expense,
                450.0,
            ),
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn full_page_renders_one_row_per_transaction() {
        let state = get_test_state();
        seed_transactions(&state);

        let html = render_page(state, false, TransactionFilter::default()).await;

        let row_selector = Selector::parse("tr[data-transaction-row='true']").unwrap();
        assert_eq!(html.select(&row_selector).count(), 2);

        let title_selector = Selector::parse("title").unwrap();
        assert!(html.select(&title_selector).next().is_some());
    }

    #[tokio::test]
    async fn htmx_request_gets_just_the_table() {
        let state = get_test_state();
        seed_transactions(&state);

        let html = render_page(state, true, TransactionFilter::default()).await;

        let table_selector = Selector::parse("table#transaction-table").unwrap();
        assert_eq!(html.select(&table_selector).count(), 1);

        let title_selector = Selector::parse("title").unwrap();
        assert_eq!(
            html.select(&title_selector).count(),
            0,
            "Fragment response should not contain the page head"
        );
    }

    #[tokio::test]
    async fn no_transactions_renders_empty_state() {
        let state = get_test_state();

        let html = render_page(state, false, TransactionFilter::default()).await;

        let empty_selector = Selector::parse("td[data-empty-state='true']").unwrap();
        assert_eq!(html.select(&empty_selector).count(), 1);

        let row_selector = Selector::parse("tr[data-transaction-row='true']").unwrap();
        assert_eq!(html.select(&row_selector).count(), 0);
    }

    #[tokio::test]
    async fn filter_narrows_rows_and_threads_redirect() {
        let state = get_test_state();
        seed_transactions(&state);

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            ..Default::default()
        };
        let html = render_page(state, false, filter).await;

        let row_selector = Selector::parse("tr[data-transaction-row='true']").unwrap();
        assert_eq!(html.select(&row_selector).count(), 1);

        let edit_selector = Selector::parse("a[href^='/edit_transaction/']").unwrap();
        let edit_link = html.select(&edit_selector).next().expect("No edit link");
        assert!(
            edit_link
                .attr("href")
                .unwrap()
                .contains("redirect=%2Ftransactions%3Ftype%3Dexpense"),
            "Edit link should carry the active filter as a redirect"
        );
    }

    #[tokio::test]
    async fn query_error_renders_error_state() {
        let state = get_test_state();
        // Make the list query fail without poisoning the lock.
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE \"transaction\"", ())
            .unwrap();

        let html = render_page(state, false, TransactionFilter::default()).await;

        let error_selector = Selector::parse("td[data-error-state='true']").unwrap();
        assert_eq!(html.select(&error_selector).count(), 1);

        let empty_selector = Selector::parse("td[data-empty-state='true']").unwrap();
        assert_eq!(html.select(&empty_selector).count(), 0);
    }
}
