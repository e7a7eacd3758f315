//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, get_new_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(endpoints::ADD_TRANSACTION, post(create_transaction_endpoint))
        .route(
            endpoints::EDIT_TRANSACTION,
            get(get_edit_transaction_page).post(edit_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            post(delete_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_transactions() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::TRANSACTIONS_VIEW);
    }
}
