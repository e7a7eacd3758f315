//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/edit_transaction/{transaction_id}',
//! use [format_endpoint].

/// The root route which redirects to the transactions page.
pub const ROOT: &str = "/";
/// The page for displaying, filtering, and managing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The route for creating a transaction from the add form.
pub const ADD_TRANSACTION: &str = "/add_transaction";
/// The page for editing a transaction (GET) and the route for submitting the edit (POST).
pub const EDIT_TRANSACTION: &str = "/edit_transaction/{transaction_id}";
/// The route for deleting a transaction.
pub const DELETE_TRANSACTION: &str = "/delete_transaction/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/edit_transaction/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
