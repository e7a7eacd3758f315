//! The transaction feature: listing, filtering, creating, editing and
//! deleting income and expense records.

pub(crate) mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod models;
pub(crate) mod query;
mod transactions_page;
mod view;

pub use core::{Transaction, TransactionId, TransactionKind, create_transaction_table};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use transactions_page::get_transactions_page;
