//! Database initialization for the application.

use rusqlite::Connection;

use crate::{Error, transaction::create_transaction_table};

/// Create the tables for the application's domain models if they do not exist.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_transaction_table(connection)?;

    Ok(())
}
