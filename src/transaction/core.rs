//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// The ID of a transaction in the database.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brings money in or takes money out.
///
/// The kind is stored and serialized as the lowercase strings "income" and
/// "expense". Any other string is rejected at the form and storage boundaries,
/// it cannot reach the rendering code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. salary.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The wire/storage representation of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(Error::InvalidTransactionKind(other.to_owned())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// An income or expense, i.e. an event where money was either earned or spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction belongs to, e.g. "Food", "Salary".
    pub category: String,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money earned or spent, always positive.
    pub amount: f64,
}

/// The editable fields of a transaction, used for both create and update.
///
/// The ID is deliberately absent, it is assigned by the database on insert and
/// supplied through the endpoint path on update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction belongs to.
    pub category: String,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money earned or spent, must be positive.
    pub amount: f64,
}

impl NewTransaction {
    /// Check the positive-amount invariant.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveAmount] if the amount is zero or negative.
    pub fn validate(&self) -> Result<(), Error> {
        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the amount is zero or negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    new_transaction.validate()?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (date, description, category, kind, amount)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, date, description, category, kind, amount",
        )?
        .query_one(
            (
                new_transaction.date,
                new_transaction.description,
                new_transaction.category,
                new_transaction.kind,
                new_transaction.amount,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, date, description, category, kind, amount \
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// The kind column carries a CHECK constraint so a malformed value can never
/// be stored in the first place.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
                amount REAL NOT NULL CHECK (amount > 0)
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the filtered list query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_kind ON \"transaction\"(date, kind);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        kind: row.get(4)?,
        amount: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod test_utils {
    use rusqlite::Connection;
    use time::Date;

    use crate::db::initialize;

    use super::{NewTransaction, TransactionKind};

    pub fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    pub fn new_transaction(
        date: Date,
        description: &str,
        category: &str,
        kind: TransactionKind,
        amount: f64,
    ) -> NewTransaction {
        NewTransaction {
            date,
            description: description.to_owned(),
            category: category.to_owned(),
            kind,
            amount,
        }
    }
}
