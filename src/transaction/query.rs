//! Filtered retrieval of transactions for the list view.

use rusqlite::{Connection, params_from_iter};
use serde::Deserialize;
use time::Date;

use crate::Error;

use super::core::{Transaction, TransactionKind, map_transaction_row};

/// The filter controls of the transaction list view.
///
/// Each field narrows the listing when present and is ignored when absent.
/// Query strings produced by the filter form contain every control, so an
/// unselected control arrives as the empty string and deserializes to `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionFilter {
    /// Only include transactions of this kind. Named "type" on the wire.
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionKind>,
    /// Only include transactions with exactly this category.
    #[serde(default)]
    pub category: Option<String>,
    /// Only include transactions that happened on this date.
    #[serde(default)]
    pub date: Option<Date>,
}

impl TransactionFilter {
    /// Drop a category that is present but blank.
    ///
    /// Browsers submit text inputs as empty strings rather than omitting
    /// them, and a blank category means "no filter", not "category is ''".
    pub fn normalized(mut self) -> Self {
        if self
            .category
            .as_ref()
            .is_some_and(|category| category.trim().is_empty())
        {
            self.category = None;
        }

        self
    }

    /// Serialize the active controls as a URL query string, e.g.
    /// `type=expense&date=2024-03-05`.
    ///
    /// Inactive controls are omitted entirely so the produced URLs stay
    /// canonical: the same filter always renders the same string.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();

        if let Some(kind) = self.kind {
            parts.push(format!("type={kind}"));
        }

        if let Some(category) = &self.category {
            // The category is free text and needs percent-encoding.
            match serde_urlencoded::to_string([("category", category)]) {
                Ok(encoded) => parts.push(encoded),
                Err(error) => {
                    tracing::error!("Could not encode category filter {category:?}: {error}")
                }
            }
        }

        if let Some(date) = self.date {
            parts.push(format!("date={date}"));
        }

        parts.join("&")
    }
}

/// Retrieve the transactions matching `filter`, most recent first.
///
/// Transactions on the same date keep their insertion order.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut conditions = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(kind) = filter.kind {
        conditions.push("kind = ?");
        params.push(kind.to_string());
    }

    if let Some(category) = &filter.category {
        conditions.push("category = ?");
        params.push(category.clone());
    }

    if let Some(date) = filter.date {
        conditions.push("date = ?");
        params.push(date.to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let transactions = connection
        .prepare(&format!(
            "SELECT id, date, description, category, kind, amount \
             FROM \"transaction\" {where_clause} ORDER BY date DESC, id ASC"
        ))?
        .query_map(params_from_iter(params), map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}


#[cfg(test)]
mod query_tests {
    use time::macros::date;

    use crate::transaction::{
        TransactionKind,
        core::{
            create_transaction,
            test_utils::{get_test_connection, new_transaction},
        },
    };

    use super::{TransactionFilter, get_transactions};

    #[test]
    fn lists_all_transactions_most_recent_first() {
        let conn = get_test_connection();
        let older = create_transaction(
            new_transaction(
                date!(2024 - 03 - 01),
                "Groceries",
                "Food",
                TransactionKind::Expense,
                450.0,
            ),
            &conn,
        )
        .unwrap();
        let newer = create_transaction(
            new_transaction(
                date!(2024 - 03 - 05),
                "Salary",
                "Salary",
                TransactionKind::Income,
                25_000.0,
            ),
            &conn,
        )
        .unwrap();

        let transactions = get_transactions(&TransactionFilter::default(), &conn).unwrap();

        assert_eq!(transactions, vec![newer, older]);
    }

    #[test]
    fn same_date_keeps_insertion_order() {
        let conn = get_test_connection();
        let first = create_transaction(
            new_transaction(
                date!(2024 - 03 - 05),
                "Breakfast",
                "Food",
                TransactionKind::Expense,
                120.0,
            ),
            &conn,
        )
        .unwrap();
        let second = create_transaction(
            new_transaction(
                date!(2024 - 03 - 05),
                "Lunch",
                "Food",
                TransactionKind::Expense,
                180.0,
            ),
            &conn,
        )
        .unwrap();

        let transactions = get_transactions(&TransactionFilter::default(), &conn).unwrap();

        assert_eq!(transactions, vec![first, second]);
    }

    #[test]
    fn filters_combine_with_and() {
        let conn = get_test_connection();
        let want = create_transaction(
            new_transaction(
                date!(2024 - 01 - 01),
                "New year dinner",
                "Food",
                TransactionKind::Expense,
                800.0,
            ),
            &conn,
        )
        .unwrap();
        // Same kind and date, different category.
        create_transaction(
            new_transaction(
                date!(2024 - 01 - 01),
                "Taxi home",
                "Transport",
                TransactionKind::Expense,
                350.0,
            ),
            &conn,
        )
        .unwrap();
        // Same category and date, different kind.
        create_transaction(
            new_transaction(
                date!(2024 - 01 - 01),
                "Food stall sales",
                "Food",
                TransactionKind::Income,
                1_500.0,
            ),
            &conn,
        )
        .unwrap();

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            category: Some("Food".to_owned()),
            date: Some(date!(2024 - 01 - 01)),
        };
        let transactions = get_transactions(&filter, &conn).unwrap();

        assert_eq!(transactions, vec![want]);
    }

    #[test]
    fn kind_filter_excludes_other_kind() {
        let conn = get_test_connection();
        create_transaction(
            new_transaction(
                date!(2024 - 02 - 02),
                "Rent",
                "Housing",
                TransactionKind::Expense,
                10_000.0,
            ),
            &conn,
        )
        .unwrap();
        let income = create_transaction(
            new_transaction(
                date!(2024 - 02 - 15),
                "Salary",
                "Salary",
                TransactionKind::Income,
                25_000.0,
            ),
            &conn,
        )
        .unwrap();

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Income),
            ..Default::default()
        };
        let transactions = get_transactions(&filter, &conn).unwrap();

        assert_eq!(transactions, vec![income]);
    }

    #[test]
    fn no_matches_returns_empty_vec() {
        let conn = get_test_connection();
        create_transaction(
            new_transaction(
                date!(2024 - 02 - 02),
                "Rent",
                "Housing",
                TransactionKind::Expense,
                10_000.0,
            ),
            &conn,
        )
        .unwrap();

        let filter = TransactionFilter {
            category: Some("Travel".to_owned()),
            ..Default::default()
        };
        let transactions = get_transactions(&filter, &conn).unwrap();

        assert!(transactions.is_empty());
    }
}
