//! View models that project transactions into what the table template needs.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::format_currency,
    transaction::{Transaction, TransactionKind},
};

/// Descriptions longer than this many graphemes are shortened in the table.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// Format for dates like "March 5, 2024".
const LONG_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// A transaction rendered ready for display as a table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTableRow {
    /// The date in long form, e.g. "March 5, 2024".
    pub date_label: String,
    /// The description, shortened if it is too long for the table.
    pub description: String,
    /// The full description when `description` was shortened.
    pub description_tooltip: Option<String>,
    /// The category of the transaction.
    pub category: String,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount formatted as currency, e.g. "₱1,234.50".
    pub amount_label: String,
    /// The URL of the edit page for this transaction.
    pub edit_url: String,
    /// The URL to POST to to delete this transaction.
    pub delete_url: String,
}

impl TransactionTableRow {
    /// Project `transaction` into a table row.
    ///
    /// `redirect_query` is the query string of the listing the row appears
    /// in. It is threaded through the edit and delete URLs so the user lands
    /// back on the same filtered listing after the action completes.
    pub fn new_from_transaction(
        transaction: &Transaction,
        redirect_query: Option<&str>,
    ) -> TransactionTableRow {
        let (description, description_tooltip) = shorten_description(&transaction.description);

        let mut edit_url = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION, transaction.id);
        let mut delete_url =
            endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

        if let Some(query) = redirect_query.filter(|query| !query.is_empty()) {
            let listing_url = format!("{}?{}", endpoints::TRANSACTIONS_VIEW, query);

            match serde_urlencoded::to_string([("redirect", &listing_url)]) {
                Ok(encoded) => {
                    edit_url = format!("{edit_url}?{encoded}");
                    delete_url = format!("{delete_url}?{encoded}");
                }
                Err(error) => {
                    tracing::error!("Could not encode redirect URL {listing_url}: {error}")
                }
            }
        }

        TransactionTableRow {
            date_label: format_long_date(transaction.date),
            description,
            description_tooltip,
            category: transaction.category.clone(),
            kind: transaction.kind,
            amount_label: format_currency(transaction.amount),
            edit_url,
            delete_url,
        }
    }
}

/// Format `date` in long form, e.g. "March 5, 2024".
///
/// Falls back to the ISO form if formatting fails, which only happens on a
/// malformed format description.
pub fn format_long_date(date: Date) -> String {
    date.format(LONG_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Shorten `description` to at most [MAX_DESCRIPTION_GRAPHEMES] graphemes.
///
/// Returns the possibly shortened text plus the full text when it was
/// shortened, for use as a tooltip.
fn shorten_description(description: &str) -> (String, Option<String>) {
    let graphemes: Vec<&str> = description.graphemes(true).collect();

    if graphemes.len() <= MAX_DESCRIPTION_GRAPHEMES {
        return (description.to_owned(), None);
    }

    let mut shortened: String = graphemes[..MAX_DESCRIPTION_GRAPHEMES].concat();
    shortened.push('…');

    (shortened, Some(description.to_owned()))
}
