//! Maud templates for the transaction list view.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, EXPENSE_TEXT_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, INCOME_TEXT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, edit_delete_action_links,
    },
    transaction::{TransactionKind, models::TransactionTableRow, query::TransactionFilter},
};

/// The number of columns in the transaction table.
///
/// Placeholder rows span all of them so the table keeps its shape when there
/// is nothing to show.
const TABLE_COLUMN_COUNT: usize = 6;

/// What the body of the transaction table should display.
pub enum TableBody {
    /// One row per transaction.
    Rows(Vec<TransactionTableRow>),
    /// A single placeholder row saying there are no transactions.
    Empty,
    /// A single placeholder row saying the transactions could not be loaded.
    Error,
}

/// Render the full transactions page.
pub fn transactions_view(filter: &TransactionFilter, body: TableBody) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE) {
            div class="flex items-center justify-between mb-4" {
                h1 class="text-2xl font-bold" { "Transactions" }
                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(BUTTON_PRIMARY_STYLE) {
                    "Add Transaction"
                }
            }
            (filter_controls(filter))
            (transaction_table(body))
        }
    };

    base("Transactions", &content)
}

/// Render the filter controls above the transaction table.
///
/// Changing a control and pressing Apply swaps out the table in place and
/// pushes the filtered URL into browser history.
fn filter_controls(filter: &TransactionFilter) -> Markup {
    html! {
        form
            hx-get=(endpoints::TRANSACTIONS_VIEW)
            hx-target="#transaction-table"
            hx-swap="outerHTML"
            hx-push-url="true"
            class="flex flex-wrap items-end gap-4 mb-4"
        {
            div {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                select id="type" name="type" class=(FORM_TEXT_INPUT_STYLE) {
                    option value="" selected[filter.kind.is_none()] { "All" }
                    option
                        value=(TransactionKind::Income)
                        selected[filter.kind == Some(TransactionKind::Income)]
                        { "Income" }
                    option
                        value=(TransactionKind::Expense)
                        selected[filter.kind == Some(TransactionKind::Expense)]
                        { "Expense" }
                }
            }
            div {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                input
                    id="category"
                    name="category"
                    type="text"
                    value=[filter.category.as_ref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
            div {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    id="date"
                    name="date"
                    type="date"
                    value=[filter.date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
        }
    }
}

/// Render the transaction table.
///
/// This is the fragment the filter form and the list endpoint swap in place,
/// so it carries the `transaction-table` ID the controls target.
pub fn transaction_table(body: TableBody) -> Markup {
    html! {
        table id="transaction-table" class="w-full border-collapse" {
            thead {
                tr {
                    th class=(TABLE_HEADER_STYLE) { "Date" }
                    th class=(TABLE_HEADER_STYLE) { "Description" }
                    th class=(TABLE_HEADER_STYLE) { "Category" }
                    th class=(TABLE_HEADER_STYLE) { "Type" }
                    th class=(TABLE_HEADER_STYLE) { "Amount" }
                    th class=(TABLE_HEADER_STYLE) { "Actions" }
                }
            }
            tbody {
                @match body {
                    TableBody::Rows(rows) => {
                        @for row in &rows {
                            (transaction_row_view(row))
                        }
                    },
                    TableBody::Empty => tr {
                        td
                            data-empty-state="true"
                            colspan=(TABLE_COLUMN_COUNT)
                            class="text-center py-8 text-gray-500 dark:text-gray-400"
                        { "No transactions found." }
                    },
                    TableBody::Error => tr {
                        td
                            data-error-state="true"
                            colspan=(TABLE_COLUMN_COUNT)
                            class="text-center py-8 text-red-700 dark:text-red-300"
                        { "Error loading transactions. Please try again." }
                    },
                }
            }
        }
    }
}

fn transaction_row_view(row: &TransactionTableRow) -> Markup {
    let (kind_arrow, kind_style) = match row.kind {
        TransactionKind::Income => ("↑", INCOME_TEXT_STYLE),
        TransactionKind::Expense => ("↓", EXPENSE_TEXT_STYLE),
    };

    html! {
        tr data-transaction-row="true" class=(TABLE_ROW_STYLE) {
            td class=(TABLE_CELL_STYLE) { (row.date_label) }
            td class=(TABLE_CELL_STYLE) title=[row.description_tooltip.as_ref()] {
                (row.description)
            }
            td class=(TABLE_CELL_STYLE) {
                span class=(CATEGORY_BADGE_STYLE) { (row.category) }
            }
            td class=(TABLE_CELL_STYLE) {
                span class=(kind_style) { (kind_arrow) " " (row.kind) }
            }
            td class={(TABLE_CELL_STYLE) " " (kind_style)} { (row.amount_label) }
            td class=(TABLE_CELL_STYLE) {
                (edit_delete_action_links(
                    &row.edit_url,
                    &row.delete_url,
                    "Are you sure you want to delete this transaction?",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::transaction::{
        Transaction, TransactionKind, models::TransactionTableRow, query::TransactionFilter,
    };

    use super::{TableBody, transaction_table, transactions_view};

    fn sample_rows() -> Vec<TransactionTableRow> {
        [
            Transaction {
                id: 1,
                date: date!(2024 - 03 - 05),
                description: "Salary".to_owned(),
                category: "Salary".to_owned(),
                kind: TransactionKind::Income,
                amount: 25_000.0,
            },
            Transaction {
                id: 2,
                date: date!(2024 - 03 - 01),
                description: "Groceries".to_owned(),
                category: "Food".to_owned(),
                kind: TransactionKind::Expense,
                amount: 450.0,
            },
        ]
        .iter()
        .map(|transaction| TransactionTableRow::new_from_transaction(transaction, None))
        .collect()
    }

    #[track_caller]
    fn must_select_one<'a>(html: &'a Html, css_selector: &str) -> scraper::ElementRef<'a> {
        let selector = Selector::parse(css_selector).expect("Could not parse selector");
        let mut elements = html.select(&selector);
        let element = elements
            .next()
            .unwrap_or_else(|| panic!("No element matching {css_selector}"));
        assert!(
            elements.next().is_none(),
            "More than one element matching {css_selector}"
        );
        element
    }

    #[test]
    fn table_renders_one_row_per_transaction() {
        let html_string = transaction_table(TableBody::Rows(sample_rows())).into_string();
        let html = Html::parse_fragment(&html_string);

        let row_selector = Selector::parse("tr[data-transaction-row='true']").unwrap();
        assert_eq!(html.select(&row_selector).count(), 2);
    }

    #[test]
    fn table_has_six_column_headers() {
        let html_string = transaction_table(TableBody::Empty).into_string();
        let html = Html::parse_fragment(&html_string);

        let header_selector = Selector::parse("thead th").unwrap();
        let headers: Vec<String> = html
            .select(&header_selector)
            .map(|header| header.text().collect())
            .collect();
        assert_eq!(
            headers,
            vec!["Date", "Description", "Category", "Type", "Amount", "Actions"]
        );
    }

    #[test]
    fn empty_table_renders_placeholder_row_spanning_all_columns() {
        let html_string = transaction_table(TableBody::Empty).into_string();
        let html = Html::parse_fragment(&html_string);

        let cell = must_select_one(&html, "td[data-empty-state='true']");
        assert_eq!(cell.attr("colspan"), Some("6"));
        assert!(
            cell.text().collect::<String>().contains("No transactions"),
            "Empty state should say there are no transactions"
        );
    }

    #[test]
    fn error_table_renders_distinct_placeholder_row() {
        let html_string = transaction_table(TableBody::Error).into_string();
        let html = Html::parse_fragment(&html_string);

        let cell = must_select_one(&html, "td[data-error-state='true']");
        assert_eq!(cell.attr("colspan"), Some("6"));
        assert!(
            cell.text()
                .collect::<String>()
                .contains("Error loading transactions"),
            "Error state should mention the load failure"
        );

        let empty_selector = Selector::parse("td[data-empty-state='true']").unwrap();
        assert_eq!(
            html.select(&empty_selector).count(),
            0,
            "Error state should not look like the empty state"
        );
    }

    #[test]
    fn rows_carry_edit_link_and_delete_button() {
        let html_string = transaction_table(TableBody::Rows(sample_rows())).into_string();
        let html = Html::parse_fragment(&html_string);

        let edit_selector = Selector::parse("a[href='/edit_transaction/1']").unwrap();
        assert_eq!(html.select(&edit_selector).count(), 1);

        let delete_selector = Selector::parse("button[hx-post='/delete_transaction/1']").unwrap();
        let delete_button = html
            .select(&delete_selector)
            .next()
            .expect("No delete button for transaction 1");
        assert!(
            delete_button.attr("hx-confirm").is_some(),
            "Delete should ask for confirmation"
        );
    }

    #[test]
    fn long_description_row_has_tooltip() {
        let transaction = Transaction {
            id: 3,
            date: date!(2024 - 03 - 05),
            description: "Monthly payment for the apartment near the office in Makati".to_owned(),
            category: "Housing".to_owned(),
            kind: TransactionKind::Expense,
            amount: 10_000.0,
        };
        let rows = vec![TransactionTableRow::new_from_transaction(&transaction, None)];

        let html_string = transaction_table(TableBody::Rows(rows)).into_string();
        let html = Html::parse_fragment(&html_string);

        let cell = must_select_one(&html, "td[title]");
        assert_eq!(cell.attr("title"), Some(transaction.description.as_str()));
        assert!(cell.text().collect::<String>().ends_with('…'));
    }

    #[test]
    fn full_page_contains_filter_controls_and_table() {
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            category: Some("Food".to_owned()),
            date: None,
        };

        let html_string = transactions_view(&filter, TableBody::Rows(sample_rows())).into_string();
        let html = Html::parse_document(&html_string);

        must_select_one(&html, "table#transaction-table");

        let form = must_select_one(&html, "form[hx-get='/transactions']");
        assert_eq!(form.attr("hx-target"), Some("#transaction-table"));
        assert_eq!(form.attr("hx-push-url"), Some("true"));

        let selected = must_select_one(&html, "select#type option[selected]");
        assert_eq!(selected.attr("value"), Some("expense"));

        let category_input = must_select_one(&html, "input#category");
        assert_eq!(category_input.attr("value"), Some("Food"));
    }
}
