//! Client-side CSV report synthesis.
//!
//! This is the export fallback: when the server-side csv export fails,
//! the report is rendered deterministically from the already-loaded
//! snapshot. It is never used for pdf/excel formats.
//!
//! Field values have embedded commas replaced with semicolons before
//! emission, matching the server's export byte-for-byte; see DESIGN.md
//! for the quoting trade-off.

use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use thiserror::Error;

use api_types::transaction::{TransactionFilters, TransactionView};

use crate::{
    format_minor,
    grouping::{by_category, by_month, category_label, rank_by, share_percent},
    totals::totals_by_kind,
};

/// Raw-row sample cap for the trailing transactions section.
pub const REPORT_ROW_CAP: usize = 50;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finalize report: {0}")]
    Finalize(String),
}

fn sanitize(value: &str) -> String {
    value.replace(',', ";")
}

fn describe_filters(filters: &TransactionFilters) -> String {
    let mut parts = Vec::new();
    if let Some(search) = &filters.search {
        parts.push(format!("search={search}"));
    }
    if let Some(kind) = filters.kind {
        parts.push(format!("kind={}", kind.as_str()));
    }
    if let Some(category_id) = filters.category_id {
        parts.push(format!("category={category_id}"));
    }
    if let Some(from) = filters.date_from {
        parts.push(format!("from={from}"));
    }
    if let Some(to) = filters.date_to {
        parts.push(format!("to={to}"));
    }
    if let Some(min) = filters.amount_min_minor {
        parts.push(format!("min={}", format_minor(min)));
    }
    if let Some(max) = filters.amount_max_minor {
        parts.push(format!("max={}", format_minor(max)));
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join("; ")
    }
}

/// Renders the full report: header, summary totals, ranked category
/// breakdown, monthly breakdown, and a capped sample of raw rows.
pub fn render_csv(
    transactions: &[TransactionView],
    filters: &TransactionFilters,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, ReportError> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(vec![]);

    writer.write_record(["Financial Report"])?;
    writer.write_record(["Generated on", generated_at.to_rfc3339().as_str()])?;
    writer.write_record(["Filters", sanitize(&describe_filters(filters)).as_str()])?;
    writer.write_record([""])?;

    let totals = totals_by_kind(transactions);
    writer.write_record(["Summary"])?;
    writer.write_record(["Total Income", format_minor(totals.income_minor).as_str()])?;
    writer.write_record(["Total Expense", format_minor(totals.expense_minor).as_str()])?;
    writer.write_record(["Net Balance", format_minor(totals.balance_minor).as_str()])?;
    writer.write_record(["Transaction Count", totals.count.to_string().as_str()])?;
    writer.write_record(["Average Transaction", format_minor(totals.average_minor()).as_str()])?;
    writer.write_record([""])?;

    let categories = by_category(transactions);
    let ranked = rank_by(categories, usize::MAX, |entry| entry.total_minor);
    writer.write_record(["Category Breakdown (Expenses)"])?;
    writer.write_record(["Category", "Amount", "Percentage"])?;
    for entry in &ranked {
        let percent = share_percent(entry.total_minor, totals.expense_minor);
        writer.write_record([
            sanitize(&entry.label),
            format_minor(entry.total_minor),
            format!("{percent:.1}%"),
        ])?;
    }
    writer.write_record([""])?;

    writer.write_record(["Monthly Breakdown"])?;
    writer.write_record(["Month", "Income", "Expense", "Net"])?;
    for bucket in by_month(transactions) {
        writer.write_record([
            bucket.month,
            format_minor(bucket.income_minor),
            format_minor(bucket.expense_minor),
            format_minor(bucket.net_minor),
        ])?;
    }
    writer.write_record([""])?;

    writer.write_record([format!("Transactions (first {REPORT_ROW_CAP})")])?;
    writer.write_record(["Date", "Category", "Kind", "Amount", "Note"])?;
    for transaction in transactions.iter().take(REPORT_ROW_CAP) {
        writer.write_record([
            transaction.date.to_string(),
            sanitize(category_label(transaction)),
            transaction.kind.as_str().to_string(),
            format_minor(transaction.amount_minor),
            sanitize(transaction.note.as_deref().unwrap_or_default()),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| ReportError::Finalize(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::transaction::TransactionKind;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn tx(kind: TransactionKind, amount_minor: i64, date: &str, note: Option<&str>) -> TransactionView {
        TransactionView {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind,
            amount_minor,
            category_id: None,
            category_name: Some("Food".to_string()),
            date: date.parse::<NaiveDate>().unwrap(),
            note: note.map(str::to_string),
        }
    }

    fn render(transactions: &[TransactionView]) -> String {
        let bytes = render_csv(
            transactions,
            &TransactionFilters::default(),
            DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .unwrap()
                .to_utc(),
        )
        .expect("report renders");
        String::from_utf8(bytes).expect("valid utf-8")
    }

    #[test]
    fn embedded_commas_become_semicolons() {
        let transactions = vec![tx(
            TransactionKind::Expense,
            1_200,
            "2024-04-03",
            Some("lunch, with friends"),
        )];
        let report = render(&transactions);
        assert!(report.contains("lunch; with friends"));
        assert!(!report.contains("lunch, with friends"));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let report = render(&[tx(TransactionKind::Income, 100, "2024-01-01", None)]);
        let summary = report.find("Summary").unwrap();
        let categories = report.find("Category Breakdown").unwrap();
        let monthly = report.find("Monthly Breakdown").unwrap();
        let rows = report.find("Transactions (first").unwrap();
        assert!(summary < categories);
        assert!(categories < monthly);
        assert!(monthly < rows);
    }

    #[test]
    fn empty_snapshot_renders_zero_totals() {
        let report = render(&[]);
        assert!(report.contains("Total Income,0.00"));
        assert!(report.contains("Transaction Count,0"));
    }

    #[test]
    fn raw_rows_are_capped() {
        let transactions: Vec<_> = (0..60)
            .map(|i| {
                tx(
                    TransactionKind::Expense,
                    100 + i,
                    "2024-04-03",
                    Some("row"),
                )
            })
            .collect();
        let report = render(&transactions);
        let rows = report
            .lines()
            .filter(|line| line.starts_with("2024-04-03"))
            .count();
        assert_eq!(rows, REPORT_ROW_CAP);
    }
}
