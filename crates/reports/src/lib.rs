//! Derived-view computation over resource-list snapshots.
//!
//! Everything here is a pure function of a transaction snapshot plus the
//! grouping parameters: no side effects, no persisted state, recomputed
//! whenever the snapshot changes. All functions are total over valid but
//! empty input and return the zero/empty equivalent.

mod csv_report;
mod grouping;
mod totals;

pub use csv_report::{REPORT_ROW_CAP, ReportError, render_csv};
pub use grouping::{
    CategorySum, DayBucket, MonthBucket, UNCATEGORIZED, by_category, by_day, by_month,
    category_label, rank_by, share_percent,
};
pub use totals::{Totals, totals_by_kind};

/// Formats integer minor units as a plain decimal amount, e.g. `12.34`.
pub fn format_minor(amount_minor: i64) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_minor_handles_signs_and_padding() {
        assert_eq!(format_minor(123_45), "123.45");
        assert_eq!(format_minor(-5), "-0.05");
        assert_eq!(format_minor(0), "0.00");
    }
}
