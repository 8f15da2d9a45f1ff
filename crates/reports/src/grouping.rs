use std::collections::BTreeMap;

use api_types::transaction::{TransactionKind, TransactionView};

/// Label rendered for transactions whose category was deleted or never
/// set.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One (label, sum) pair for proportional charting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySum {
    pub label: String,
    pub total_minor: i64,
}

/// One month of a trend chart, keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    pub month: String,
    pub income_minor: i64,
    pub expense_minor: i64,
    pub net_minor: i64,
}

/// One day of a trend chart, keyed `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: String,
    pub income_minor: i64,
    pub expense_minor: i64,
    pub net_minor: i64,
}

/// Resolves the display label for a transaction's category reference.
pub fn category_label(transaction: &TransactionView) -> &str {
    transaction
        .category_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNCATEGORIZED)
}

/// Sums expenses per category label, in first-encounter order.
///
/// Income transactions are skipped: the category chart is an expense
/// breakdown.
pub fn by_category(transactions: &[TransactionView]) -> Vec<CategorySum> {
    let mut sums: Vec<CategorySum> = Vec::new();
    for transaction in transactions {
        if transaction.kind != TransactionKind::Expense {
            continue;
        }
        let label = category_label(transaction);
        match sums.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.total_minor += transaction.amount_minor,
            None => sums.push(CategorySum {
                label: label.to_string(),
                total_minor: transaction.amount_minor,
            }),
        }
    }
    sums
}

/// Percentage of `part` in `total`, guarded against an empty total.
pub fn share_percent(part_minor: i64, total_minor: i64) -> f64 {
    if total_minor == 0 {
        return 0.0;
    }
    part_minor as f64 / total_minor as f64 * 100.0
}

/// Buckets transactions by `YYYY-MM`, ascending, so trend charts render
/// chronologically regardless of input order.
pub fn by_month(transactions: &[TransactionView]) -> Vec<MonthBucket> {
    let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for transaction in transactions {
        let key = transaction.date.format("%Y-%m").to_string();
        let entry = buckets.entry(key).or_default();
        match transaction.kind {
            TransactionKind::Income => entry.0 += transaction.amount_minor,
            TransactionKind::Expense => entry.1 += transaction.amount_minor,
        }
    }
    buckets
        .into_iter()
        .map(|(month, (income_minor, expense_minor))| MonthBucket {
            month,
            income_minor,
            expense_minor,
            net_minor: income_minor - expense_minor,
        })
        .collect()
}

/// Daily variant of [`by_month`], keyed `YYYY-MM-DD`.
pub fn by_day(transactions: &[TransactionView]) -> Vec<DayBucket> {
    let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for transaction in transactions {
        let key = transaction.date.format("%Y-%m-%d").to_string();
        let entry = buckets.entry(key).or_default();
        match transaction.kind {
            TransactionKind::Income => entry.0 += transaction.amount_minor,
            TransactionKind::Expense => entry.1 += transaction.amount_minor,
        }
    }
    buckets
        .into_iter()
        .map(|(date, (income_minor, expense_minor))| DayBucket {
            date,
            income_minor,
            expense_minor,
            net_minor: income_minor - expense_minor,
        })
        .collect()
}

/// Ranks descending by `key`, keeping the original relative order between
/// ties (stable sort), truncated to `limit`.
pub fn rank_by<T>(mut items: Vec<T>, limit: usize, key: impl Fn(&T) -> i64) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn tx(
        kind: TransactionKind,
        amount_minor: i64,
        date: &str,
        category: Option<&str>,
    ) -> TransactionView {
        TransactionView {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind,
            amount_minor,
            category_id: None,
            category_name: category.map(str::to_string),
            date: date.parse::<NaiveDate>().unwrap(),
            note: None,
        }
    }

    #[test]
    fn months_sort_ascending_regardless_of_input_order() {
        let transactions = vec![
            tx(TransactionKind::Expense, 10_000, "2024-03-05", None),
            tx(TransactionKind::Income, 20_000, "2024-01-10", None),
            tx(TransactionKind::Expense, 5_000, "2024-02-20", None),
        ];
        let buckets = by_month(&transactions);
        let keys: Vec<&str> = buckets.iter().map(|b| b.month.as_str()).collect();
        assert_eq!(keys, ["2024-01", "2024-02", "2024-03"]);
        assert_eq!(buckets[0].net_minor, 20_000);
        assert_eq!(buckets[2].net_minor, -10_000);
    }

    #[test]
    fn ranking_is_stable_and_truncated() {
        let spenders = vec![
            CategorySum {
                label: "a".into(),
                total_minor: 50,
            },
            CategorySum {
                label: "b".into(),
                total_minor: 200,
            },
            CategorySum {
                label: "c".into(),
                total_minor: 200,
            },
            CategorySum {
                label: "d".into(),
                total_minor: 10,
            },
            CategorySum {
                label: "e".into(),
                total_minor: 5,
            },
        ];
        let ranked = rank_by(spenders, 3, |entry| entry.total_minor);
        let labels: Vec<&str> = ranked.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, ["b", "c", "a"]);
    }

    #[test]
    fn missing_category_gets_fallback_label() {
        let transactions = vec![
            tx(TransactionKind::Expense, 1_000, "2024-01-01", None),
            tx(TransactionKind::Expense, 2_000, "2024-01-02", Some("Food")),
            tx(TransactionKind::Expense, 500, "2024-01-03", None),
        ];
        let sums = by_category(&transactions);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums[0].label, UNCATEGORIZED);
        assert_eq!(sums[0].total_minor, 1_500);
    }

    #[test]
    fn income_is_excluded_from_category_breakdown() {
        let transactions = vec![
            tx(TransactionKind::Income, 9_000, "2024-01-01", Some("Salary")),
            tx(TransactionKind::Expense, 1_000, "2024-01-02", Some("Food")),
        ];
        let sums = by_category(&transactions);
        assert_eq!(sums.len(), 1);
        assert_eq!(sums[0].label, "Food");
    }

    #[test]
    fn empty_input_yields_empty_groupings() {
        assert!(by_category(&[]).is_empty());
        assert!(by_month(&[]).is_empty());
        assert!(by_day(&[]).is_empty());
        assert_eq!(share_percent(100, 0), 0.0);
    }
}
