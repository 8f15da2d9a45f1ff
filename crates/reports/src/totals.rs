use api_types::transaction::{TransactionKind, TransactionView};

/// Income/expense partition sums for one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income_minor: i64,
    pub expense_minor: i64,
    pub balance_minor: i64,
    pub count: usize,
}

impl Totals {
    /// Mean absolute transaction amount. The denominator is guarded so an
    /// empty snapshot yields zero instead of dividing by zero.
    pub fn average_minor(&self) -> i64 {
        (self.income_minor + self.expense_minor) / self.count.max(1) as i64
    }
}

/// Partitions transactions by kind and sums each side.
///
/// `balance = income - expense`; independent of element order.
pub fn totals_by_kind(transactions: &[TransactionView]) -> Totals {
    let mut totals = transactions
        .iter()
        .fold(Totals::default(), |mut acc, transaction| {
            match transaction.kind {
                TransactionKind::Income => acc.income_minor += transaction.amount_minor,
                TransactionKind::Expense => acc.expense_minor += transaction.amount_minor,
            }
            acc.count += 1;
            acc
        });
    totals.balance_minor = totals.income_minor - totals.expense_minor;
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn tx(kind: TransactionKind, amount_minor: i64) -> TransactionView {
        TransactionView {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind,
            amount_minor,
            category_id: None,
            category_name: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            note: None,
        }
    }

    #[test]
    fn balance_identity_holds() {
        let transactions = vec![
            tx(TransactionKind::Income, 20_000),
            tx(TransactionKind::Expense, 7_500),
            tx(TransactionKind::Expense, 2_500),
        ];
        let totals = totals_by_kind(&transactions);
        assert_eq!(totals.income_minor, 20_000);
        assert_eq!(totals.expense_minor, 10_000);
        assert_eq!(
            totals.balance_minor,
            totals.income_minor - totals.expense_minor
        );
    }

    #[test]
    fn balance_is_order_independent() {
        let mut transactions = vec![
            tx(TransactionKind::Expense, 100),
            tx(TransactionKind::Income, 300),
            tx(TransactionKind::Expense, 50),
        ];
        let forward = totals_by_kind(&transactions);
        transactions.reverse();
        let backward = totals_by_kind(&transactions);
        assert_eq!(forward.balance_minor, backward.balance_minor);
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let totals = totals_by_kind(&[]);
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.average_minor(), 0);
    }
}
