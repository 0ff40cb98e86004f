//! Aggregator: income/expense totals and per-category expense sums.

use finia_core::{CategorizedTransaction, Category, CategoryTotal, SUGGESTED_SAVINGS_RATE};
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals derived from a categorized statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub suggested_savings: f64,
    pub per_category_expense: Vec<CategoryTotal>,
}

impl Totals {
    /// Name of the first total that left the finite range, if any.
    pub fn overflowed_field(&self) -> Option<&'static str> {
        [
            ("total_income", self.total_income),
            ("total_expense", self.total_expense),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

/// Groups categorized transactions into summary figures
pub struct Aggregator;

impl Aggregator {
    /// Compute totals. Empty input yields all zeros and no categories.
    pub fn totals(txns: &[CategorizedTransaction]) -> Totals {
        let total_income: f64 = txns
            .iter()
            .filter(|t| t.transaction.is_income())
            .map(|t| t.transaction.amount)
            .sum();
        let total_expense: f64 = txns
            .iter()
            .filter(|t| t.transaction.is_expense())
            .map(|t| t.transaction.amount)
            .sum();

        Totals {
            total_income,
            total_expense,
            balance: total_income + total_expense,
            suggested_savings: SUGGESTED_SAVINGS_RATE * total_expense.abs(),
            per_category_expense: Self::per_category_expense(txns),
        }
    }

    /// Absolute expense per category, in declared category order.
    /// Categories without expense rows are left out.
    pub fn per_category_expense(txns: &[CategorizedTransaction]) -> Vec<CategoryTotal> {
        let mut sums: BTreeMap<Category, f64> = BTreeMap::new();
        for t in txns.iter().filter(|t| t.transaction.is_expense()) {
            *sums.entry(t.category).or_insert(0.0) += t.transaction.abs_amount();
        }

        sums.into_iter()
            .map(|(category, amount)| CategoryTotal { category, amount })
            .collect()
    }

    /// Largest expense category. Ties go to the category declared first;
    /// `None` when there are no expenses.
    pub fn top_category(per_category: &[CategoryTotal]) -> Option<CategoryTotal> {
        per_category.iter().copied().fold(None, |best, cur| match best {
            Some(b) if b.amount > cur.amount => Some(b),
            Some(b) if b.amount == cur.amount && b.category.rank() < cur.category.rank() => {
                Some(b)
            }
            _ => Some(cur),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finia_core::{categorize_transaction, Transaction};

    fn txns(rows: &[(&str, f64)]) -> Vec<CategorizedTransaction> {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        rows.iter()
            .map(|(d, a)| categorize_transaction(Transaction::new(date, *d, *a)))
            .collect()
    }

    #[test]
    fn test_totals_split_by_sign() {
        let t = Aggregator::totals(&txns(&[
            ("Sueldo", 1000.0),
            ("Uber", -200.0),
            ("Ajuste", 0.0),
            ("Farmacia", -50.0),
        ]));
        assert_eq!(t.total_income, 1000.0);
        assert_eq!(t.total_expense, -250.0);
        assert_eq!(t.balance, 750.0);
        assert_eq!(t.suggested_savings, 0.15 * 250.0);
    }

    #[test]
    fn test_huge_amounts_overflow_totals() {
        let t = Aggregator::totals(&txns(&[("Sueldo", 1e308), ("Bono", 1e308), ("Uber", -1.0)]));
        assert_eq!(t.overflowed_field(), Some("total_income"));

        let t = Aggregator::totals(&txns(&[("Sueldo", 1e308), ("Uber", -1e308)]));
        assert_eq!(t.overflowed_field(), None);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let t = Aggregator::totals(&[]);
        assert_eq!(t.total_income, 0.0);
        assert_eq!(t.total_expense, 0.0);
        assert_eq!(t.balance, 0.0);
        assert_eq!(t.suggested_savings, 0.0);
        assert!(t.per_category_expense.is_empty());
        assert_eq!(Aggregator::top_category(&t.per_category_expense), None);
    }

    #[test]
    fn test_income_only_has_no_categories() {
        let t = Aggregator::totals(&txns(&[("Sueldo", 1000.0), ("Reintegro farmacia", 30.0)]));
        assert!(t.per_category_expense.is_empty());
    }

    #[test]
    fn test_per_category_declared_order() {
        let per = Aggregator::per_category_expense(&txns(&[
            ("Expensas", -10.0),
            ("Uber", -5.0),
            ("Jumbo", -1.0),
            ("Uber", -5.0),
        ]));
        let cats: Vec<_> = per.iter().map(|c| c.category).collect();
        assert_eq!(cats, [Category::Groceries, Category::Transport, Category::Home]);
        assert_eq!(per[1].amount, 10.0);
    }

    #[test]
    fn test_top_category_tie_goes_to_declared_first() {
        let per = vec![
            CategoryTotal { category: Category::Transport, amount: 100.0 },
            CategoryTotal { category: Category::Health, amount: 100.0 },
            CategoryTotal { category: Category::Home, amount: 50.0 },
        ];
        let top = Aggregator::top_category(&per).unwrap();
        assert_eq!(top.category, Category::Transport);

        let reversed: Vec<_> = per.iter().rev().copied().collect();
        assert_eq!(Aggregator::top_category(&reversed).unwrap().category, Category::Transport);
    }
}
