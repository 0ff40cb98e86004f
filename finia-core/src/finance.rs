//! Finance record types: transactions, categories and analysis results

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of total expense suggested as savings
pub const SUGGESTED_SAVINGS_RATE: f64 = 0.15;

/// A single bank movement, as read from a statement row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Date of the movement
    pub date: NaiveDate,
    /// Free-text description as it appeared in the file
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: f64,
}

impl Transaction {
    /// Create a new Transaction
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
        }
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Spending categories, in the order they are matched
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Supermercado")]
    Groceries,
    #[serde(rename = "Transporte")]
    Transport,
    #[serde(rename = "Entretenimiento")]
    Entertainment,
    #[serde(rename = "Suscripciones")]
    Subscriptions,
    #[serde(rename = "Salud")]
    Health,
    #[serde(rename = "Hogar")]
    Home,
    #[serde(rename = "Otros")]
    Other,
}

impl Category {
    /// Every category in declared order; `Other` is always last.
    pub const ALL: [Category; 7] = [
        Category::Groceries,
        Category::Transport,
        Category::Entertainment,
        Category::Subscriptions,
        Category::Health,
        Category::Home,
        Category::Other,
    ];

    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Groceries => "Supermercado",
            Category::Transport => "Transporte",
            Category::Entertainment => "Entretenimiento",
            Category::Subscriptions => "Suscripciones",
            Category::Health => "Salud",
            Category::Home => "Hogar",
            Category::Other => "Otros",
        }
    }

    /// Position in the declared order
    pub fn rank(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("unknown category: {s}"))
    }
}

/// A transaction with the category assigned by the keyword rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorizedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: Category,
}

/// Summed absolute expense for one category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// Everything derived from one uploaded statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub total_income: f64,
    /// Sum of negative amounts; stays negative
    pub total_expense: f64,
    pub balance: f64,
    pub suggested_savings: f64,
    /// Categories with at least one expense row, in declared order
    pub per_category_expense: Vec<CategoryTotal>,
    pub top_category: Option<CategoryTotal>,
    pub recommendation: String,
}

impl AnalysisResult {
    /// Magnitude of spending, as shown in the "Gastos" metric
    pub fn expense_magnitude(&self) -> f64 {
        self.total_expense.abs()
    }

    /// Expense total for a category, or 0 when it had no expense rows
    pub fn category_expense(&self, category: Category) -> f64 {
        self.per_category_expense
            .iter()
            .find(|t| t.category == category)
            .map(|t| t.amount)
            .unwrap_or(0.0)
    }

    /// True when no expense rows were present
    pub fn has_expenses(&self) -> bool {
        !self.per_category_expense.is_empty()
    }
}
