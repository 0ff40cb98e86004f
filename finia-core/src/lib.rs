//! finia-core: core types and utilities for the FinIA advisor

pub mod finance;
pub mod fmt;
pub mod time;

pub use finance::{
    AnalysisResult, CategorizedTransaction, Category, CategoryTotal, Transaction,
    SUGGESTED_SAVINGS_RATE,
};
pub use time::{format_iso_date, parse_flexible_date};

/// Keyword rules for categorizing transaction descriptions
pub mod categorizer {
    use super::{CategorizedTransaction, Category, Transaction};

    /// One entry of the rule table
    #[derive(Debug, Clone, Copy)]
    pub struct CategoryRule {
        pub category: Category,
        pub keywords: &'static [&'static str],
    }

    /// Rules in match order. The first rule with a keyword contained in the
    /// lower-cased description wins, so "netflix" and "spotify" always land
    /// in Entertainment even though Subscriptions lists them too.
    pub const CATEGORY_RULES: &[CategoryRule] = &[
        CategoryRule {
            category: Category::Groceries,
            keywords: &["supermercado", "mercado", "walmart", "coto", "carrefour", "dia", "jumbo"],
        },
        CategoryRule {
            category: Category::Transport,
            keywords: &["uber", "cabify", "subte", "colectivo", "nafta", "estacionamiento", "peaje"],
        },
        CategoryRule {
            category: Category::Entertainment,
            keywords: &[
                "netflix",
                "spotify",
                "cine",
                "bar",
                "restaurante",
                "delivery",
                "rappi",
                "pedidosya",
            ],
        },
        CategoryRule {
            category: Category::Subscriptions,
            keywords: &["netflix", "spotify", "disney", "amazon prime", "youtube premium"],
        },
        CategoryRule {
            category: Category::Health,
            keywords: &["farmacia", "medico", "obra social", "prepaga"],
        },
        CategoryRule {
            category: Category::Home,
            keywords: &["luz", "gas", "internet", "alquiler", "expensas"],
        },
        CategoryRule {
            category: Category::Other,
            keywords: &[],
        },
    ];

    /// Categorize a description by substring keyword match
    pub fn categorize(description: &str) -> Category {
        let desc = description.to_lowercase();

        CATEGORY_RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| desc.contains(kw)))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }

    /// Attach a category to a transaction
    pub fn categorize_transaction(transaction: Transaction) -> CategorizedTransaction {
        let category = categorize(&transaction.description);
        CategorizedTransaction {
            transaction,
            category,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_rules_follow_declared_order() {
            let order: Vec<_> = CATEGORY_RULES.iter().map(|r| r.category).collect();
            assert_eq!(order, Category::ALL);
            assert!(CATEGORY_RULES.last().unwrap().keywords.is_empty());
        }

        #[test]
        fn test_categorize_groceries() {
            assert_eq!(categorize("Supermercado Dia"), Category::Groceries);
            assert_eq!(categorize("COMPRA CARREFOUR EXPRESS"), Category::Groceries);
        }

        #[test]
        fn test_categorize_transport() {
            assert_eq!(categorize("Uber al trabajo"), Category::Transport);
            assert_eq!(categorize("Carga SUBE colectivo"), Category::Transport);
        }

        #[test]
        fn test_netflix_is_entertainment_not_subscription() {
            assert_eq!(categorize("Netflix mensual"), Category::Entertainment);
            assert_eq!(categorize("Spotify"), Category::Entertainment);
            assert_eq!(categorize("Netflix + Disney combo"), Category::Entertainment);
        }

        #[test]
        fn test_subscriptions_reachable_via_other_keywords() {
            assert_eq!(categorize("Disney Plus"), Category::Subscriptions);
            assert_eq!(categorize("Amazon Prime Video"), Category::Subscriptions);
        }

        #[test]
        fn test_category_order_beats_keyword_position() {
            // Entertainment keyword appears first in the text, but a
            // Groceries keyword is present too and Groceries is declared first.
            assert_eq!(categorize("Netflix pagado en Jumbo"), Category::Groceries);
            assert_eq!(categorize("Farmacia y nafta"), Category::Transport);
        }

        #[test]
        fn test_categorize_health_and_home() {
            assert_eq!(categorize("Farmacia del centro"), Category::Health);
            assert_eq!(categorize("Pago expensas octubre"), Category::Home);
        }

        #[test]
        fn test_unmatched_is_other() {
            assert_eq!(categorize("Sueldo enero"), Category::Other);
            assert_eq!(categorize(""), Category::Other);
        }

        #[test]
        fn test_categorize_transaction_keeps_fields() {
            let date = chrono::NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
            let ct = categorize_transaction(Transaction::new(date, "Uber al trabajo", -3200.0));
            assert_eq!(ct.category, Category::Transport);
            assert_eq!(ct.transaction.amount, -3200.0);
        }
    }
}

pub use categorizer::{categorize, categorize_transaction, CategoryRule, CATEGORY_RULES};
