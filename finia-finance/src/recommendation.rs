//! Canned advice derived from the largest expense category.

use finia_core::fmt::money;
use finia_core::{Category, CategoryTotal};

/// Reduction proposed when entertainment is the top expense
pub const ENTERTAINMENT_REDUCTION: f64 = 0.20;

const NO_EXPENSES: &str =
    "No encontramos gastos en este archivo, así que por ahora no hay nada que recortar.";

const REVIEW_UNCATEGORIZED: &str =
    "Tienes muchos gastos sin categoría clara. ¡Sería genial revisarlos uno por uno para optimizar!";

/// Savings if the top category were cut by the entertainment reduction.
pub fn proposed_savings(top: &CategoryTotal) -> f64 {
    top.amount * ENTERTAINMENT_REDUCTION
}

/// Build the single recommendation sentence.
pub fn recommend(top: Option<&CategoryTotal>) -> String {
    let Some(top) = top else {
        return NO_EXPENSES.to_string();
    };

    match top.category {
        Category::Other => REVIEW_UNCATEGORIZED.to_string(),
        Category::Entertainment => format!(
            "Veo que {} es tu mayor gasto ({}). ¿Probamos reducir un 20% este mes? Podrías ahorrar {}.",
            top.category,
            money(top.amount),
            money(proposed_savings(top))
        ),
        _ => format!(
            "Tu mayor gasto es en {} ({}). Reducirlo un poco podría acercarte más rápido a tu meta de riqueza.",
            top.category,
            money(top.amount)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(category: Category, amount: f64) -> CategoryTotal {
        CategoryTotal { category, amount }
    }

    #[test]
    fn test_entertainment_proposes_twenty_percent() {
        let t = top(Category::Entertainment, 8998.0);
        assert!((proposed_savings(&t) - 1799.6).abs() < 1e-9);
        assert_eq!(
            recommend(Some(&t)),
            "Veo que Entretenimiento es tu mayor gasto ($8,998). ¿Probamos reducir un 20% este mes? Podrías ahorrar $1,800."
        );
    }

    #[test]
    fn test_other_asks_for_review() {
        let msg = recommend(Some(&top(Category::Other, 123456.0)));
        assert_eq!(msg, REVIEW_UNCATEGORIZED);
        assert!(!msg.contains("123"));
    }

    #[test]
    fn test_generic_category() {
        let msg = recommend(Some(&top(Category::Groceries, 15000.0)));
        assert_eq!(
            msg,
            "Tu mayor gasto es en Supermercado ($15,000). Reducirlo un poco podría acercarte más rápido a tu meta de riqueza."
        );
    }

    #[test]
    fn test_no_expenses_is_neutral() {
        assert_eq!(recommend(None), NO_EXPENSES);
    }
}
