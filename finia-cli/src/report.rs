//! Plain-text rendering of an analysis for stdout.

use finia_core::fmt::{money, number, signed_number};
use finia_core::format_iso_date;
use finia_finance::{pie_slices, template_transactions, Analysis, CHART_TITLE};

const BAR_WIDTH: usize = 30;

pub const UPLOAD_HINT: &str = "👆 Pasá un CSV con --csv <archivo> para comenzar el análisis";

fn metric(label: &str, value: String) -> String {
    format!("{label:<24}{value}")
}

fn metric_lines(analysis: &Analysis) -> Vec<String> {
    let r = &analysis.result;
    vec![
        metric("Ingresos", money(r.total_income)),
        metric("Gastos", money(r.expense_magnitude())),
        metric(
            "Balance",
            format!("{} ({})", money(r.balance), signed_number(r.balance)),
        ),
        metric("Ahorro sugerido (15%)", money(r.suggested_savings)),
    ]
}

fn distribution_lines(analysis: &Analysis) -> Vec<String> {
    if !analysis.result.has_expenses() {
        return vec!["(sin gastos para graficar)".to_string()];
    }

    let slices = pie_slices(&analysis.result.per_category_expense);
    let name_width = slices
        .iter()
        .map(|s| s.category.label().chars().count())
        .max()
        .unwrap_or(10);
    let amount_width = slices.iter().map(|s| number(s.amount).len()).max().unwrap_or(1) + 1;

    slices
        .iter()
        .map(|s| {
            let filled = (s.share * BAR_WIDTH as f64).round() as usize;
            format!(
                "{:<name_width$}  {:>amount_width$}  {:>5.1}%  {}",
                s.category.label(),
                money(s.amount),
                s.percent(),
                "█".repeat(filled.max(1)),
            )
        })
        .collect()
}

/// Full text report for one analysis.
pub fn render_report(analysis: &Analysis) -> String {
    let mut lines = vec![
        format!("Columnas detectadas: {:?}", analysis.detected_columns),
        String::new(),
    ];

    lines.extend(metric_lines(analysis));

    lines.push(String::new());
    lines.push(CHART_TITLE.to_string());
    lines.extend(distribution_lines(analysis));

    lines.push(String::new());
    lines.push("💡 Recomendación de FinIA".to_string());
    lines.push(analysis.result.recommendation.clone());

    let dropped = analysis.table.dropped;
    if !dropped.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Aviso: se descartaron {} filas ({} con fecha inválida, {} con monto inválido).",
            dropped.total(),
            dropped.bad_date,
            dropped.bad_amount
        ));
    }

    lines.join("\n") + "\n"
}

/// Shown when no file was given: the hint plus the example statement.
pub fn render_no_file() -> String {
    let mut lines = vec![
        UPLOAD_HINT.to_string(),
        String::new(),
        "Ejemplo de CSV que podés usar para probar:".to_string(),
        format!("{:<12}{:<20}{:>10}", "fecha", "descripcion", "monto"),
    ];
    lines.extend(template_transactions().into_iter().map(|t| {
        format!(
            "{:<12}{:<20}{:>10}",
            format_iso_date(t.date),
            t.description,
            t.amount
        )
    }));
    lines.push(String::new());
    lines.push("Guardalo con: finia template".to_string());

    lines.join("\n") + "\n"
}
