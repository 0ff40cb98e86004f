//! SVG rendering of the category pie chart.

use anyhow::{Context, Result};
use finia_core::fmt::money;
use finia_finance::PieSlice;
use std::path::Path;
use svg::{
    node::element::{Circle, Path as SvgPath, Rectangle, Text},
    Document,
};

pub const DEFAULT_CHART_FILE: &str = "gastos_por_categoria.svg";

const WIDTH: f64 = 760.0;
const HEIGHT: f64 = 440.0;
const RADIUS: f64 = 160.0;
const CENTER: (f64, f64) = (200.0, 240.0);
const LEGEND_X: f64 = 420.0;
const LEGEND_Y: f64 = 120.0;
const LEGEND_ROW: f64 = 28.0;

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("rgb({r},{g},{b})")
}

/// Screen point for an angle on the pie rim (SVG y grows downward).
fn rim(angle: f64) -> (f64, f64) {
    let (dx, dy) = finia_finance::pie::point_at(angle, RADIUS);
    (CENTER.0 + dx, CENTER.1 - dy)
}

fn wedge(slice: &PieSlice) -> SvgPath {
    let (x1, y1) = rim(slice.start);
    let (x2, y2) = rim(slice.end);
    let large_arc = if slice.end - slice.start > std::f64::consts::PI { 1 } else { 0 };
    let d = format!(
        "M {cx} {cy} L {x1:.3} {y1:.3} A {r} {r} 0 {large_arc} 1 {x2:.3} {y2:.3} Z",
        cx = CENTER.0,
        cy = CENTER.1,
        r = RADIUS,
    );
    SvgPath::new()
        .set("d", d)
        .set("fill", rgb(slice.color))
        .set("stroke", "white")
        .set("stroke-width", 1.5)
}

fn label(x: f64, y: f64, size: f64, content: String) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-family", "sans-serif")
        .set("font-size", size)
        .add(svg::node::Text::new(content))
}

/// Build the chart document. An empty slice list still yields a titled page.
pub fn pie_document(slices: &[PieSlice], title: &str) -> Document {
    let mut doc = Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("width", WIDTH)
        .set("height", HEIGHT)
        .add(
            Rectangle::new()
                .set("width", WIDTH)
                .set("height", HEIGHT)
                .set("fill", "white"),
        )
        .add(label(20.0, 40.0, 22.0, title.to_string()));

    // A single category is a full disc; an arc from a point to itself draws nothing.
    if let [only] = slices {
        doc = doc.add(
            Circle::new()
                .set("cx", CENTER.0)
                .set("cy", CENTER.1)
                .set("r", RADIUS)
                .set("fill", rgb(only.color)),
        );
    } else {
        for slice in slices {
            doc = doc.add(wedge(slice));
        }
    }

    for (i, slice) in slices.iter().enumerate() {
        let y = LEGEND_Y + i as f64 * LEGEND_ROW;
        doc = doc
            .add(
                Rectangle::new()
                    .set("x", LEGEND_X)
                    .set("y", y - 14.0)
                    .set("width", 18.0)
                    .set("height", 18.0)
                    .set("fill", rgb(slice.color)),
            )
            .add(label(
                LEGEND_X + 28.0,
                y,
                16.0,
                format!("{} {:.1}% ({})", slice.category, slice.percent(), money(slice.amount)),
            ));
    }

    doc
}

/// Write the chart to disk.
pub fn save_pie_svg(slices: &[PieSlice], title: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let doc = pie_document(slices, title);
    svg::save(path, &doc).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use finia_core::{Category, CategoryTotal};
    use finia_finance::{pie_slices, CHART_TITLE};

    #[test]
    fn test_one_wedge_per_category() {
        let slices = pie_slices(&[
            CategoryTotal { category: Category::Groceries, amount: 15000.0 },
            CategoryTotal { category: Category::Transport, amount: 3200.0 },
            CategoryTotal { category: Category::Entertainment, amount: 8998.0 },
        ]);
        let out = pie_document(&slices, CHART_TITLE).to_string();
        assert_eq!(out.matches("<path").count(), 3);
        assert!(out.contains("Supermercado 55.2% ($15,000)"));
        assert!(out.contains(CHART_TITLE));
    }

    #[test]
    fn test_single_category_is_a_disc() {
        let slices = pie_slices(&[CategoryTotal { category: Category::Home, amount: 10.0 }]);
        let out = pie_document(&slices, CHART_TITLE).to_string();
        assert!(out.contains("<circle"));
        assert!(!out.contains("<path"));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CHART_FILE);
        let slices = pie_slices(&[CategoryTotal { category: Category::Health, amount: 1.0 }]);
        save_pie_svg(&slices, CHART_TITLE, &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
