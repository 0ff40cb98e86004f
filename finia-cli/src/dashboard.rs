use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use finia_core::fmt::{money, signed_number};
use finia_core::format_iso_date;
use finia_finance::pie::{angle_of, slice_at};
use finia_finance::{
    pie_slices, save_enriched_csv, save_template_csv, template_transactions, Analysis, PieSlice,
    CHART_TITLE,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Cell, Paragraph, Row, Table, Wrap,
    },
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info};

use crate::chart::save_pie_svg;
use crate::config::ExportSection;
use crate::report::UPLOAD_HINT;

/// Sampling step for filling the pie, in canvas units
const PIE_STEP: f64 = 0.015;
/// Canvas margin around the unit circle
const PIE_PAD: f64 = 1.1;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

struct DashboardApp<'a> {
    analysis: Option<&'a Analysis>,
    slices: Vec<PieSlice>,
    /// Canvas points of the filled disc, grouped by slice
    pie_points: Vec<Vec<(f64, f64)>>,
    export: &'a ExportSection,
    status: String,
}

impl<'a> DashboardApp<'a> {
    fn new(analysis: Option<&'a Analysis>, export: &'a ExportSection) -> Self {
        let slices = analysis
            .map(|a| pie_slices(&a.result.per_category_expense))
            .unwrap_or_default();
        let pie_points = fill_pie(&slices, PIE_STEP);
        Self {
            analysis,
            slices,
            pie_points,
            export,
            status: String::new(),
        }
    }

    fn export_analysis(&mut self) {
        let Some(analysis) = self.analysis else {
            return;
        };
        let path = self.export.analysis_path();
        self.status = match save_enriched_csv(analysis, &path) {
            Ok(()) => {
                info!(path = %path.display(), "exported analysis");
                format!("Análisis guardado en {}", path.display())
            }
            Err(e) => {
                error!("export failed: {e:#}");
                format!("No se pudo guardar: {e:#}")
            }
        };
    }

    fn export_chart(&mut self) {
        if self.slices.is_empty() {
            self.status = "No hay gastos para graficar".to_string();
            return;
        }
        let path = self.export.chart_path();
        self.status = match save_pie_svg(&self.slices, CHART_TITLE, &path) {
            Ok(()) => {
                info!(path = %path.display(), "wrote chart");
                format!("Gráfico guardado en {}", path.display())
            }
            Err(e) => {
                error!("chart failed: {e:#}");
                format!("No se pudo guardar el gráfico: {e:#}")
            }
        };
    }

    fn export_template(&mut self) {
        let path = self.export.template_path();
        self.status = match save_template_csv(&path) {
            Ok(()) => format!("Plantilla guardada en {}", path.display()),
            Err(e) => {
                error!("template failed: {e:#}");
                format!("No se pudo guardar la plantilla: {e:#}")
            }
        };
    }

    /// Returns false when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('e') if self.analysis.is_some() => self.export_analysis(),
            KeyCode::Char('c') if self.analysis.is_some() => self.export_chart(),
            KeyCode::Char('t') if self.analysis.is_none() => self.export_template(),
            _ => {}
        }
        true
    }
}

/// Sample the unit disc on a grid and bucket each point by slice.
fn fill_pie(slices: &[PieSlice], step: f64) -> Vec<Vec<(f64, f64)>> {
    let mut buckets = vec![Vec::new(); slices.len()];
    if slices.is_empty() {
        return buckets;
    }

    let n = (2.0 / step).ceil() as i64;
    for i in 0..=n {
        let x = -1.0 + i as f64 * step;
        for j in 0..=n {
            let y = -1.0 + j as f64 * step;
            if x * x + y * y > 1.0 {
                continue;
            }
            let angle = angle_of(x, y);
            if let Some(idx) = slice_at(slices, angle)
                .and_then(|s| slices.iter().position(|o| o.category == s.category))
            {
                buckets[idx].push((x, y));
            }
        }
    }
    buckets
}

/// Canvas bounds that keep the pie round. Terminal cells are about twice
/// as tall as they are wide.
fn pie_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    let w = f64::from(width.max(1));
    let h = f64::from(height.max(1));
    let aspect = w / (2.0 * h);
    if aspect >= 1.0 {
        ([-PIE_PAD * aspect, PIE_PAD * aspect], [-PIE_PAD, PIE_PAD])
    } else {
        ([-PIE_PAD, PIE_PAD], [-PIE_PAD / aspect, PIE_PAD / aspect])
    }
}

fn slice_color(slice: &PieSlice) -> Color {
    let (r, g, b) = slice.color;
    Color::Rgb(r, g, b)
}

pub fn run_dashboard(analysis: Option<&Analysis>, export: &ExportSection) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = DashboardApp::new(analysis, export);
    let res = dashboard_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut DashboardApp<'_>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &DashboardApp<'_>) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(size);

    let header = Paragraph::new(Text::from(vec![
        Line::from(Span::styled("🧠 FinIA Advisor", HEADER_STYLE)),
        Line::from(Span::styled(
            "Tu asesor financiero personal - Versión Prototipo",
            FOOTER_STYLE,
        )),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    match app.analysis {
        Some(analysis) => draw_analysis(f, chunks[1], app, analysis),
        None => draw_no_file(f, chunks[1]),
    }

    let keys = if app.analysis.is_some() {
        "e: exportar CSV · c: guardar gráfico SVG · q: salir"
    } else {
        "t: guardar plantilla CSV · q: salir"
    };
    let footer = if app.status.is_empty() {
        keys.to_string()
    } else {
        format!("{} · {}", app.status, keys)
    };
    f.render_widget(Paragraph::new(Span::styled(footer, FOOTER_STYLE)), chunks[2]);
}

fn metric_card(title: &str, value: String, delta: Option<f64>) -> Paragraph<'static> {
    let mut lines = vec![Line::from(Span::styled(
        value,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(d) = delta {
        let color = if d < 0.0 { Color::Red } else { Color::Green };
        lines.push(Line::from(Span::styled(
            signed_number(d),
            Style::default().fg(color),
        )));
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
}

fn draw_analysis(f: &mut Frame, area: Rect, app: &DashboardApp<'_>, analysis: &Analysis) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(5),
        ])
        .split(area);

    let columns = Paragraph::new(analysis.detected_columns.join(", "))
        .block(Block::default().borders(Borders::ALL).title("Columnas detectadas"));
    f.render_widget(columns, rows[0]);

    let r = &analysis.result;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);
    f.render_widget(metric_card("Ingresos", money(r.total_income), None), cards[0]);
    f.render_widget(metric_card("Gastos", money(r.expense_magnitude()), None), cards[1]);
    f.render_widget(metric_card("Balance", money(r.balance), Some(r.balance)), cards[2]);
    f.render_widget(
        metric_card("Ahorro sugerido (15%)", money(r.suggested_savings), None),
        cards[3],
    );

    draw_pie(f, rows[2], app);

    let mut advice = vec![Line::from(r.recommendation.clone())];
    let dropped = analysis.table.dropped;
    if !dropped.is_empty() {
        advice.push(Line::from(Span::styled(
            format!("Se descartaron {} filas con fecha o monto inválido.", dropped.total()),
            FOOTER_STYLE,
        )));
    }
    let recommendation = Paragraph::new(advice)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("💡 Recomendación de FinIA"),
        );
    f.render_widget(recommendation, rows[3]);
}

fn draw_pie(f: &mut Frame, area: Rect, app: &DashboardApp<'_>) {
    let block = Block::default().borders(Borders::ALL).title(CHART_TITLE);

    if app.slices.is_empty() {
        let empty = Paragraph::new("Sin gastos para graficar")
            .alignment(Alignment::Center)
            .style(FOOTER_STYLE)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let (x_bounds, y_bounds) = pie_bounds(halves[0].width, halves[0].height);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for (slice, coords) in app.slices.iter().zip(&app.pie_points) {
                ctx.draw(&Points {
                    coords,
                    color: slice_color(slice),
                });
            }
        });
    f.render_widget(canvas, halves[0]);

    let legend_rows: Vec<Row> = app
        .slices
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(Span::styled("██", Style::default().fg(slice_color(s)))),
                Cell::from(s.category.label()),
                Cell::from(money(s.amount)),
                Cell::from(format!("{:.1}%", s.percent())),
            ])
        })
        .collect();
    let legend = Table::new(
        legend_rows,
        [
            Constraint::Length(3),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(7),
        ],
    );
    f.render_widget(legend, halves[1]);
}

fn draw_no_file(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    let hint = Paragraph::new(UPLOAD_HINT)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(hint, rows[0]);

    let example_rows: Vec<Row> = template_transactions()
        .into_iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(format_iso_date(t.date)),
                Cell::from(t.description),
                Cell::from(t.amount.to_string()),
            ])
        })
        .collect();
    let table = Table::new(
        example_rows,
        [
            Constraint::Length(12),
            Constraint::Length(20),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(vec!["fecha", "descripcion", "monto"]).style(HEADER_STYLE))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Ejemplo de CSV que podés usar para probar"),
    );
    f.render_widget(table, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use finia_core::{Category, CategoryTotal};

    fn slices() -> Vec<PieSlice> {
        pie_slices(&[
            CategoryTotal { category: Category::Groceries, amount: 30.0 },
            CategoryTotal { category: Category::Home, amount: 10.0 },
        ])
    }

    #[test]
    fn test_fill_pie_buckets_follow_shares() {
        let s = slices();
        let buckets = fill_pie(&s, 0.02);
        assert_eq!(buckets.len(), 2);
        let total = (buckets[0].len() + buckets[1].len()) as f64;
        let share = buckets[0].len() as f64 / total;
        assert!((share - 0.75).abs() < 0.02, "share was {share}");
        assert!(buckets.iter().flatten().all(|(x, y)| x * x + y * y <= 1.0));
    }

    #[test]
    fn test_fill_pie_empty() {
        assert!(fill_pie(&[], 0.02).is_empty());
    }

    #[test]
    fn test_pie_bounds_keep_circle_inside() {
        let (x, y) = pie_bounds(80, 20);
        assert_eq!(y, [-PIE_PAD, PIE_PAD]);
        assert!((x[1] - PIE_PAD * 2.0).abs() < 1e-12);

        let (x, y) = pie_bounds(20, 20);
        assert_eq!(x, [-PIE_PAD, PIE_PAD]);
        assert!((y[1] - PIE_PAD * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_keys() {
        let export = ExportSection::default();
        let mut app = DashboardApp::new(None, &export);
        assert!(app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char('e')));
        assert!(app.status.is_empty());
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert!(!app.handle_key(KeyCode::Esc));
    }
}
