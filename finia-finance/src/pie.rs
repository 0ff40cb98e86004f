//! Pie chart geometry shared by the terminal and SVG renderers.
//!
//! Angles are in radians, measured clockwise from 12 o'clock.

use finia_core::{Category, CategoryTotal};
use serde::Serialize;
use std::f64::consts::TAU;

/// Sequential blues, darkest first
pub const PALETTE: [(u8, u8, u8); 7] = [
    (8, 48, 107),
    (8, 81, 156),
    (33, 113, 181),
    (66, 146, 198),
    (107, 174, 214),
    (158, 202, 225),
    (198, 219, 239),
];

pub const CHART_TITLE: &str = "Distribución de Gastos por Categoría";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PieSlice {
    pub category: Category,
    pub amount: f64,
    /// Fraction of the whole, 0..=1
    pub share: f64,
    pub start: f64,
    pub end: f64,
    pub color: (u8, u8, u8),
}

impl PieSlice {
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.start && angle < self.end
    }

    pub fn percent(&self) -> f64 {
        self.share * 100.0
    }
}

/// Slices ordered largest first; equal amounts keep declared category order.
/// Returns an empty list when there is nothing to draw.
pub fn pie_slices(per_category: &[CategoryTotal]) -> Vec<PieSlice> {
    let total: f64 = per_category.iter().map(|c| c.amount).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut sorted: Vec<CategoryTotal> = per_category.to_vec();
    sorted.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then(a.category.rank().cmp(&b.category.rank()))
    });

    let mut start = 0.0;
    let last = sorted.len().saturating_sub(1);
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let share = c.amount / total;
            // Close the circle exactly on the last slice.
            let end = if i == last { TAU } else { start + share * TAU };
            let slice = PieSlice {
                category: c.category,
                amount: c.amount,
                share,
                start,
                end,
                color: PALETTE[i % PALETTE.len()],
            };
            start = end;
            slice
        })
        .collect()
}

/// Clockwise angle from 12 o'clock for a point relative to the centre,
/// with y pointing up.
pub fn angle_of(x: f64, y: f64) -> f64 {
    x.atan2(y).rem_euclid(TAU)
}

/// Slice covering a given angle.
pub fn slice_at(slices: &[PieSlice], angle: f64) -> Option<&PieSlice> {
    let angle = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    slices
        .iter()
        .find(|s| s.contains_angle(angle))
        .or_else(|| slices.last())
}

/// Point on a circle of `radius` at `angle`, y pointing up.
pub fn point_at(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}
