//! # Plots Module
//!
//! Stateless renderers for aggregated interaction data. Every renderer takes
//! its data and an explicit parameter struct and draws onto any `plotters`
//! drawing area; [`render_svg`] wraps one into an SVG file.
//!
//! - **Violin** ([`violin`]) - per-facet energy distributions, optionally split
//! - **Distribution** ([`distribution`]) - kernel density of one component per dataset
//! - **Heatmap** ([`heatmap`]) - energy over the displacement grid of one rotation
//! - **Cohesion/adhesion** ([`cab`]) - probe scatter with a through-origin fit

pub mod cab;
pub mod distribution;
pub mod heatmap;
pub mod violin;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SIZE: (u32, u32) = (1000, 700);

/// First two colours of the usual categorical palette.
pub(crate) const PRIMARY: RGBColor = RGBColor(31, 119, 180);
pub(crate) const SECONDARY: RGBColor = RGBColor(255, 127, 14);

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Drawing failed: {0}")]
    Drawing(String),

    #[error("Nothing to plot: {0}")]
    EmptySelection(String),

    #[error("Duplicate grid point (x = {x}, y = {y}) at rotation {rotation}")]
    DuplicateGridPoint { x: f64, y: f64, rotation: f64 },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(e.to_string())
    }
}

/// Charts are written as SVG; a `.png` path is redirected to `.svg`.
pub fn svg_path(path: &Path) -> PathBuf {
    if path.extension().map(|e| e == "png").unwrap_or(false) {
        path.with_extension("svg")
    } else {
        path.to_path_buf()
    }
}

/// Draws onto a white SVG canvas at `path` and returns the path written.
pub fn render_svg<F>(path: &Path, size: (u32, u32), draw: F) -> Result<PathBuf, PlotError>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<(), PlotError>,
{
    let svg_path = svg_path(path);
    let root = SVGBackend::new(&svg_path, size).into_drawing_area();
    root.fill(&WHITE)?;
    draw(&root)?;
    root.present()?;
    drop(root);
    Ok(svg_path)
}

/// Label of the category whose slot contains `value`.
pub(crate) fn category_label(labels: &[String], value: f64) -> String {
    let index = value.round();
    if index < 0.0 || (value - index).abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Sorted `(low, high)` of a range given in either order; a degenerate range
/// is widened by one unit on each side.
pub(crate) fn ordered(range: (f64, f64)) -> (f64, f64) {
    let (low, high) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    if (high - low).abs() < f64::EPSILON {
        (low - 1.0, high + 1.0)
    } else {
        (low, high)
    }
}

pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            }),
    )
}
