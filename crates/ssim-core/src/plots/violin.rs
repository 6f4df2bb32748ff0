use super::{PRIMARY, PlotError, SECONDARY, category_label, ordered};
use crate::core::models::energy::{EnergyColumn, EnergyComponent};
use crate::core::stats::{self, GaussianKde};
use crate::engine::dataset::InteractionDataset;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Half the width of a category slot a violin may occupy.
const HALF_WIDTH: f64 = 0.4;
/// Density curves extend this many bandwidths past the extreme samples.
const CUT: f64 = 2.0;
const CURVE_POINTS: usize = 100;
const VALUE_LABELS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InnerMarker {
    #[default]
    None,
    Box,
    Quartiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FacetOrder {
    FirstSeen,
    /// Ascending mean total energy, weighted when the left column is.
    #[default]
    ByMean,
    Explicit(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViolinParams {
    pub left: EnergyColumn,
    /// Same as `left` for full violins; a different column splits each violin.
    pub right: EnergyColumn,
    pub facets: FacetOrder,
    pub value_range: (f64, f64),
    pub title: Option<String>,
    pub bandwidth: f64,
    pub inner: InnerMarker,
    pub orientation: Orientation,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
    Both,
}

struct Half {
    outline: Vec<(f64, f64)>,
    summary: Option<stats::Description>,
}

/// Outline of one violin half in (offset from slot centre, value) space.
fn half_violin(values: &[f64], bandwidth: f64, range: (f64, f64)) -> Option<Half> {
    let summary = stats::describe(values);
    let kde = GaussianKde::new(values, bandwidth)?;
    let (low, high) = kde.support(CUT);
    let (low, high) = (low.max(range.0), high.min(range.1));
    if low >= high {
        return None;
    }
    let curve = kde.curve(low, high, CURVE_POINTS);
    let peak = curve.iter().map(|(_, d)| *d).fold(0.0, f64::max);
    if peak <= 0.0 {
        return None;
    }
    Some(Half {
        outline: curve
            .into_iter()
            .map(|(value, density)| (density / peak * HALF_WIDTH, value))
            .collect(),
        summary,
    })
}

fn polygon(centre: f64, half: &Half, side: Side) -> Vec<(f64, f64)> {
    let right = half.outline.iter().map(|(w, v)| (centre + w, *v));
    let left = half.outline.iter().rev().map(|(w, v)| (centre - w, *v));
    match side {
        Side::Right => std::iter::once((centre, half.outline[0].1))
            .chain(right)
            .chain(std::iter::once((centre, half.outline[half.outline.len() - 1].1)))
            .collect(),
        Side::Left => std::iter::once((centre, half.outline[half.outline.len() - 1].1))
            .chain(left)
            .chain(std::iter::once((centre, half.outline[0].1)))
            .collect(),
        Side::Both => right.chain(left).collect(),
    }
}

/// Segments in (category, value) space for the inner marker of one half.
fn inner_segments(
    centre: f64,
    summary: &stats::Description,
    marker: InnerMarker,
    side: Side,
    range: (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    let clamp = |v: f64| v.clamp(range.0, range.1);
    let (from, to) = match side {
        Side::Left => (centre - HALF_WIDTH / 2.0, centre),
        Side::Right => (centre, centre + HALF_WIDTH / 2.0),
        Side::Both => (centre - HALF_WIDTH / 4.0, centre + HALF_WIDTH / 4.0),
    };
    match marker {
        InnerMarker::None => Vec::new(),
        InnerMarker::Quartiles => [summary.q25, summary.median, summary.q75]
            .into_iter()
            .map(|q| vec![(from, clamp(q)), (to, clamp(q))])
            .collect(),
        InnerMarker::Box => {
            let mid = (from + to) / 2.0;
            vec![
                vec![(mid, clamp(summary.min)), (mid, clamp(summary.max))],
                vec![
                    (from, clamp(summary.q25)),
                    (to, clamp(summary.q25)),
                    (to, clamp(summary.q75)),
                    (from, clamp(summary.q75)),
                    (from, clamp(summary.q25)),
                ],
                vec![(from, clamp(summary.median)), (to, clamp(summary.median))],
            ]
        }
    }
}

fn resolve_facets(dataset: &InteractionDataset, params: &ViolinParams) -> Vec<String> {
    match &params.facets {
        FacetOrder::FirstSeen => dataset.facet_labels(),
        FacetOrder::ByMean => dataset.facets_by_mean(
            EnergyColumn::normalized(EnergyComponent::Total).with_weighting(params.left.weighted),
        ),
        FacetOrder::Explicit(labels) => labels.clone(),
    }
}

pub fn draw_violin<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &InteractionDataset,
    params: &ViolinParams,
) -> Result<(), PlotError>
where
    DB::ErrorType: 'static,
{
    let facets = resolve_facets(dataset, params);
    let range = ordered(params.value_range);
    let split = params.left != params.right;
    let columns: Vec<(EnergyColumn, Side, RGBColor)> = if split {
        vec![
            (params.left, Side::Left, PRIMARY),
            (params.right, Side::Right, SECONDARY),
        ]
    } else {
        vec![(params.left, Side::Both, PRIMARY)]
    };

    let mut shapes: Vec<Vec<Vec<(f64, f64)>>> = vec![Vec::new(); columns.len()];
    let mut markers: Vec<Vec<(f64, f64)>> = Vec::new();
    for (i, label) in facets.iter().enumerate() {
        let centre = i as f64;
        for (slot, (column, side, _)) in columns.iter().enumerate() {
            let values = dataset.values_for_facet(*column, label);
            let Some(half) = half_violin(&values, params.bandwidth, range) else {
                debug!("No density for {} in column '{}'.", label, column);
                continue;
            };
            shapes[slot].push(polygon(centre, &half, *side));
            if let Some(summary) = &half.summary {
                markers.extend(inner_segments(centre, summary, params.inner, *side, range));
            }
        }
    }
    if shapes.iter().all(Vec::is_empty) {
        return Err(PlotError::EmptySelection(format!(
            "no facet has enough '{}' values for a violin",
            params.left
        )));
    }

    let orientation = params.orientation;
    let place = move |(category, value): (f64, f64)| match orientation {
        Orientation::Vertical => (category, value),
        Orientation::Horizontal => (value, category),
    };

    // Slot centres sit on integers, so asking for one label per facet puts
    // every tick on a slot centre.
    let category_axis = -0.5..facets.len() as f64 - 0.5;
    let value_axis = range.0..range.1;
    let (x_axis, y_axis) = match orientation {
        Orientation::Vertical => (category_axis, value_axis),
        Orientation::Horizontal => (value_axis, category_axis),
    };
    let (x_labels, y_labels) = match orientation {
        Orientation::Vertical => (facets.len(), VALUE_LABELS),
        Orientation::Horizontal => (VALUE_LABELS, facets.len()),
    };

    let value_desc = if split {
        "Energy (mJ/m²)".to_string()
    } else {
        format!("{} (mJ/m²)", params.left)
    };
    let category_format = |v: &f64| category_label(&facets, *v);
    let value_format = |v: &f64| format!("{:.1}", v);
    let category_format: &dyn Fn(&f64) -> String = &category_format;
    let value_format: &dyn Fn(&f64) -> String = &value_format;
    let (x_format, y_format, x_desc, y_desc) = match orientation {
        Orientation::Vertical => (category_format, value_format, "Facets", value_desc.as_str()),
        Orientation::Horizontal => (value_format, category_format, value_desc.as_str(), "Facets"),
    };

    let mut chart = ChartBuilder::on(root)
        .caption(params.title.as_deref().unwrap_or(""), ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_axis, y_axis)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(x_labels)
        .y_labels(y_labels)
        .x_label_formatter(x_format)
        .y_label_formatter(y_format)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    for ((column, _, color), polygons) in columns.iter().zip(&shapes) {
        let color = *color;
        let series = chart.draw_series(polygons.iter().map(|outline| {
            Polygon::new(
                outline.iter().copied().map(place).collect::<Vec<_>>(),
                color.mix(0.7).filled(),
            )
        }))?;
        if split {
            series
                .label(column.to_string())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                });
        }
    }

    chart.draw_series(markers.into_iter().map(|segment| {
        PathElement::new(
            segment.into_iter().map(place).collect::<Vec<_>>(),
            BLACK.stroke_width(1),
        )
    }))?;

    if split {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::LowerRight)
            .draw()?;
    }
    Ok(())
}
