use super::{PRIMARY, PlotError, SECONDARY, ordered};
use crate::core::stats::{LinearFit, fit_through_origin, linspace};
use crate::engine::cab::{CabTable, Descriptor};
use plotters::coord::Shift;
use plotters::prelude::*;

/// The fit line is evaluated over this adhesion interval.
const FIT_SPAN: (f64, f64) = (-100.0, 0.0);
const LINE_POINTS: usize = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct CabPlotParams {
    pub title: Option<String>,
    /// Legend entry of the probe points.
    pub label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

/// Limits in the order given: descending limits run the axis backwards.
fn axis_limits(range: (f64, f64)) -> (f64, f64) {
    if (range.1 - range.0).abs() < f64::EPSILON {
        ordered(range)
    } else {
        range
    }
}

fn within(range: (f64, f64), value: f64) -> bool {
    (range.0.min(range.1)..=range.0.max(range.1)).contains(&value)
}

/// Points of `y = f(x)` over `span` that fall inside the chart.
fn clipped_line(
    span: (f64, f64),
    x_range: (f64, f64),
    y_range: (f64, f64),
    f: impl Fn(f64) -> f64,
) -> Vec<(f64, f64)> {
    linspace(span.0, span.1, LINE_POINTS)
        .into_iter()
        .map(|x| (x, f(x)))
        .filter(|(x, y)| within(x_range, *x) && within(y_range, *y))
        .collect()
}

/// Cohesion against adhesion per probe, with the through-origin fit and the
/// `y = x` balance line. Returns the fit drawn, if any.
pub fn draw_cab<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &CabTable,
    params: &CabPlotParams,
) -> Result<Option<LinearFit>, PlotError>
where
    DB::ErrorType: 'static,
{
    let labelled: Vec<(&str, (f64, f64))> = table
        .rows
        .iter()
        .filter_map(|row| Some((row.probe.as_str(), (row.adhesion.center?, row.cohesion.center?))))
        .collect();
    if labelled.is_empty() {
        return Err(PlotError::EmptySelection(
            "no probe has both adhesion and cohesion values".to_string(),
        ));
    }
    let points: Vec<(f64, f64)> = labelled.iter().map(|(_, p)| *p).collect();
    let fit = fit_through_origin(&points);

    let x_range = axis_limits(params.x_range);
    let y_range = axis_limits(params.y_range);
    let descriptor = match table.descriptor {
        Descriptor::Mean => "Mean",
        Descriptor::Median => "Median",
    };

    let mut chart = ChartBuilder::on(root)
        .caption(params.title.as_deref().unwrap_or(""), ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    chart
        .configure_mesh()
        .x_desc(format!("{} Adhesion, {} (mJ/m²)", descriptor, table.column))
        .y_desc(format!("{} Cohesion, {} (mJ/m²)", descriptor, table.column))
        .draw()?;

    let balance = clipped_line(FIT_SPAN, x_range, y_range, |x| x);
    chart
        .draw_series(LineSeries::new(balance, BLACK.mix(0.5).stroke_width(1)))?
        .label("Cohesion = Adhesion")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.5)));

    if let Some(fit) = fit {
        let line = clipped_line(FIT_SPAN, x_range, y_range, |x| fit.predict(x));
        chart
            .draw_series(LineSeries::new(line, SECONDARY.stroke_width(2)))?
            .label(format!(
                "Gradient {:.2}, R² {:.2}",
                fit.slope, fit.r_squared
            ))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SECONDARY.stroke_width(2)));
    }

    let visible: Vec<&(&str, (f64, f64))> = labelled
        .iter()
        .filter(|(_, (x, y))| within(x_range, *x) && within(y_range, *y))
        .collect();
    chart
        .draw_series(
            visible
                .iter()
                .map(|(_, point)| Circle::new(*point, 5, PRIMARY.filled())),
        )?
        .label(params.label.as_str())
        .legend(|(x, y)| Circle::new((x + 10, y), 5, PRIMARY.filled()));
    chart.draw_series(visible.iter().map(|(probe, (x, y))| {
        Text::new(probe.to_string(), (*x, *y), ("sans-serif", 13).into_font())
    }))?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(fit)
}
