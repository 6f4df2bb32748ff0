use super::{PlotError, category_label, min_max};
use crate::core::models::energy::EnergyColumn;
use crate::core::models::record::InteractionRecord;
use crate::core::stats::{GaussianKde, histogram};
use crate::engine::dataset::InteractionDataset;
use plotters::coord::Shift;
use plotters::prelude::*;

const ROTATION_TOLERANCE: f64 = 1e-9;
const COLOR_BAR_STEPS: usize = 100;

/// Anchors of the reversed red-blue diverging map, low to high.
const DIVERGING: [(u8, u8, u8); 7] = [
    (5, 48, 97),
    (67, 147, 195),
    (209, 229, 240),
    (247, 247, 247),
    (253, 219, 199),
    (214, 96, 77),
    (103, 0, 31),
];

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapParams {
    pub column: EnergyColumn,
    pub facet: String,
    pub rotation: f64,
    pub title: Option<String>,
    pub bins: usize,
    pub bandwidth: f64,
}

/// Energies of one facet pair at one rotation, pivoted on the displacement
/// grid. `values[row][col]` is at `(xs[col], ys[row])`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub values: Vec<Vec<Option<f64>>>,
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

impl HeatmapGrid {
    pub fn from_records(
        records: &[InteractionRecord],
        facet: &str,
        rotation: f64,
        column: EnergyColumn,
    ) -> Result<Self, PlotError> {
        let cells: Vec<(f64, f64, f64)> = records
            .iter()
            .filter(|r| r.facet.label() == facet)
            .filter_map(|r| {
                let placement = r.placement?;
                if (placement.rotation - rotation).abs() > ROTATION_TOLERANCE {
                    return None;
                }
                Some((
                    placement.x_displacement,
                    placement.y_displacement,
                    r.energy(column)?,
                ))
            })
            .collect();
        if cells.is_empty() {
            return Err(PlotError::EmptySelection(format!(
                "no '{}' values for facet {} at rotation {}",
                column, facet, rotation
            )));
        }

        let xs = distinct_sorted(cells.iter().map(|c| c.0));
        let ys = distinct_sorted(cells.iter().map(|c| c.1));
        let mut values = vec![vec![None; xs.len()]; ys.len()];
        for (x, y, value) in cells {
            let col = xs.partition_point(|v| *v < x);
            let row = ys.partition_point(|v| *v < y);
            let cell = &mut values[row][col];
            if cell.is_some() {
                return Err(PlotError::DuplicateGridPoint { x, y, rotation });
            }
            *cell = Some(value);
        }
        Ok(Self { xs, ys, values })
    }

    pub fn cell_values(&self) -> Vec<f64> {
        self.values.iter().flatten().flatten().copied().collect()
    }
}

/// Colour for `t` in `[0, 1]` along the diverging map.
pub fn diverging_color(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let scaled = t * (DIVERGING.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(DIVERGING.len() - 2);
    let fraction = scaled - index as f64;
    let (a, b) = (DIVERGING[index], DIVERGING[index + 1]);
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * fraction).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

fn normalize(value: f64, (low, high): (f64, f64)) -> f64 {
    if high > low {
        (value - low) / (high - low)
    } else {
        0.5
    }
}

/// Heatmap and colour bar on the left, value histogram with density on the right.
pub fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &InteractionDataset,
    params: &HeatmapParams,
) -> Result<HeatmapGrid, PlotError>
where
    DB::ErrorType: 'static,
{
    let grid = HeatmapGrid::from_records(
        dataset.records(),
        &params.facet,
        params.rotation,
        params.column,
    )?;
    let values = grid.cell_values();
    let (low, high) = min_max(&values).unwrap_or((0.0, 0.0));

    let title = params.title.clone().unwrap_or_else(|| {
        format!("{} - {} at {}°", params.facet, params.column, params.rotation)
    });
    let root = root.titled(&title, ("sans-serif", 22))?;
    let (width, _) = root.dim_in_pixel();
    let (map_area, side_area) = root.split_horizontally(width * 3 / 5);
    let (map_area, bar_area) = map_area.split_horizontally((width * 3 / 5).saturating_sub(90));

    draw_grid(&map_area, &grid, (low, high))?;
    draw_color_bar(&bar_area, (low, high))?;
    draw_value_panel(&side_area, &values, (low, high), params)?;
    Ok(grid)
}

fn draw_grid<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    grid: &HeatmapGrid,
    range: (f64, f64),
) -> Result<(), PlotError>
where
    DB::ErrorType: 'static,
{
    let x_labels: Vec<String> = grid.xs.iter().map(|x| format!("{}", x)).collect();
    let y_labels: Vec<String> = grid.ys.iter().map(|y| format!("{}", y)).collect();

    // Cell centres sit on integers so each tick lands on one grid column or row.
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            -0.5..grid.xs.len() as f64 - 0.5,
            -0.5..grid.ys.len() as f64 - 0.5,
        )?;

    let x_format = |v: &f64| category_label(&x_labels, *v);
    let y_format = |v: &f64| category_label(&y_labels, *v);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(grid.xs.len())
        .y_labels(grid.ys.len())
        .x_label_formatter(&x_format)
        .y_label_formatter(&y_format)
        .x_desc("X axis Displacement")
        .y_desc("Y axis Displacement")
        .draw()?;

    chart.draw_series(grid.values.iter().enumerate().flat_map(|(row, cells)| {
        cells.iter().enumerate().filter_map(move |(col, value)| {
            let value = (*value)?;
            let (x, y) = (col as f64, row as f64);
            Some(Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                diverging_color(normalize(value, range)).filled(),
            ))
        })
    }))?;
    Ok(())
}

fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    (low, high): (f64, f64),
) -> Result<(), PlotError>
where
    DB::ErrorType: 'static,
{
    let (low, high) = if high > low { (low, high) } else { (low - 1.0, high + 1.0) };
    let mut chart = ChartBuilder::on(area)
        .margin_top(10)
        .margin_bottom(60)
        .margin_right(10)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0..1.0, low..high)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_label_formatter(&|v: &f64| format!("{:.1}", v))
        .draw()?;

    let step = (high - low) / COLOR_BAR_STEPS as f64;
    chart.draw_series((0..COLOR_BAR_STEPS).map(|i| {
        let from = low + step * i as f64;
        Rectangle::new(
            [(0.0, from), (1.0, from + step)],
            diverging_color((i as f64 + 0.5) / COLOR_BAR_STEPS as f64).filled(),
        )
    }))?;
    Ok(())
}

fn draw_value_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    values: &[f64],
    (low, high): (f64, f64),
    params: &HeatmapParams,
) -> Result<(), PlotError>
where
    DB::ErrorType: 'static,
{
    let (low, high) = if high > low { (low, high) } else { (low - 1.0, high + 1.0) };
    let bins = histogram(values, low, high, params.bins.max(1));
    let total = values.len() as f64;
    let densities: Vec<(f64, f64, f64)> = bins
        .into_iter()
        .map(|(from, to, count)| (from, to, count as f64 / (total * (to - from))))
        .collect();
    let curve = GaussianKde::new(values, params.bandwidth)
        .map(|kde| kde.curve(low, high, 200))
        .unwrap_or_default();

    let peak = densities
        .iter()
        .map(|(_, _, d)| *d)
        .chain(curve.iter().map(|(_, d)| *d))
        .fold(0.0, f64::max);
    let top = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(low..high, 0.0..top)?;

    chart
        .configure_mesh()
        .x_desc(format!("{} (mJ/m²)", params.column))
        .y_desc("Density")
        .draw()?;

    chart.draw_series(densities.iter().map(|(from, to, density)| {
        let centre = normalize((from + to) / 2.0, (low, high));
        Rectangle::new(
            [(*from, 0.0), (*to, *density)],
            diverging_color(centre).mix(0.8).filled(),
        )
    }))?;
    if !curve.is_empty() {
        chart.draw_series(LineSeries::new(curve, BLACK.stroke_width(2)))?;
    }
    Ok(())
}
