use super::{PlotError, ordered};
use crate::core::models::energy::{EnergyColumn, EnergyComponent};
use crate::core::stats::{Description, GaussianKde, describe};
use crate::engine::dataset::InteractionDataset;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::warn;

const CURVE_POINTS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionParams {
    pub component: EnergyComponent,
    pub weighted: bool,
    pub x_range: (f64, f64),
    pub bandwidth: f64,
    pub title: Option<String>,
    /// Also return a descriptive statistics table per dataset.
    pub describe: bool,
}

impl DistributionParams {
    pub fn column(&self) -> EnergyColumn {
        EnergyColumn::normalized(self.component).with_weighting(self.weighted)
    }
}

/// Descriptive statistics of `column` per labelled dataset; datasets without
/// values are left out.
pub fn describe_datasets(
    datasets: &[(&str, &InteractionDataset)],
    column: EnergyColumn,
) -> Vec<(String, Description)> {
    datasets
        .iter()
        .filter_map(|(label, dataset)| {
            describe(&dataset.values(column)).map(|d| (label.to_string(), d))
        })
        .collect()
}

/// One density curve per labelled dataset over `params.x_range`.
pub fn draw_distribution<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    datasets: &[(&str, &InteractionDataset)],
    params: &DistributionParams,
) -> Result<Option<Vec<(String, Description)>>, PlotError>
where
    DB::ErrorType: 'static,
{
    let column = params.column();
    let (start, end) = ordered(params.x_range);

    let curves: Vec<(&str, Vec<(f64, f64)>)> = datasets
        .iter()
        .filter_map(|(label, dataset)| {
            match GaussianKde::new(&dataset.values(column), params.bandwidth) {
                Some(kde) => Some((*label, kde.curve(start, end, CURVE_POINTS))),
                None => {
                    warn!("Dataset '{}' has too few '{}' values for a density.", label, column);
                    None
                }
            }
        })
        .collect();
    if curves.is_empty() {
        return Err(PlotError::EmptySelection(format!(
            "no dataset has a density for '{}'",
            column
        )));
    }

    let peak = curves
        .iter()
        .flat_map(|(_, curve)| curve.iter().map(|(_, d)| *d))
        .fold(0.0, f64::max);
    let top = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(params.title.as_deref().unwrap_or(""), ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(start..end, 0.0..top)?;

    chart
        .configure_mesh()
        .x_desc(format!("{} (mJ/m²)", column))
        .y_desc("Density")
        .draw()?;

    for (index, (label, curve)) in curves.into_iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        chart
            .draw_series(LineSeries::new(curve, color.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(params.describe.then(|| describe_datasets(datasets, column)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::energy::{EnergyComponents, UNIT_CONVERSION};
    use crate::core::models::facet::FacetPair;
    use crate::core::models::record::InteractionRecord;

    fn dataset(totals: &[f64], probability: Option<f64>) -> InteractionDataset {
        let pair: FacetPair = "011/011".parse().unwrap();
        InteractionDataset::from_records(
            totals
                .iter()
                .map(|t| {
                    InteractionRecord::new(
                        pair.clone(),
                        EnergyComponents::new(*t, 0.0, 0.0, 0.0),
                        UNIT_CONVERSION,
                        probability,
                        None,
                    )
                })
                .collect(),
        )
    }

    fn params() -> DistributionParams {
        DistributionParams {
            component: EnergyComponent::Total,
            weighted: false,
            x_range: (-10.0, 0.0),
            bandwidth: 0.2,
            title: None,
            describe: true,
        }
    }

    fn render(
        datasets: &[(&str, &InteractionDataset)],
        params: &DistributionParams,
    ) -> Result<(String, Option<Vec<(String, Description)>>), PlotError> {
        let mut svg = String::new();
        let table = {
            let root = SVGBackend::with_string(&mut svg, (800, 500)).into_drawing_area();
            root.fill(&WHITE)?;
            let table = draw_distribution(&root, datasets, params)?;
            root.present()?;
            table
        };
        Ok((svg, table))
    }

    #[test]
    fn draws_one_curve_per_dataset_and_describes_them() {
        let api = dataset(&[-1.0, -2.0, -3.0, -4.0], Some(0.5));
        let excipient = dataset(&[-5.0, -6.0, -8.0], Some(0.5));

        let (svg, table) = render(&[("API", &api), ("Excipient", &excipient)], &params()).unwrap();

        assert!(svg.contains("API"));
        assert!(svg.contains("Excipient"));
        let table = table.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].0, "API");
        assert_eq!(table[0].1.count, 4);
        assert!((table[0].1.q25 - -3.25).abs() < 1e-12);
        assert!((table[1].1.median - -6.0).abs() < 1e-12);
    }

    #[test]
    fn describe_flag_controls_returned_table() {
        let api = dataset(&[-1.0, -2.0, -3.0], None);
        let params = DistributionParams {
            describe: false,
            ..params()
        };
        let (_, table) = render(&[("API", &api)], &params).unwrap();
        assert!(table.is_none());
    }

    #[test]
    fn weighted_selection_without_weights_is_empty() {
        let api = dataset(&[-1.0, -2.0, -3.0], None);
        let params = DistributionParams {
            weighted: true,
            ..params()
        };
        assert!(matches!(
            render(&[("API", &api)], &params),
            Err(PlotError::EmptySelection(_))
        ));
    }

    #[test]
    fn describe_datasets_skips_empty_selections() {
        let weighted = dataset(&[-1.0, -3.0], Some(0.5));
        let unweighted = dataset(&[-1.0], None);
        let table = describe_datasets(
            &[("w", &weighted), ("u", &unweighted)],
            EnergyColumn::weighted(EnergyComponent::Total),
        );
        assert_eq!(table.len(), 1);
        assert!((table[0].1.mean - -1.0).abs() < 1e-12);
        assert!((table[0].1.std.unwrap() - 0.5f64.sqrt()).abs() < 1e-12);
    }
}
