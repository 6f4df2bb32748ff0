use crate::core::stats::{LinearFit, fit_through_origin};
use crate::engine::cab::{CabOptions, CabTable, extract};
use crate::engine::dataset::InteractionDataset;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct CabResult {
    pub table: CabTable,
    /// Through-origin fit of cohesion against adhesion; `None` when no probe
    /// has both values.
    pub fit: Option<LinearFit>,
}

#[instrument(skip_all, name = "cab_workflow")]
pub fn run(
    probe: &InteractionDataset,
    excipient: &InteractionDataset,
    options: &CabOptions,
) -> CabResult {
    let table = extract(probe, excipient, options);
    let fit = fit_through_origin(&table.points());
    match fit {
        Some(fit) => info!(
            "Gradient: {:.2}, R-squared: {:.2} ({} probe(s))",
            fit.slope,
            fit.r_squared,
            table.points().len()
        ),
        None => warn!("No probe has both adhesion and cohesion values; no fit computed."),
    }
    CabResult { table, fit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::energy::{EnergyComponents, UNIT_CONVERSION};
    use crate::core::models::facet::FacetPair;
    use crate::core::models::record::InteractionRecord;

    fn dataset(rows: &[(&str, f64)]) -> InteractionDataset {
        InteractionDataset::from_records(
            rows.iter()
                .map(|(label, total)| {
                    let pair: FacetPair = label.parse().unwrap();
                    InteractionRecord::new(
                        pair,
                        EnergyComponents::new(*total, 0.0, 0.0, 0.0),
                        UNIT_CONVERSION,
                        None,
                        None,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn run_fits_cohesion_against_adhesion() {
        let probe = dataset(&[("a/a", -4.0), ("b/b", -8.0)]);
        let excipient = dataset(&[("a/x", -2.0), ("b/x", -4.0)]);

        let result = run(&probe, &excipient, &CabOptions::default());

        let fit = result.fit.unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn run_without_points_has_no_fit() {
        let probe = dataset(&[("a/a", -4.0)]);
        let excipient = dataset(&[("z/x", -2.0)]);
        let result = run(&probe, &excipient, &CabOptions::default());
        assert_eq!(result.fit, None);
        assert_eq!(result.table.rows.len(), 1);
    }
}
