use super::error::EngineError;
use super::loader::{LoadedFile, SkippedFile};
use crate::core::models::energy::{EnergyColumn, EnergyComponent, EnergyComponents};
use crate::core::models::facet::FacetPair;
use crate::core::models::record::InteractionRecord;
use crate::core::stats;
use std::collections::HashSet;
use std::path::PathBuf;

/// A facet pair whose data file had no collision probability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingProbability {
    pub path: PathBuf,
    pub pair: FacetPair,
}

/// What happened to each interaction file of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    pub missing_probabilities: Vec<MissingProbability>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.missing_probabilities.is_empty()
    }
}

/// One row of the unweighted or weighted view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRow<'a> {
    pub facet: &'a FacetPair,
    pub energies: &'a EnergyComponents,
}

/// All interaction records of one analysis, in file order and row order
/// within each file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionDataset {
    records: Vec<InteractionRecord>,
}

impl InteractionDataset {
    pub fn from_records(records: Vec<InteractionRecord>) -> Self {
        Self { records }
    }

    /// Concatenates loaded files in the order given.
    pub fn from_files(files: Vec<LoadedFile>) -> Result<Self, EngineError> {
        if files.is_empty() {
            return Err(EngineError::NoInteractionData(
                "no interaction files were loaded".to_string(),
            ));
        }
        Ok(Self {
            records: files.into_iter().flat_map(|f| f.records).collect(),
        })
    }

    /// Full view with placement metadata, used for heatmaps.
    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn unweighted(&self) -> impl Iterator<Item = EnergyRow<'_>> {
        self.records.iter().map(|r| EnergyRow {
            facet: &r.facet,
            energies: &r.normalized,
        })
    }

    /// Rows of facet pairs that had a collision probability.
    pub fn weighted(&self) -> impl Iterator<Item = EnergyRow<'_>> {
        self.records.iter().filter_map(|r| {
            r.weighted.as_ref().map(|energies| EnergyRow {
                facet: &r.facet,
                energies,
            })
        })
    }

    pub fn has_weights(&self) -> bool {
        self.records.iter().any(|r| r.weighted.is_some())
    }

    /// Distinct facet pair labels in first-seen order.
    pub fn facet_labels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(&r.facet))
            .map(|r| r.facet.label())
            .collect()
    }

    /// Columns that can be selected for plotting; weighted columns are only
    /// offered when some record carries weights.
    pub fn energy_columns(&self, weighted: bool) -> Vec<EnergyColumn> {
        if weighted && !self.has_weights() {
            return Vec::new();
        }
        EnergyComponent::ALL
            .into_iter()
            .map(|c| EnergyColumn::normalized(c).with_weighting(weighted))
            .collect()
    }

    pub fn values(&self, column: EnergyColumn) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.energy(column)).collect()
    }

    pub fn values_for_facet(&self, column: EnergyColumn, label: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.facet.label() == label)
            .filter_map(|r| r.energy(column))
            .collect()
    }

    /// Facet labels sorted by ascending mean of `column`. Facets without any
    /// value in that column come last, in first-seen order.
    pub fn facets_by_mean(&self, column: EnergyColumn) -> Vec<String> {
        let mut with_mean: Vec<(String, Option<f64>)> = self
            .facet_labels()
            .into_iter()
            .map(|label| {
                let mean = stats::mean(&self.values_for_facet(column, &label));
                (label, mean)
            })
            .collect();
        with_mean.sort_by(|(_, a), (_, b)| match (a, b) {
            (Some(a), Some(b)) => a.total_cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        with_mean.into_iter().map(|(label, _)| label).collect()
    }

    /// Distinct rotation angles sampled for a facet pair, ascending.
    pub fn rotations(&self, label: &str) -> Vec<f64> {
        let mut rotations: Vec<f64> = self
            .records
            .iter()
            .filter(|r| r.facet.label() == label)
            .filter_map(|r| r.placement.map(|p| p.rotation))
            .collect();
        rotations.sort_by(f64::total_cmp);
        rotations.dedup();
        rotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::filename::FileMetadata;
    use crate::core::models::facet::Facet;
    use crate::core::models::record::Placement;

    fn record(label: &str, total: f64, probability: Option<f64>) -> InteractionRecord {
        let pair: FacetPair = label.parse().unwrap();
        InteractionRecord::new(
            pair,
            EnergyComponents::new(total, 0.0, total, 0.0),
            UNIT_AREA,
            probability,
            None,
        )
    }

    // An area equal to the conversion constant leaves raw values unchanged.
    const UNIT_AREA: f64 = crate::core::models::energy::UNIT_CONVERSION;

    fn loaded(label: &str, totals: &[f64], probability: Option<f64>) -> LoadedFile {
        let pair: FacetPair = label.parse().unwrap();
        LoadedFile {
            path: PathBuf::from(format!("{label}.csv")),
            metadata: FileMetadata::new(pair, 1, 1),
            probability,
            records: totals
                .iter()
                .map(|t| record(label, *t, probability))
                .collect(),
        }
    }

    const TOTAL: EnergyColumn = EnergyColumn::normalized(EnergyComponent::Total);
    const WEIGHTED_TOTAL: EnergyColumn = EnergyColumn::weighted(EnergyComponent::Total);

    #[test]
    fn from_files_preserves_file_and_row_order() {
        let dataset = InteractionDataset::from_files(vec![
            loaded("011/011", &[-1.0, -2.0], Some(1.0)),
            loaded("002/011", &[-3.0], Some(1.0)),
        ])
        .unwrap();
        assert_eq!(dataset.values(TOTAL), vec![-1.0, -2.0, -3.0]);
    }

    #[test]
    fn from_files_fails_for_no_files() {
        assert!(matches!(
            InteractionDataset::from_files(Vec::new()),
            Err(EngineError::NoInteractionData(_))
        ));
    }

    #[test]
    fn facet_labels_are_distinct_in_first_seen_order() {
        let dataset = InteractionDataset::from_records(vec![
            record("b/a", -1.0, None),
            record("a/a", -1.0, None),
            record("b/a", -1.0, None),
        ]);
        assert_eq!(dataset.facet_labels(), vec!["b/a", "a/a"]);
    }

    #[test]
    fn facet_label_set_does_not_depend_on_file_order() {
        let forward = InteractionDataset::from_files(vec![
            loaded("a/a", &[-1.0], None),
            loaded("b/a", &[-1.0], None),
        ])
        .unwrap();
        let backward = InteractionDataset::from_files(vec![
            loaded("b/a", &[-1.0], None),
            loaded("a/a", &[-1.0], None),
        ])
        .unwrap();
        let a: HashSet<String> = forward.facet_labels().into_iter().collect();
        let b: HashSet<String> = backward.facet_labels().into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn weighted_view_omits_records_without_probability() {
        let dataset = InteractionDataset::from_files(vec![
            loaded("a/a", &[-10.0], Some(0.5)),
            loaded("a/b", &[-10.0, -20.0], None),
        ])
        .unwrap();

        assert_eq!(dataset.unweighted().count(), 3);
        let weighted: Vec<f64> = dataset.weighted().map(|r| r.energies.total).collect();
        assert!((weighted[0] - -5.0).abs() < 1e-9);
        assert_eq!(weighted.len(), 1);
        assert_eq!(dataset.values_for_facet(WEIGHTED_TOTAL, "a/b"), Vec::<f64>::new());
    }

    #[test]
    fn energy_columns_split_weighted_and_unweighted() {
        let weighted = InteractionDataset::from_files(vec![loaded("a/a", &[-1.0], Some(0.2))]).unwrap();
        let names: Vec<String> = weighted
            .energy_columns(true)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            names,
            vec![
                "Weighted Total Energy",
                "Weighted Electrostatic",
                "Weighted Van der Waals",
                "Weighted H-Bond"
            ]
        );
        assert_eq!(weighted.energy_columns(false).len(), 4);

        let unweighted = InteractionDataset::from_files(vec![loaded("a/a", &[-1.0], None)]).unwrap();
        assert!(unweighted.energy_columns(true).is_empty());
    }

    #[test]
    fn facets_by_mean_sorts_ascending() {
        let dataset = InteractionDataset::from_records(vec![
            record("a/a", -1.0, None),
            record("b/b", -5.0, Some(1.0)),
            record("c/c", -3.0, None),
            record("a/a", -3.0, None),
        ]);
        assert_eq!(dataset.facets_by_mean(TOTAL), vec!["b/b", "c/c", "a/a"]);
        assert_eq!(
            dataset.facets_by_mean(WEIGHTED_TOTAL),
            vec!["b/b", "a/a", "c/c"]
        );
    }

    #[test]
    fn rotations_are_distinct_and_sorted() {
        let pair = FacetPair::new(Facet::from("a"), Facet::from("b"));
        let with_rotation = |rotation: f64| {
            InteractionRecord::new(
                pair.clone(),
                EnergyComponents::default(),
                1.0,
                None,
                Some(Placement {
                    x_displacement: 0.0,
                    y_displacement: 0.0,
                    rotation,
                }),
            )
        };
        let dataset = InteractionDataset::from_records(vec![
            with_rotation(90.0),
            with_rotation(0.0),
            with_rotation(90.0),
            record("a/b", -1.0, None),
        ]);
        assert_eq!(dataset.rotations("a/b"), vec![0.0, 90.0]);
        assert!(dataset.rotations("c/c").is_empty());
    }

    #[test]
    fn load_report_is_complete_without_skips_or_missing_probabilities() {
        let mut report = LoadReport::default();
        assert!(report.is_complete());
        report.missing_probabilities.push(MissingProbability {
            path: PathBuf::from("a.csv"),
            pair: "a/b".parse().unwrap(),
        });
        assert!(!report.is_complete());
    }
}
