use super::dataset::InteractionDataset;
use crate::core::models::energy::{EnergyColumn, EnergyComponent};
use crate::core::models::facet::FacetPair;
use crate::core::stats;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, warn};

/// Central value reported for each adhesion and cohesion group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Descriptor {
    #[default]
    Mean,
    Median,
}

impl Descriptor {
    fn center(self, values: &[f64]) -> Option<f64> {
        match self {
            Descriptor::Mean => stats::mean(values),
            Descriptor::Median => stats::median(values),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CabOptions {
    pub weighted: bool,
    /// Match excipient rows where the probe facet is the second facet of the
    /// pair (`/layer`) instead of the first (`layer/`).
    pub excipient_as_probe: bool,
    pub descriptor: Descriptor,
    pub component: EnergyComponent,
}

impl Default for CabOptions {
    fn default() -> Self {
        Self {
            weighted: false,
            excipient_as_probe: false,
            descriptor: Descriptor::Mean,
            component: EnergyComponent::Total,
        }
    }
}

impl CabOptions {
    pub fn column(&self) -> EnergyColumn {
        EnergyColumn::normalized(self.component).with_weighting(self.weighted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSummary {
    pub count: usize,
    pub center: Option<f64>,
    pub std: Option<f64>,
}

impl GroupSummary {
    fn of(values: &[f64], descriptor: Descriptor) -> Self {
        Self {
            count: values.len(),
            center: descriptor.center(values),
            std: stats::std_dev(values),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CabRow {
    pub probe: String,
    pub adhesion: GroupSummary,
    pub cohesion: GroupSummary,
}

#[derive(Serialize)]
struct CabCsvRow<'a> {
    #[serde(rename = "Probes")]
    probe: &'a str,
    #[serde(rename = "Adhesion")]
    adhesion: Option<f64>,
    #[serde(rename = "Adhesion STD")]
    adhesion_std: Option<f64>,
    #[serde(rename = "Cohesion")]
    cohesion: Option<f64>,
    #[serde(rename = "Cohesion STD")]
    cohesion_std: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CabGroup {
    Adhesion,
    Cohesion,
}

impl CabGroup {
    pub fn name(self) -> &'static str {
        match self {
            CabGroup::Adhesion => "adhesion",
            CabGroup::Cohesion => "cohesion",
        }
    }
}

/// A facet pair that entered a probe's group through the substring match
/// although none of its matching facets is the probe itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousMatch {
    pub probe: String,
    pub group: CabGroup,
    pub label: String,
}

/// Per-probe adhesion and cohesion summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CabTable {
    pub rows: Vec<CabRow>,
    /// Labels averaged into a group by substring only, in first-seen order.
    pub ambiguous_matches: Vec<AmbiguousMatch>,
    pub column: EnergyColumn,
    pub descriptor: Descriptor,
}

impl CabTable {
    /// `(adhesion, cohesion)` of the probes where both groups have a value.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| Some((row.adhesion.center?, row.cohesion.center?)))
            .collect()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            writer.serialize(CabCsvRow {
                probe: &row.probe,
                adhesion: row.adhesion.center,
                adhesion_std: row.adhesion.std,
                cohesion: row.cohesion.center,
                cohesion_std: row.cohesion.std,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Distinct first facets of the probe dataset, first-seen order.
pub fn probes(dataset: &InteractionDataset) -> Vec<String> {
    let mut probes: Vec<String> = Vec::new();
    for label in dataset.facet_labels() {
        let first = label.split('/').next().unwrap_or_default().to_string();
        if !probes.contains(&first) {
            probes.push(first);
        }
    }
    probes
}

/// Values of the records whose label contains `key`, plus the distinct
/// labels among them that `exact` rejects.
fn group_values(
    dataset: &InteractionDataset,
    column: EnergyColumn,
    key: &str,
    exact: impl Fn(&FacetPair) -> bool,
) -> (Vec<f64>, Vec<String>) {
    let mut values = Vec::new();
    let mut loose: Vec<String> = Vec::new();
    for record in dataset.records() {
        let label = record.facet.label();
        if !label.contains(key) {
            continue;
        }
        if !exact(&record.facet) && !loose.contains(&label) {
            loose.push(label);
        }
        values.extend(record.energy(column));
    }
    (values, loose)
}

/// Adhesion comes from `excipient` rows pairing the probe facet with another
/// material; cohesion from `probe` rows whose label mentions the facet.
/// Labels are matched by substring.
pub fn extract(
    probe: &InteractionDataset,
    excipient: &InteractionDataset,
    options: &CabOptions,
) -> CabTable {
    let column = options.column();
    let mut ambiguous = Vec::new();

    let rows = probes(probe)
        .into_iter()
        .map(|layer| {
            let adhesion_key = if options.excipient_as_probe {
                format!("/{layer}")
            } else {
                format!("{layer}/")
            };
            let (adhesion, loose_adhesion) =
                group_values(excipient, column, &adhesion_key, |pair| {
                    let facet = if options.excipient_as_probe {
                        &pair.second
                    } else {
                        &pair.first
                    };
                    facet.as_str() == layer
                });
            let (cohesion, loose_cohesion) = group_values(probe, column, &layer, |pair| {
                pair.first.as_str() == layer || pair.second.as_str() == layer
            });
            debug!(
                "Probe {}: {} adhesion rows, {} cohesion rows",
                layer,
                adhesion.len(),
                cohesion.len()
            );

            for (group, labels) in [
                (CabGroup::Adhesion, loose_adhesion),
                (CabGroup::Cohesion, loose_cohesion),
            ] {
                for label in labels {
                    warn!(
                        "Probe '{}' {} group includes '{}' by substring match only.",
                        layer,
                        group.name(),
                        label
                    );
                    ambiguous.push(AmbiguousMatch {
                        probe: layer.clone(),
                        group,
                        label,
                    });
                }
            }

            CabRow {
                adhesion: GroupSummary::of(&adhesion, options.descriptor),
                cohesion: GroupSummary::of(&cohesion, options.descriptor),
                probe: layer,
            }
        })
        .collect();

    CabTable {
        rows,
        ambiguous_matches: ambiguous,
        column,
        descriptor: options.descriptor,
    }
}
