use super::energy::{EnergyColumn, EnergyComponents};
use super::facet::FacetPair;

/// Relative placement of the two surfaces for one sampled configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_displacement: f64,
    pub y_displacement: f64,
    pub rotation: f64,
}

/// One sampled configuration of a facet pair.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    pub facet: FacetPair,
    /// Energies as written by the simulation tool (kcal/mol).
    pub raw: EnergyComponents,
    /// Energies per contact area in mJ/m².
    pub normalized: EnergyComponents,
    /// Normalized energies scaled by the collision probability of the pair.
    /// Absent when the pair has no probability, never zero-filled.
    pub weighted: Option<EnergyComponents>,
    pub placement: Option<Placement>,
}

impl InteractionRecord {
    pub fn new(
        facet: FacetPair,
        raw: EnergyComponents,
        area: f64,
        probability: Option<f64>,
        placement: Option<Placement>,
    ) -> Self {
        let normalized = raw.normalized_by_area(area);
        Self {
            facet,
            raw,
            normalized,
            weighted: probability.map(|p| normalized.weighted_by(p)),
            placement,
        }
    }

    /// Value of the given derived column, `None` for a weighted column on an
    /// unweighted record.
    pub fn energy(&self, column: EnergyColumn) -> Option<f64> {
        if column.weighted {
            self.weighted.map(|w| w.get(column.component))
        } else {
            Some(self.normalized.get(column.component))
        }
    }
}
