use super::facet::{Facet, FacetPair};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct MorphologyEntry {
    pub facet: Facet,
    /// Share of the total crystal surface, in percent.
    pub percent_area: f64,
}

impl MorphologyEntry {
    pub fn new(facet: Facet, percent_area: f64) -> Self {
        Self {
            facet,
            percent_area,
        }
    }

    #[inline]
    pub fn area_fraction(&self) -> f64 {
        self.percent_area / 100.0
    }
}

/// The facets of one crystal habit, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MorphologySurface {
    entries: Vec<MorphologyEntry>,
}

impl MorphologySurface {
    pub fn new(entries: Vec<MorphologyEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MorphologyEntry] {
        &self.entries
    }

    pub fn facets(&self) -> impl Iterator<Item = &Facet> {
        self.entries.iter().map(|e| &e.facet)
    }

    pub fn area_fraction(&self, facet: &Facet) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| &e.facet == facet)
            .map(MorphologyEntry::area_fraction)
    }

    pub fn total_fraction(&self) -> f64 {
        self.entries.iter().map(MorphologyEntry::area_fraction).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Probability of facet `first` of one crystal meeting facet `second` of
/// another, taken as the product of their area fractions.
///
/// The table covers the full cross product of the two surfaces. It is only
/// symmetric when both axes come from the same surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollisionProbabilityTable {
    first: MorphologySurface,
    second: MorphologySurface,
    probabilities: HashMap<FacetPair, f64>,
}

impl CollisionProbabilityTable {
    pub fn from_surfaces(first: MorphologySurface, second: MorphologySurface) -> Self {
        let mut probabilities = HashMap::with_capacity(first.len() * second.len());
        for a in first.entries() {
            for b in second.entries() {
                probabilities.insert(
                    FacetPair::new(a.facet.clone(), b.facet.clone()),
                    a.area_fraction() * b.area_fraction(),
                );
            }
        }
        Self {
            first,
            second,
            probabilities,
        }
    }

    /// Uses one surface on both axes (self-interaction).
    pub fn from_single_surface(surface: MorphologySurface) -> Self {
        Self::from_surfaces(surface.clone(), surface)
    }

    pub fn get(&self, pair: &FacetPair) -> Option<f64> {
        self.probabilities.get(pair).copied()
    }

    pub fn first_surface(&self) -> &MorphologySurface {
        &self.first
    }

    pub fn second_surface(&self) -> &MorphologySurface {
        &self.second
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Iterates the table row by row in surface order.
    pub fn iter(&self) -> impl Iterator<Item = (FacetPair, f64)> + '_ {
        self.first.entries().iter().flat_map(move |a| {
            self.second.entries().iter().map(move |b| {
                (
                    FacetPair::new(a.facet.clone(), b.facet.clone()),
                    a.area_fraction() * b.area_fraction(),
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(entries: &[(&str, f64)]) -> MorphologySurface {
        MorphologySurface::new(
            entries
                .iter()
                .map(|(f, p)| MorphologyEntry::new(Facet::from(*f), *p))
                .collect(),
        )
    }

    fn pair(a: &str, b: &str) -> FacetPair {
        FacetPair::new(Facet::from(a), Facet::from(b))
    }

    #[test]
    fn area_fractions_sum_to_one_for_complete_surface() {
        let s = surface(&[("011", 45.5), ("10-1", 30.25), ("002", 24.25)]);
        assert!((s.total_fraction() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn table_is_exact_outer_product_of_fractions() {
        let a = surface(&[("011", 60.0), ("002", 40.0)]);
        let b = surface(&[("100", 25.0), ("110", 75.0)]);
        let table = CollisionProbabilityTable::from_surfaces(a.clone(), b.clone());

        assert_eq!(table.len(), 4);
        for ea in a.entries() {
            for eb in b.entries() {
                let p = table
                    .get(&FacetPair::new(ea.facet.clone(), eb.facet.clone()))
                    .unwrap();
                assert_eq!(p, ea.area_fraction() * eb.area_fraction());
            }
        }
    }

    #[test]
    fn table_from_different_surfaces_is_not_symmetric() {
        let a = surface(&[("011", 60.0), ("002", 40.0)]);
        let b = surface(&[("011", 10.0), ("002", 90.0)]);
        let table = CollisionProbabilityTable::from_surfaces(a, b);

        let forward = table.get(&pair("011", "002")).unwrap();
        let backward = table.get(&pair("002", "011")).unwrap();
        assert!((forward - 0.54).abs() < 1e-12);
        assert!((backward - 0.04).abs() < 1e-12);
    }

    #[test]
    fn table_from_single_surface_is_symmetric() {
        let table = CollisionProbabilityTable::from_single_surface(surface(&[
            ("011", 60.0),
            ("002", 40.0),
        ]));
        assert_eq!(
            table.get(&pair("011", "002")),
            table.get(&pair("002", "011"))
        );
        assert!((table.get(&pair("011", "011")).unwrap() - 0.36).abs() < 1e-12);
    }

    #[test]
    fn get_returns_none_for_unknown_pair() {
        let table = CollisionProbabilityTable::from_single_surface(surface(&[("011", 100.0)]));
        assert_eq!(table.get(&pair("011", "200")), None);
    }

    #[test]
    fn iter_visits_every_combination_in_surface_order() {
        let table = CollisionProbabilityTable::from_surfaces(
            surface(&[("a", 50.0), ("b", 50.0)]),
            surface(&[("c", 100.0)]),
        );
        let labels: Vec<String> = table.iter().map(|(p, _)| p.label()).collect();
        assert_eq!(labels, vec!["a/c", "b/c"]);
    }
}
