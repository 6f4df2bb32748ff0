use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A crystal facet identified by its normalized Miller-index label.
///
/// Labels coming from morphology tables are written as `{1 0 -1}` while file
/// names carry `(10-1)`; both normalize to the same string `10-1` so that they
/// can be joined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Facet(String);

impl Facet {
    /// Builds a facet from a raw label, stripping braces, parentheses and any whitespace.
    pub fn normalized(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| !matches!(c, '{' | '}' | '(' | ')') && !c.is_whitespace())
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Facet {
    fn from(raw: &str) -> Self {
        Self::normalized(raw)
    }
}

/// Two interacting facets. The label `first/second` is what every table and
/// plot refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacetPair {
    pub first: Facet,
    pub second: Facet,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FacetPairParseError {
    #[error("Facet pair label '{0}' must have the form 'first/second'")]
    MissingSeparator(String),
    #[error("Facet pair label '{0}' has an empty facet")]
    EmptyFacet(String),
}

impl FacetPair {
    pub fn new(first: Facet, second: Facet) -> Self {
        Self { first, second }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FacetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}

impl FromStr for FacetPair {
    type Err = FacetPairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, second) = s
            .split_once('/')
            .ok_or_else(|| FacetPairParseError::MissingSeparator(s.to_string()))?;
        let first = Facet::normalized(first);
        let second = Facet::normalized(second);
        if first.is_empty() || second.is_empty() {
            return Err(FacetPairParseError::EmptyFacet(s.to_string()));
        }
        Ok(Self { first, second })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_strips_braces_and_whitespace() {
        assert_eq!(Facet::normalized("{1 0 -1}").as_str(), "10-1");
        assert_eq!(Facet::normalized(" { 0 0 1 } ").as_str(), "001");
    }

    #[test]
    fn normalized_strips_parentheses_from_file_name_labels() {
        assert_eq!(Facet::normalized("(1-1-1)").as_str(), "1-1-1");
    }

    #[test]
    fn pair_label_joins_facets_with_slash() {
        let pair = FacetPair::new(Facet::from("1-1-1"), Facet::from("0-0-1"));
        assert_eq!(pair.label(), "1-1-1/0-0-1");
    }

    #[test]
    fn pair_parses_from_label() {
        let pair: FacetPair = "011/10-1".parse().unwrap();
        assert_eq!(pair.first.as_str(), "011");
        assert_eq!(pair.second.as_str(), "10-1");
    }

    #[test]
    fn pair_parse_fails_without_separator() {
        assert_eq!(
            "011".parse::<FacetPair>(),
            Err(FacetPairParseError::MissingSeparator("011".to_string()))
        );
    }

    #[test]
    fn pair_parse_fails_with_empty_side() {
        assert!(matches!(
            "011/ ".parse::<FacetPair>(),
            Err(FacetPairParseError::EmptyFacet(_))
        ));
    }
}
