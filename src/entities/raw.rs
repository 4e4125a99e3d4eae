//! Raw entity - verbatim carrier for entity types the tool does not model

use super::Entity;
use crate::io::dxf::CodePair;

/// An entity of a kind the tool does not interpret (LINE, CIRCLE, HATCH,
/// ...). Its record name and group codes are carried unchanged so the
/// drawing round-trips losslessly.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntity {
    name: String,
    pairs: Vec<CodePair>,
}

impl RawEntity {
    /// Create a raw entity from its record name and group code pairs
    pub fn new(name: impl Into<String>, pairs: Vec<CodePair>) -> Self {
        Self {
            name: name.into(),
            pairs,
        }
    }
}

impl Entity for RawEntity {
    fn dxf_name(&self) -> &str {
        &self.name
    }

    fn pairs(&self) -> &[CodePair] {
        &self.pairs
    }

    fn pairs_mut(&mut self) -> &mut Vec<CodePair> {
        &mut self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carries_name_and_pairs() {
        let raw = RawEntity::new("LINE", vec![CodePair::new(10, "0.0")]);
        assert_eq!(raw.dxf_name(), "LINE");
        assert_eq!(raw.pairs().len(), 1);
    }
}
