//! DXF document structure

use crate::entities::{Entity, EntityType};
use crate::io::dxf::code_pair::string_value;
use crate::io::dxf::CodePair;

/// One section of a DXF file.
///
/// ENTITIES and BLOCKS are parsed into typed entities; every other section
/// (HEADER, TABLES, OBJECTS, ...) is kept as a raw pair list and re-emitted
/// verbatim on save.
#[derive(Debug, Clone)]
pub enum Section {
    /// The ENTITIES section
    Entities(Vec<EntityType>),
    /// The BLOCKS section
    Blocks(Vec<BlockDefinition>),
    /// Any other section, carried unchanged
    Raw(RawSection),
}

/// A section the tool does not interpret.
#[derive(Debug, Clone)]
pub struct RawSection {
    /// Section name (value of the code 2 pair after SECTION)
    pub name: String,
    /// All pairs between the section name and ENDSEC
    pub pairs: Vec<CodePair>,
}

/// A block definition from the BLOCKS section: the BLOCK begin record, the
/// entities it owns, and the ENDBLK record.
#[derive(Debug, Clone)]
pub struct BlockDefinition {
    begin: Vec<CodePair>,
    /// Entities owned by the block definition
    pub entities: Vec<EntityType>,
    end: Vec<CodePair>,
}

impl BlockDefinition {
    /// Create a block definition from its parts
    pub fn new(begin: Vec<CodePair>, entities: Vec<EntityType>, end: Vec<CodePair>) -> Self {
        Self {
            begin,
            entities,
            end,
        }
    }

    /// Get the block name
    pub fn name(&self) -> &str {
        string_value(&self.begin, 2)
    }

    /// Group codes of the BLOCK begin record
    pub(crate) fn begin_pairs(&self) -> &[CodePair] {
        &self.begin
    }

    /// Group codes of the ENDBLK record
    pub(crate) fn end_pairs(&self) -> &[CodePair] {
        &self.end
    }
}

/// A parsed DXF document.
///
/// Owns the file's sections in their original order. Exclusive to one
/// rewrite call at a time; nothing is retained between batch runs.
#[derive(Debug, Clone)]
pub struct DxfDocument {
    sections: Vec<Section>,
}

impl DxfDocument {
    /// Create a document from its sections
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// All sections in file order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterate over entities of the primary (model) space.
    ///
    /// Entities flagged as paper space (group code 67) live in the same
    /// ENTITIES section but are not part of the primary space.
    pub fn modelspace(&self) -> impl Iterator<Item = &EntityType> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                Section::Entities(entities) => Some(entities.iter()),
                _ => None,
            })
            .flatten()
            .filter(|e| !e.as_entity().is_paper_space())
    }

    /// Iterate over entities of the primary (model) space mutably
    pub fn modelspace_mut(&mut self) -> impl Iterator<Item = &mut EntityType> {
        self.sections
            .iter_mut()
            .filter_map(|s| match s {
                Section::Entities(entities) => Some(entities.iter_mut()),
                _ => None,
            })
            .flatten()
            .filter(|e| !e.as_entity().is_paper_space())
    }

    /// Iterate over the block definitions in the block table
    pub fn blocks(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                Section::Blocks(blocks) => Some(blocks.iter()),
                _ => None,
            })
            .flatten()
    }

    /// Iterate over the block definitions mutably
    pub fn blocks_mut(&mut self) -> impl Iterator<Item = &mut BlockDefinition> {
        self.sections
            .iter_mut()
            .filter_map(|s| match s {
                Section::Blocks(blocks) => Some(blocks.iter_mut()),
                _ => None,
            })
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RawEntity, Text};

    #[test]
    fn test_modelspace_excludes_paper_space() {
        let doc = DxfDocument::new(vec![Section::Entities(vec![
            EntityType::Text(Text::from_pairs(vec![CodePair::new(1, "SHT")])),
            EntityType::Text(Text::from_pairs(vec![
                CodePair::new(67, "1"),
                CodePair::new(1, "SHT"),
            ])),
            EntityType::Other(RawEntity::new("LINE", vec![])),
        ])]);

        assert_eq!(doc.modelspace().count(), 2);
    }

    #[test]
    fn test_block_name() {
        let block = BlockDefinition::new(
            vec![CodePair::new(2, "TITLEBLOCK"), CodePair::new(70, "0")],
            vec![],
            vec![],
        );
        assert_eq!(block.name(), "TITLEBLOCK");
    }
}
