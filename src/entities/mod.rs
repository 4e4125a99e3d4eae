//! DXF entity types and traits
//!
//! Only the entity kinds the rewriter inspects are modeled explicitly
//! (TEXT, MTEXT, INSERT with its ATTRIB records); everything else is
//! carried as a [`RawEntity`] and written back untouched. Every modeled
//! entity also retains its full group code list, so codes outside the
//! typed accessors are never lost on save.

use crate::io::dxf::CodePair;

pub mod attribute_entity;
pub mod insert;
pub mod mtext;
pub mod raw;
pub mod text;

pub use attribute_entity::AttributeEntity;
pub use insert::Insert;
pub use mtext::MText;
pub use raw::RawEntity;
pub use text::Text;

/// Base trait for all DXF entities
pub trait Entity {
    /// Get the DXF record name ("TEXT", "INSERT", ...)
    fn dxf_name(&self) -> &str;

    /// Get the entity's group code pairs (excluding the leading type code)
    fn pairs(&self) -> &[CodePair];

    /// Get the entity's group code pairs mutably
    fn pairs_mut(&mut self) -> &mut Vec<CodePair>;

    /// Get the entity's layer name
    fn layer(&self) -> &str {
        let layer = crate::io::dxf::code_pair::string_value(self.pairs(), 8);
        if layer.is_empty() {
            "0"
        } else {
            layer
        }
    }

    /// Get the entity's handle, when present
    fn handle(&self) -> Option<u64> {
        crate::io::dxf::code_pair::find_code(self.pairs(), 5).and_then(|p| p.as_handle())
    }

    /// Check whether the entity lives in paper space (group code 67)
    fn is_paper_space(&self) -> bool {
        crate::io::dxf::code_pair::find_code(self.pairs(), 67)
            .and_then(|p| p.as_i16())
            .map(|v| v != 0)
            .unwrap_or(false)
    }
}

/// Classification of an entity for the rewrite pass.
///
/// A closed set: one branch per kind the rewriter handles, plus an
/// explicit `Other` for everything it must leave alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Single-line text (TEXT)
    Text,
    /// Multi-line text (MTEXT)
    MultilineText,
    /// Block reference (INSERT)
    BlockReference,
    /// Any other entity; never inspected or modified
    Other,
}

/// Enumeration of entity types for type-safe storage
#[derive(Debug, Clone)]
pub enum EntityType {
    /// Text entity
    Text(Text),
    /// Multi-line text entity
    MText(MText),
    /// Insert entity (block reference) with attached attributes
    Insert(Insert),
    /// Unrecognized entity, carried verbatim
    Other(RawEntity),
}

impl EntityType {
    /// Get the entity's kind
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityType::Text(_) => EntityKind::Text,
            EntityType::MText(_) => EntityKind::MultilineText,
            EntityType::Insert(_) => EntityKind::BlockReference,
            EntityType::Other(_) => EntityKind::Other,
        }
    }

    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Other(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Other(e) => e,
        }
    }
}
