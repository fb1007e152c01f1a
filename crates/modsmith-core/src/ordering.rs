//! Ordered-insertion engine for sibling collections.
//!
//! Tabs, blocks, fields, related lists and links all keep a dense,
//! zero-based, strictly increasing `sequence` among their siblings. This
//! module implements the single insert-and-resequence algorithm used by all
//! five collections: pick a target sequence relative to an anchor sibling,
//! shift everything at or past it up by one, insert, sort.

use modsmith_types::draft::{Block, Field, Link, RelatedList, Tab};
use modsmith_types::error::DesignError;

/// Where to place a new sibling relative to the existing collection.
///
/// Anchors are identified by the sibling's unique label (or name, for
/// fields). On an empty collection every placement degrades to `End`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Before(String),
    After(String),
    End,
}

/// Access to the sequence number and anchor label of a sibling.
pub trait Sequenced {
    fn sequence(&self) -> u32;
    fn set_sequence(&mut self, sequence: u32);
    /// The unique label siblings are anchored by.
    fn anchor_label(&self) -> &str;
}

/// Insert `item` into `siblings` at the requested placement, keeping the
/// sequence values dense and strictly ordered.
///
/// `Before` takes over the anchor's sequence, `After` takes the next one;
/// every sibling at or past the target shifts up by one *before* the insert
/// so no collision can occur. Fails with `AnchorNotFound` when the anchor
/// label matches no current sibling.
pub fn insert_ordered<T: Sequenced>(
    siblings: &mut Vec<T>,
    mut item: T,
    placement: Placement,
) -> Result<(), DesignError> {
    let target = if siblings.is_empty() {
        // Empty collection: placement is forced to the end.
        0
    } else {
        match &placement {
            Placement::End => siblings.len() as u32,
            Placement::Before(anchor) => anchor_sequence(siblings, anchor)?,
            Placement::After(anchor) => anchor_sequence(siblings, anchor)? + 1,
        }
    };

    for sibling in siblings.iter_mut() {
        if sibling.sequence() >= target {
            sibling.set_sequence(sibling.sequence() + 1);
        }
    }

    item.set_sequence(target);
    siblings.push(item);

    // Ties are impossible after the shift, but the sort must stay stable.
    siblings.sort_by_key(Sequenced::sequence);

    Ok(())
}

fn anchor_sequence<T: Sequenced>(siblings: &[T], anchor: &str) -> Result<u32, DesignError> {
    siblings
        .iter()
        .find(|s| s.anchor_label() == anchor)
        .map(Sequenced::sequence)
        .ok_or_else(|| DesignError::AnchorNotFound(anchor.to_string()))
}

// ---------------------------------------------------------------------------
// Sequenced implementations for the five sibling kinds
// ---------------------------------------------------------------------------

impl Sequenced for Tab {
    fn sequence(&self) -> u32 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u32) {
        self.sequence = sequence;
    }

    fn anchor_label(&self) -> &str {
        &self.label
    }
}

impl Sequenced for Block {
    fn sequence(&self) -> u32 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u32) {
        self.sequence = sequence;
    }

    fn anchor_label(&self) -> &str {
        &self.label
    }
}

impl Sequenced for Field {
    fn sequence(&self) -> u32 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u32) {
        self.sequence = sequence;
    }

    fn anchor_label(&self) -> &str {
        &self.name
    }
}

impl Sequenced for RelatedList {
    fn sequence(&self) -> u32 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u32) {
        self.sequence = sequence;
    }

    fn anchor_label(&self) -> &str {
        &self.label
    }
}

impl Sequenced for Link {
    fn sequence(&self) -> u32 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u32) {
        self.sequence = sequence;
    }

    fn anchor_label(&self) -> &str {
        &self.label
    }
}
