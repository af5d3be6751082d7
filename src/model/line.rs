//! Grouping of blocks into lines.

use super::Block;
use serde::Serialize;

/// A run of blocks rendered together inside one paragraph.
///
/// A line is never empty: it is created from its first block and only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Line<'a> {
    blocks: Vec<&'a Block>,
}

impl<'a> Line<'a> {
    /// Start a new line with its first block.
    pub fn start(first: &'a Block) -> Self {
        Self {
            blocks: vec![first],
        }
    }

    /// Append a block to the end of the line.
    pub fn push(&mut self, block: &'a Block) {
        self.blocks.push(block);
    }

    /// Blocks in this line, in document order.
    pub fn blocks(&self) -> &[&'a Block] {
        &self.blocks
    }

    /// Number of blocks in the line (always at least 1).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// First block of the line.
    pub fn first(&self) -> &'a Block {
        self.blocks[0]
    }
}

/// Partition blocks into lines.
///
/// The first block always starts a line, whatever its own `inline` flag says.
/// Every later block joins the current line when it is inline and starts a
/// new line otherwise. Empty input yields no lines.
pub fn group_into_lines(blocks: &[Block]) -> Vec<Line<'_>> {
    let Some((first, rest)) = blocks.split_first() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = Line::start(first);
    for block in rest {
        if block.inline {
            current.push(block);
        } else {
            lines.push(std::mem::replace(&mut current, Line::start(block)));
        }
    }
    lines.push(current);
    lines
}
