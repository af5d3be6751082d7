//! Document-level types.

use super::{group_into_lines, Block, Line, RawBlock};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

/// An ordered sequence of content blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    /// Blocks in document order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Create a document from blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Parse a document from its JSON form (an array of block objects).
    ///
    /// Every block is validated here, so a block with no content kind is
    /// reported with its index before anything is rendered.
    pub fn from_json(json: &str) -> Result<Self> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        Self::from_values(values)
    }

    /// Parse a document from a reader yielding JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let values: Vec<Value> = serde_json::from_reader(reader)?;
        Self::from_values(values)
    }

    fn from_values(values: Vec<Value>) -> Result<Self> {
        let blocks = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| parse_block(index, value))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { blocks })
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Group the blocks into lines.
    pub fn lines(&self) -> Vec<Line<'_>> {
        group_into_lines(&self.blocks)
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self::from_blocks(blocks)
    }
}

fn parse_block(index: usize, value: Value) -> Result<Block> {
    let malformed = |reason: String| Error::MalformedBlock { index, reason };

    if !value.is_object() {
        return Err(malformed(format!("expected an object, found {}", value)));
    }
    let raw: RawBlock = serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
    Block::try_from(raw).map_err(malformed)
}
