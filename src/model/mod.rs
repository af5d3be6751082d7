//! Document model types for content blocks.
//!
//! A document is a flat list of blocks (text, LaTeX, image references).
//! Blocks flagged `inline` continue the previous line; everything else
//! starts a new one. Lines are the unit that becomes an HTML paragraph.

mod block;
mod document;
mod line;

pub use block::{Block, BlockKind, RawBlock};
pub use document::Document;
pub use line::{group_into_lines, Line};
