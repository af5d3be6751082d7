//! Content block types.

use serde::{Deserialize, Serialize};

/// One atomic unit of content.
///
/// On the wire a block is a JSON object carrying exactly one of `text`,
/// `latex` or `image`, plus an optional boolean `inline`:
///
/// ```json
/// {"text": "The area is ", "inline": false}
/// {"latex": "\\pi r^2", "inline": true}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    /// What the block contains
    pub kind: BlockKind,

    /// Continue the previous line instead of starting a new paragraph
    pub inline: bool,
}

impl Block {
    /// Create a block that starts a new line.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            inline: false,
        }
    }

    /// Create a plain text block.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Text(content.into()))
    }

    /// Create a LaTeX block.
    pub fn latex(source: impl Into<String>) -> Self {
        Self::new(BlockKind::Latex(source.into()))
    }

    /// Create an image reference block.
    pub fn image(filename: impl Into<String>) -> Self {
        Self::new(BlockKind::Image(filename.into()))
    }

    /// Set the inline continuation flag.
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Mark the block as continuing the previous line.
    pub fn inline(self) -> Self {
        self.with_inline(true)
    }

    /// Check if this is a text block.
    pub fn is_text(&self) -> bool {
        matches!(self.kind, BlockKind::Text(_))
    }

    /// Check if this is a LaTeX block.
    pub fn is_latex(&self) -> bool {
        matches!(self.kind, BlockKind::Latex(_))
    }

    /// Check if this is an image reference block.
    pub fn is_image(&self) -> bool {
        matches!(self.kind, BlockKind::Image(_))
    }
}

/// The content variants a block can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Text spliced into the output verbatim
    Text(String),

    /// LaTeX source rendered as an image or as markup
    Latex(String),

    /// Filename of an existing image, relative to the source image directory
    Image(String),
}

impl BlockKind {
    /// Wire name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Text(_) => "text",
            BlockKind::Latex(_) => "latex",
            BlockKind::Image(_) => "image",
        }
    }
}

/// Unvalidated wire form of a [`Block`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBlock {
    /// Plain text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// LaTeX source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latex: Option<String>,

    /// Image filename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Inline continuation flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

impl TryFrom<RawBlock> for Block {
    type Error = String;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let inline = raw.inline.unwrap_or(false);
        let kind = match (raw.text, raw.latex, raw.image) {
            (Some(content), None, None) => BlockKind::Text(content),
            (None, Some(source), None) => BlockKind::Latex(source),
            (None, None, Some(filename)) => BlockKind::Image(filename),
            (None, None, None) => {
                return Err("block does not contain image, text or latex".to_string())
            }
            (text, latex, image) => {
                let present: Vec<&str> = [("text", &text), ("latex", &latex), ("image", &image)]
                    .iter()
                    .filter(|(_, value)| value.is_some())
                    .map(|(name, _)| *name)
                    .collect();
                return Err(format!(
                    "block has more than one content kind: {}",
                    present.join(", ")
                ));
            }
        };
        Ok(Block { kind, inline })
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let mut raw = RawBlock {
            inline: block.inline.then_some(true),
            ..Default::default()
        };
        match block.kind {
            BlockKind::Text(content) => raw.text = Some(content),
            BlockKind::Latex(source) => raw.latex = Some(source),
            BlockKind::Image(filename) => raw.image = Some(filename),
        }
        raw
    }
}
