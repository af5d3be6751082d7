//! # mathcontent
//!
//! Converts structured content (text, LaTeX math and image references) into
//! HTML ready for publishing.
//!
//! A document is a flat list of blocks. Blocks flagged `inline` continue the
//! previous line; every other block starts a new paragraph. LaTeX is either
//! rendered to an image file through a remote service (and reused for
//! repeated sources) or converted to markup by another service.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mathcontent::{render_file, RenderOptions};
//!
//! fn main() -> mathcontent::Result<()> {
//!     let options = RenderOptions::new()
//!         .with_source_dir("content/images")
//!         .with_dest_dir("public/images")
//!         .with_reference_url("/images")
//!         .with_markup_endpoint("http://localhost:3000/katex");
//!
//!     let html = render_file("lesson.json", options)?;
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```
//!
//! ## Input format
//!
//! ```json
//! [
//!   {"text": "The area of a circle is "},
//!   {"latex": "\\pi r^2", "inline": true},
//!   {"image": "circle.png"}
//! ]
//! ```

pub mod error;
pub mod model;
pub mod render;
pub mod service;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{group_into_lines, Block, BlockKind, Document, Line, RawBlock};
pub use render::{
    lines_to_json, ImageCache, JsonFormat, LatexMode, LineRenderer, RenderOptions, RenderResult,
    RenderStats,
};
pub use service::{IdGenerator, ImageService, MarkupService};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a document from a JSON file.
///
/// # Example
///
/// ```no_run
/// use mathcontent::parse_file;
///
/// let doc = parse_file("lesson.json").unwrap();
/// println!("Blocks: {}", doc.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let file = File::open(path)?;
    Document::from_reader(BufReader::new(file))
}

/// Render a JSON document string to HTML with a fresh renderer.
pub fn render_json(json: &str, options: RenderOptions) -> Result<String> {
    let doc = Document::from_json(json)?;
    let mut renderer = LineRenderer::new(options)?;
    renderer.render_document(&doc)
}

/// Render a JSON document file to HTML with a fresh renderer.
///
/// The document is fully validated before the renderer is used, so a
/// malformed block never triggers a network request or file copy.
pub fn render_file<P: AsRef<Path>>(path: P, options: RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    let mut renderer = LineRenderer::new(options)?;
    renderer.render_document(&doc)
}
