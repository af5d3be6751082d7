//! Rendering module for converting content blocks to HTML.

mod html;
mod images;
mod json;
mod options;
mod result;

pub use html::LineRenderer;
pub use images::{ImageCache, ImageResolver, FILE_IMAGE_ALT, IMAGE_EXTENSION};
pub use json::{lines_to_json, JsonFormat};
pub use options::{LatexMode, RenderOptions};
pub use result::{RenderResult, RenderStats};
