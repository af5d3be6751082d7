//! External collaborators used while rendering.
//!
//! The renderer talks to three ports: a service turning LaTeX into markup,
//! a service turning LaTeX into raster image bytes, and a source of unique
//! identifiers for generated image filenames. HTTP and UUID implementations
//! are provided; tests and embedders can plug in their own.

mod http;
mod ids;

pub use http::{agent, HttpImageService, HttpMarkupService, DEFAULT_IMAGE_ENDPOINT};
pub use ids::UuidGenerator;

use crate::error::Result;
use std::io::Read;

/// Converts LaTeX source into markup that is spliced into the output as-is.
pub trait MarkupService {
    /// Render `latex` and return the markup text.
    fn latex_to_markup(&self, latex: &str) -> Result<String>;
}

/// Renders LaTeX source into image bytes.
pub trait ImageService {
    /// Start rendering `latex`, returning a stream of image bytes.
    ///
    /// Read errors on the returned stream are treated as collaborator failures.
    fn fetch(&self, latex: &str) -> Result<Box<dyn Read>>;
}

/// Produces identifiers used to name generated image files.
pub trait IdGenerator {
    /// Return an identifier not returned before.
    fn next_id(&mut self) -> String;
}
