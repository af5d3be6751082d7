//! Rendering options and configuration.

use crate::error::{Error, Result};
use crate::service::DEFAULT_IMAGE_ENDPOINT;
use std::path::PathBuf;

/// Options for rendering content blocks to HTML.
///
/// The source directory, destination directory, reference URL and markup
/// endpoint are required; a renderer refuses to start without them.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Directory that image block filenames are resolved against
    pub source_image_dir: Option<PathBuf>,

    /// Directory generated and copied images are written to
    pub dest_image_dir: Option<PathBuf>,

    /// Prefix for the `src` attribute of generated `<img>` tags
    pub reference_url: Option<String>,

    /// Endpoint of the LaTeX-to-markup service
    pub markup_endpoint: Option<String>,

    /// Base URL of the LaTeX-to-image service
    pub image_endpoint: String,

    /// How LaTeX blocks are rendered
    pub latex_mode: LatexMode,

    /// Reuse generated images for repeated LaTeX sources
    pub reuse_images: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source image directory.
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_image_dir = Some(dir.into());
        self
    }

    /// Set the destination image directory.
    pub fn with_dest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dest_image_dir = Some(dir.into());
        self
    }

    /// Set the reference URL prefix.
    pub fn with_reference_url(mut self, url: impl Into<String>) -> Self {
        self.reference_url = Some(url.into());
        self
    }

    /// Set the LaTeX-to-markup endpoint.
    pub fn with_markup_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.markup_endpoint = Some(endpoint.into());
        self
    }

    /// Set the LaTeX-to-image endpoint.
    pub fn with_image_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.image_endpoint = endpoint.into();
        self
    }

    /// Set the LaTeX rendering mode.
    pub fn with_latex_mode(mut self, mode: LatexMode) -> Self {
        self.latex_mode = mode;
        self
    }

    /// Choose between image mode (`true`) and markup mode (`false`).
    pub fn with_images(self, generate: bool) -> Self {
        self.with_latex_mode(if generate {
            LatexMode::Image
        } else {
            LatexMode::Markup
        })
    }

    /// Enable or disable the LaTeX image cache.
    pub fn with_reuse_images(mut self, reuse: bool) -> Self {
        self.reuse_images = reuse;
        self
    }

    /// Check that every required option is present.
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    pub(crate) fn resolve(&self) -> Result<RequiredOptions> {
        Ok(RequiredOptions {
            source_dir: required_path(&self.source_image_dir, "source_image_dir")?,
            dest_dir: required_path(&self.dest_image_dir, "dest_image_dir")?,
            reference_url: required_str(&self.reference_url, "reference_url")?,
            markup_endpoint: required_str(&self.markup_endpoint, "markup_endpoint")?,
        })
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            source_image_dir: None,
            dest_image_dir: None,
            reference_url: None,
            markup_endpoint: None,
            image_endpoint: DEFAULT_IMAGE_ENDPOINT.to_string(),
            latex_mode: LatexMode::Image,
            reuse_images: true,
        }
    }
}

/// How LaTeX blocks are turned into HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatexMode {
    /// Render to an image file and reference it with an `<img>` tag
    #[default]
    Image,
    /// Splice in markup returned by the markup service
    Markup,
}

/// Required options after validation.
#[derive(Debug, Clone)]
pub(crate) struct RequiredOptions {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub reference_url: String,
    pub markup_endpoint: String,
}

fn required_path(value: &Option<PathBuf>, name: &str) -> Result<PathBuf> {
    match value {
        Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
        _ => Err(Error::Configuration(format!("{} is not specified", name))),
    }
}

fn required_str(value: &Option<String>, name: &str) -> Result<String> {
    match value {
        Some(s) if !s.is_empty() => Ok(s.clone()),
        _ => Err(Error::Configuration(format!("{} is not specified", name))),
    }
}
