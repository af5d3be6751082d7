//! HTML rendering for content block documents.

use crate::error::Result;
use crate::model::{group_into_lines, Block, BlockKind, Document, Line};
use crate::service::{
    HttpImageService, HttpMarkupService, IdGenerator, ImageService, MarkupService, UuidGenerator,
};
use std::io::Read;

use super::images::ImageResolver;
use super::{ImageCache, LatexMode, RenderOptions, RenderResult, RenderStats};

/// Renders block sequences to HTML paragraphs.
///
/// Each line becomes one `<p>` element holding the concatenated fragments of
/// its blocks. Rendering is all-or-nothing: the first failing block aborts
/// the document and no HTML is returned.
///
/// The renderer owns its LaTeX image cache, so repeated sources are rendered
/// once per renderer, across every document it renders.
///
/// # Example
///
/// ```no_run
/// use mathcontent::{Block, LineRenderer, RenderOptions};
///
/// let options = RenderOptions::new()
///     .with_source_dir("content/images")
///     .with_dest_dir("public/images")
///     .with_reference_url("/images")
///     .with_markup_endpoint("http://localhost:3000/katex");
/// let mut renderer = LineRenderer::new(options)?;
///
/// let html = renderer.render(&[
///     Block::text("Area: "),
///     Block::latex("\\pi r^2").inline(),
/// ])?;
/// # Ok::<(), mathcontent::Error>(())
/// ```
pub struct LineRenderer {
    latex_mode: LatexMode,
    markup: Box<dyn MarkupService>,
    images: ImageResolver,
    stats: RenderStats,
}

impl LineRenderer {
    /// Create a renderer using the HTTP rendering services and UUID filenames.
    pub fn new(options: RenderOptions) -> Result<Self> {
        let required = options.resolve()?;
        let markup = HttpMarkupService::new(required.markup_endpoint);
        let images = HttpImageService::new(options.image_endpoint.clone());
        Self::with_services(
            options,
            Box::new(markup),
            Box::new(images),
            Box::new(UuidGenerator),
        )
    }

    /// Create a renderer with explicit collaborators.
    ///
    /// The markup endpoint is still required in the options even though the
    /// given markup service decides where requests actually go.
    pub fn with_services(
        options: RenderOptions,
        markup: Box<dyn MarkupService>,
        images: Box<dyn ImageService>,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self> {
        let required = options.resolve()?;
        Ok(Self {
            latex_mode: options.latex_mode,
            markup,
            images: ImageResolver::new(&required, options.reuse_images, images, ids),
            stats: RenderStats::new(),
        })
    }

    /// Render blocks to HTML.
    pub fn render(&mut self, blocks: &[Block]) -> Result<String> {
        self.render_with_stats(blocks).map(|result| result.html)
    }

    /// Render a document to HTML.
    pub fn render_document(&mut self, doc: &Document) -> Result<String> {
        self.render(&doc.blocks)
    }

    /// Render blocks and report statistics for this call.
    ///
    /// Counters are added to [`LineRenderer::stats`] only when the whole
    /// call succeeds.
    pub fn render_with_stats(&mut self, blocks: &[Block]) -> Result<RenderResult> {
        let mut stats = RenderStats::new();
        let mut output = String::new();

        if !blocks.is_empty() {
            for line in group_into_lines(blocks) {
                self.render_line(&mut output, &line, &mut stats)?;
            }
        }

        self.stats.merge(&stats);
        Ok(RenderResult::new(output, stats))
    }

    /// Parse a JSON document and render it.
    ///
    /// Malformed blocks are rejected before any block is rendered.
    pub fn render_json(&mut self, json: &str) -> Result<String> {
        let doc = Document::from_json(json)?;
        self.render_document(&doc)
    }

    /// Parse a JSON document from a reader and render it.
    pub fn render_reader<R: Read>(&mut self, reader: R) -> Result<String> {
        let doc = Document::from_reader(reader)?;
        self.render_document(&doc)
    }

    /// Statistics accumulated over every successful render call.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// The LaTeX image cache.
    pub fn image_cache(&self) -> &ImageCache {
        self.images.cache()
    }

    /// The configured LaTeX mode.
    pub fn latex_mode(&self) -> LatexMode {
        self.latex_mode
    }

    fn render_line(
        &mut self,
        output: &mut String,
        line: &Line<'_>,
        stats: &mut RenderStats,
    ) -> Result<()> {
        let mut text = String::new();
        for block in line.blocks() {
            self.render_block(&mut text, block, stats)?;
        }

        stats.add_line();
        output.push_str("<p>");
        output.push_str(&text);
        output.push_str("</p>");
        Ok(())
    }

    fn render_block(
        &mut self,
        output: &mut String,
        block: &Block,
        stats: &mut RenderStats,
    ) -> Result<()> {
        match &block.kind {
            BlockKind::Text(content) => {
                stats.add_text();
                output.push_str(content);
            }
            BlockKind::Latex(source) => {
                stats.add_latex();
                match self.latex_mode {
                    LatexMode::Image => {
                        let cached = self.images.is_cached(source);
                        output.push_str(&self.images.resolve_latex(source)?);
                        if cached {
                            stats.add_cache_hit();
                        } else {
                            stats.add_generated_image();
                        }
                    }
                    LatexMode::Markup => {
                        output.push_str(&self.markup.latex_to_markup(source)?);
                        stats.add_markup_call();
                    }
                }
            }
            BlockKind::Image(filename) => {
                output.push_str(&self.images.resolve_file(filename)?);
                stats.add_copied_file();
            }
        }
        Ok(())
    }
}
