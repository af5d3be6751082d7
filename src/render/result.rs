//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including HTML and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub html: String,

    /// Statistics for this render
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(html: String, stats: RenderStats) -> Self {
        Self { html, stats }
    }

    /// Get the HTML length in bytes.
    pub fn html_len(&self) -> usize {
        self.html.len()
    }
}

/// Counters collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Paragraphs emitted
    pub line_count: u32,

    /// Text blocks rendered
    pub text_count: u32,

    /// LaTeX blocks rendered (any mode)
    pub latex_count: u32,

    /// Image blocks copied into the destination directory
    pub copied_file_count: u32,

    /// LaTeX images requested from the image service
    pub generated_image_count: u32,

    /// LaTeX images served from the cache
    pub cache_hit_count: u32,

    /// Requests sent to the markup service
    pub markup_call_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment line count.
    pub fn add_line(&mut self) {
        self.line_count += 1;
    }

    /// Increment text block count.
    pub fn add_text(&mut self) {
        self.text_count += 1;
    }

    /// Increment LaTeX block count.
    pub fn add_latex(&mut self) {
        self.latex_count += 1;
    }

    /// Increment copied image file count.
    pub fn add_copied_file(&mut self) {
        self.copied_file_count += 1;
    }

    /// Increment generated image count.
    pub fn add_generated_image(&mut self) {
        self.generated_image_count += 1;
    }

    /// Increment cache hit count.
    pub fn add_cache_hit(&mut self) {
        self.cache_hit_count += 1;
    }

    /// Increment markup call count.
    pub fn add_markup_call(&mut self) {
        self.markup_call_count += 1;
    }

    /// Total blocks rendered.
    pub fn block_count(&self) -> u32 {
        self.text_count + self.latex_count + self.copied_file_count
    }

    /// Add another set of counters to this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.line_count += other.line_count;
        self.text_count += other.text_count;
        self.latex_count += other.latex_count;
        self.copied_file_count += other.copied_file_count;
        self.generated_image_count += other.generated_image_count;
        self.cache_hit_count += other.cache_hit_count;
        self.markup_call_count += other.markup_call_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counters() {
        let mut stats = RenderStats::new();
        stats.add_line();
        stats.add_text();
        stats.add_latex();
        stats.add_cache_hit();
        stats.add_copied_file();

        assert_eq!(stats.line_count, 1);
        assert_eq!(stats.block_count(), 3);
        assert_eq!(stats.cache_hit_count, 1);
    }

    #[test]
    fn test_stats_merge() {
        let mut total = RenderStats::new();
        total.add_text();

        let mut call = RenderStats::new();
        call.add_line();
        call.add_text();
        call.add_generated_image();

        total.merge(&call);
        assert_eq!(total.text_count, 2);
        assert_eq!(total.line_count, 1);
        assert_eq!(total.generated_image_count, 1);
    }

    #[test]
    fn test_render_result() {
        let result = RenderResult::new("<p>a</p>".to_string(), RenderStats::new());
        assert_eq!(result.html_len(), 8);
    }
}
