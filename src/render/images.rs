//! Image generation and relocation for LaTeX and image blocks.
//!
//! Tags are built without escaping: the `alt` attribute carries the raw LaTeX
//! source, so output must only be published where that source is trusted.

use crate::error::{Error, Result};
use crate::service::{IdGenerator, ImageService};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use super::options::RequiredOptions;

/// Extension of images produced by the LaTeX image service.
pub const IMAGE_EXTENSION: &str = "gif";

/// Alt text used for relocated image files.
pub const FILE_IMAGE_ALT: &str = "Image of math content";

const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Generated `<img>` tags keyed by the exact LaTeX source.
///
/// Owned by a single [`ImageResolver`]; only the resolver inserts entries.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    entries: HashMap<String, String>,
}

impl ImageCache {
    /// Look up the tag generated for `source`.
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    /// Check whether `source` has a generated tag.
    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    /// Number of cached sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, source: &str, tag: &str) {
        self.entries.insert(source.to_string(), tag.to_string());
    }
}

/// Produces `<img>` tags for LaTeX sources and existing image files.
pub struct ImageResolver {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    reference_url: String,
    reuse_images: bool,
    cache: ImageCache,
    service: Box<dyn ImageService>,
    ids: Box<dyn IdGenerator>,
}

impl ImageResolver {
    pub(crate) fn new(
        required: &RequiredOptions,
        reuse_images: bool,
        service: Box<dyn ImageService>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            source_dir: required.source_dir.clone(),
            dest_dir: required.dest_dir.clone(),
            reference_url: required.reference_url.trim_end_matches('/').to_string(),
            reuse_images,
            cache: ImageCache::default(),
            service,
            ids,
        }
    }

    /// The LaTeX image cache.
    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Check whether rendering `source` would be served from the cache.
    pub fn is_cached(&self, source: &str) -> bool {
        self.reuse_images && self.cache.contains(source)
    }

    /// Render LaTeX to an image file and return a tag referencing it.
    ///
    /// With image reuse enabled, a source seen before returns the earlier tag
    /// without contacting the image service. Nothing is cached on failure.
    pub fn resolve_latex(&mut self, source: &str) -> Result<String> {
        if self.reuse_images {
            if let Some(tag) = self.cache.get(source) {
                log::debug!("Reusing generated image for LaTeX source {:?}", source);
                return Ok(tag.to_string());
            }
        }

        let mut stream = self.service.fetch(source)?;

        let filename = format!("{}.{}", self.ids.next_id(), IMAGE_EXTENSION);
        let path = self.dest_dir.join(&filename);
        if let Err(err) = write_stream(stream.as_mut(), &path) {
            discard_partial(&path);
            return Err(err);
        }
        log::debug!("Generated {} for LaTeX source {:?}", path.display(), source);

        let tag = self.img_tag(&filename, source);
        if self.reuse_images {
            self.cache.insert(source, &tag);
        }
        Ok(tag)
    }

    /// Copy an existing image into the destination directory and return a tag
    /// referencing the copy. Existing destination files are overwritten.
    pub fn resolve_file(&self, filename: &str) -> Result<String> {
        let src = self.source_dir.join(filename);
        let dest = self.dest_dir.join(filename);

        fs::metadata(&src).map_err(|e| Error::storage(&src, e))?;
        if is_same_file(&src, &dest) {
            // Copying a file onto itself truncates it.
            log::debug!("{} is already in the destination directory", src.display());
        } else {
            fs::copy(&src, &dest).map_err(|e| Error::storage(&dest, e))?;
            log::debug!("Copied {} to {}", src.display(), dest.display());
        }

        Ok(self.img_tag(filename, FILE_IMAGE_ALT))
    }

    fn img_tag(&self, filename: &str, alt: &str) -> String {
        format!(
            "<img src='{}/{}' alt='{}'>",
            self.reference_url, filename, alt
        )
    }
}

/// Stream image bytes into `path`. The file handle is flushed and closed
/// before this returns, whichever side fails.
fn write_stream(stream: &mut dyn Read, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::storage(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut buf = [0u8; COPY_BUFFER_SIZE];

    loop {
        let n = match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(Error::collaborator(
                    "image",
                    format!("failed to read image stream: {}", e),
                ))
            }
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| Error::storage(path, e))?;
    }

    writer.flush().map_err(|e| Error::storage(path, e))
}

/// Both paths resolve to the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            log::warn!("Failed to remove partial image {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::{self, Cursor};
    use std::rc::Rc;
    use tempfile::TempDir;

    struct FakeImages {
        calls: Rc<Cell<usize>>,
        fail: bool,
    }

    impl ImageService for FakeImages {
        fn fetch(&self, latex: &str) -> Result<Box<dyn Read>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(Error::collaborator("image", "status code 503"));
            }
            Ok(Box::new(Cursor::new(format!("GIF89a:{}", latex).into_bytes())))
        }
    }

    /// Yields a few bytes, then fails.
    struct BrokenStream {
        sent: bool,
    }

    impl Read for BrokenStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(ErrorKind::ConnectionReset, "reset"));
            }
            self.sent = true;
            buf[..3].copy_from_slice(b"GIF");
            Ok(3)
        }
    }

    struct BrokenImages;

    impl ImageService for BrokenImages {
        fn fetch(&self, _latex: &str) -> Result<Box<dyn Read>> {
            Ok(Box::new(BrokenStream { sent: false }))
        }
    }

    struct CountingIds(usize);

    impl IdGenerator for CountingIds {
        fn next_id(&mut self) -> String {
            self.0 += 1;
            format!("img{}", self.0)
        }
    }

    fn required(src: &Path, dest: &Path) -> RequiredOptions {
        RequiredOptions {
            source_dir: src.to_path_buf(),
            dest_dir: dest.to_path_buf(),
            reference_url: "/static/images/".to_string(),
            markup_endpoint: "http://localhost/katex".to_string(),
        }
    }

    fn resolver(
        dir: &TempDir,
        reuse: bool,
        service: Box<dyn ImageService>,
    ) -> ImageResolver {
        ImageResolver::new(
            &required(dir.path(), dir.path()),
            reuse,
            service,
            Box::new(CountingIds(0)),
        )
    }

    #[test]
    fn test_resolve_latex_writes_image() {
        let dir = TempDir::new().unwrap();
        let calls = Rc::new(Cell::new(0));
        let mut images = resolver(
            &dir,
            true,
            Box::new(FakeImages {
                calls: calls.clone(),
                fail: false,
            }),
        );

        let tag = images.resolve_latex("x^2").unwrap();
        assert_eq!(tag, "<img src='/static/images/img1.gif' alt='x^2'>");
        let written = fs::read(dir.path().join("img1.gif")).unwrap();
        assert_eq!(written, b"GIF89a:x^2");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_cache_hit_skips_service() {
        let dir = TempDir::new().unwrap();
        let calls = Rc::new(Cell::new(0));
        let mut images = resolver(
            &dir,
            true,
            Box::new(FakeImages {
                calls: calls.clone(),
                fail: false,
            }),
        );

        let first = images.resolve_latex("\\frac{1}{2}").unwrap();
        assert!(images.is_cached("\\frac{1}{2}"));
        let second = images.resolve_latex("\\frac{1}{2}").unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert_eq!(images.cache().len(), 1);
    }

    #[test]
    fn test_cache_key_is_exact() {
        let dir = TempDir::new().unwrap();
        let calls = Rc::new(Cell::new(0));
        let mut images = resolver(
            &dir,
            true,
            Box::new(FakeImages {
                calls: calls.clone(),
                fail: false,
            }),
        );

        images.resolve_latex("x^2").unwrap();
        images.resolve_latex("x^2 ").unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_reuse_disabled_always_calls_service() {
        let dir = TempDir::new().unwrap();
        let calls = Rc::new(Cell::new(0));
        let mut images = resolver(
            &dir,
            false,
            Box::new(FakeImages {
                calls: calls.clone(),
                fail: false,
            }),
        );

        let first = images.resolve_latex("x").unwrap();
        let second = images.resolve_latex("x").unwrap();
        assert_ne!(first, second);
        assert_eq!(calls.get(), 2);
        assert!(images.cache().is_empty());
        assert!(!images.is_cached("x"));
    }

    #[test]
    fn test_service_failure_not_cached() {
        let dir = TempDir::new().unwrap();
        let calls = Rc::new(Cell::new(0));
        let mut images = resolver(
            &dir,
            true,
            Box::new(FakeImages {
                calls: calls.clone(),
                fail: true,
            }),
        );

        let result = images.resolve_latex("x");
        assert!(matches!(result, Err(Error::Collaborator { .. })));
        assert!(images.cache().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_broken_stream_removes_partial_file() {
        let dir = TempDir::new().unwrap();
        let mut images = resolver(&dir, true, Box::new(BrokenImages));

        let result = images.resolve_latex("x");
        assert!(matches!(
            result,
            Err(Error::Collaborator { service: "image", .. })
        ));
        assert!(!dir.path().join("img1.gif").exists());
        assert!(images.cache().is_empty());
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut images = ImageResolver::new(
            &required(dir.path(), &missing),
            true,
            Box::new(FakeImages {
                calls: Rc::new(Cell::new(0)),
                fail: false,
            }),
            Box::new(CountingIds(0)),
        );

        let result = images.resolve_latex("x");
        assert!(matches!(result, Err(Error::Storage { .. })));
        assert!(images.cache().is_empty());
    }

    #[test]
    fn test_resolve_file_copies_and_overwrites() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(src.path().join("Bar.jpg"), b"new").unwrap();
        fs::write(dest.path().join("Bar.jpg"), b"old contents").unwrap();

        let images = ImageResolver::new(
            &required(src.path(), dest.path()),
            true,
            Box::new(BrokenImages),
            Box::new(CountingIds(0)),
        );

        let tag = images.resolve_file("Bar.jpg").unwrap();
        assert_eq!(
            tag,
            "<img src='/static/images/Bar.jpg' alt='Image of math content'>"
        );
        assert_eq!(fs::read(dest.path().join("Bar.jpg")).unwrap(), b"new");
    }

    #[test]
    fn test_resolve_file_same_file_through_alias() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Bar.jpg"), b"JPEGDATA").unwrap();

        let images = ImageResolver::new(
            &required(dir.path(), &dir.path().join(".")),
            true,
            Box::new(BrokenImages),
            Box::new(CountingIds(0)),
        );

        images.resolve_file("Bar.jpg").unwrap();
        assert_eq!(fs::read(dir.path().join("Bar.jpg")).unwrap(), b"JPEGDATA");
    }

    #[test]
    fn test_resolve_file_missing_source() {
        let dir = TempDir::new().unwrap();
        let images = resolver(&dir, true, Box::new(BrokenImages));

        match images.resolve_file("missing.png") {
            Err(Error::Storage { path, source }) => {
                assert!(path.ends_with("missing.png"));
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("Expected Storage error, got {:?}", other),
        }
    }
}
