use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// Size of generated preview thumbnails (square bound)
const THUMBNAIL_SIZE: u32 = 256;

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("could not determine a cache directory")]
    NoCacheDir,
    #[error("preview cache I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("could not save thumbnail {path}: {source}")]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("thumbnail task failed: {0}")]
    Join(String),
}

/// Identifies one preview handle for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(u64);

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out preview handles backed by thumbnail files.
///
/// Each cache owns a private session directory under the shared root,
/// so several running editors never see each other's thumbnails. The
/// session directory is removed when the cache is dropped.
#[derive(Debug)]
pub struct PreviewCache {
    session: TempDir,
    next_id: u64,
}

impl PreviewCache {
    /// Open the preview cache in the user's cache directory.
    ///
    /// - Linux: ~/.cache/listing-editor/previews
    /// - macOS: ~/Library/Caches/listing-editor/previews
    /// - Windows: %LOCALAPPDATA%\listing-editor\previews
    pub fn open() -> Result<Self, PreviewError> {
        let mut dir = dirs_next::cache_dir()
            .or_else(dirs_next::home_dir)
            .ok_or(PreviewError::NoCacheDir)?;

        dir.push("listing-editor");
        dir.push("previews");

        Self::in_dir(dir)
    }

    /// Open a preview cache with a fresh session directory under `root`,
    /// creating `root` if needed. Other sessions under `root` are left alone.
    pub fn in_dir(root: impl Into<PathBuf>) -> Result<Self, PreviewError> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let session = tempfile::Builder::new()
            .prefix("session-")
            .tempdir_in(&root)?;
        debug!(dir = %session.path().display(), "opened preview session");

        Ok(PreviewCache { session, next_id: 0 })
    }

    /// This session's directory
    pub fn dir(&self) -> &Path {
        self.session.path()
    }

    /// Create a new handle for `source`. The thumbnail is not rendered
    /// yet; run the handle's `render_job` to produce it.
    pub fn acquire(&mut self, source: &Path) -> PreviewHandle {
        let id = PreviewId(self.next_id);
        self.next_id += 1;

        PreviewHandle {
            id,
            source: source.to_path_buf(),
            thumbnail: self.dir().join(format!("{}.png", id)),
            image: None,
        }
    }
}

/// A displayable preview of a staged file.
///
/// Owns its thumbnail file: dropping the handle deletes it.
pub struct PreviewHandle {
    id: PreviewId,
    source: PathBuf,
    thumbnail: PathBuf,
    /// Set once the thumbnail has been rendered
    image: Option<Handle>,
}

impl PreviewHandle {
    pub fn id(&self) -> PreviewId {
        self.id
    }

    #[cfg(test)]
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn thumbnail_path(&self) -> &Path {
        &self.thumbnail
    }

    /// The rendered thumbnail, if it is ready
    pub fn image(&self) -> Option<&Handle> {
        self.image.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    /// Mark the thumbnail file as rendered and load it for display
    pub fn mark_ready(&mut self) {
        self.image = Some(Handle::from_path(&self.thumbnail));
    }

    /// Work item for rendering this handle's thumbnail off the UI thread
    pub fn render_job(&self) -> RenderJob {
        RenderJob {
            id: self.id,
            source: self.source.clone(),
            dest: self.thumbnail.clone(),
        }
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        release_thumbnail(&self.thumbnail);
    }
}

/// Remove a thumbnail file that no handle owns anymore
pub fn release_thumbnail(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "released preview"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to release preview"),
    }
}

/// Everything needed to render one thumbnail without borrowing the handle
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub id: PreviewId,
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl RenderJob {
    /// Decode the source image, downscale it and write the thumbnail.
    /// Returns the thumbnail path on success.
    pub async fn run(self) -> Result<PathBuf, PreviewError> {
        // Decoding is CPU-bound
        tokio::task::spawn_blocking(move || render_thumbnail_blocking(&self.source, &self.dest))
            .await
            .map_err(|e| PreviewError::Join(e.to_string()))?
    }
}

fn render_thumbnail_blocking(source: &Path, dest: &Path) -> Result<PathBuf, PreviewError> {
    let img = image::open(source).map_err(|source_err| PreviewError::Decode {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);

    thumbnail.save(dest).map_err(|e| PreviewError::Save {
        path: dest.to_path_buf(),
        source: e,
    })?;

    debug!(source = %source.display(), dest = %dest.display(), "rendered preview thumbnail");
    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_hands_out_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PreviewCache::in_dir(dir.path()).unwrap();

        let a = cache.acquire(Path::new("/photos/a.jpg"));
        let b = cache.acquire(Path::new("/photos/b.jpg"));

        assert_ne!(a.id(), b.id());
        assert_ne!(a.thumbnail_path(), b.thumbnail_path());
        assert!(a.thumbnail_path().starts_with(dir.path()));
        assert!(!a.is_ready());
    }

    #[test]
    fn test_drop_deletes_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PreviewCache::in_dir(dir.path()).unwrap();

        let handle = cache.acquire(Path::new("/photos/a.jpg"));
        let thumbnail = handle.thumbnail_path().to_path_buf();
        fs::write(&thumbnail, b"not really a png").unwrap();

        drop(handle);

        assert!(!thumbnail.exists());
    }

    #[test]
    fn test_caches_sharing_a_root_stay_apart() {
        let root = tempfile::tempdir().unwrap();
        let mut first = PreviewCache::in_dir(root.path()).unwrap();
        let a = first.acquire(Path::new("/photos/a.jpg"));
        fs::write(a.thumbnail_path(), b"first thumb").unwrap();

        let mut second = PreviewCache::in_dir(root.path()).unwrap();
        let b = second.acquire(Path::new("/photos/b.jpg"));
        fs::write(b.thumbnail_path(), b"second thumb").unwrap();

        assert_ne!(first.dir(), second.dir());
        assert_ne!(a.thumbnail_path(), b.thumbnail_path());
        assert_eq!(fs::read(a.thumbnail_path()).unwrap(), b"first thumb");

        drop(b);
        assert!(a.thumbnail_path().exists());
        assert_eq!(fs::read(a.thumbnail_path()).unwrap(), b"first thumb");
    }

    #[test]
    fn test_dropping_cache_removes_its_session_only() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("notes.txt"), b"keep").unwrap();
        let first = PreviewCache::in_dir(root.path()).unwrap();
        let second = PreviewCache::in_dir(root.path()).unwrap();
        let first_dir = first.dir().to_path_buf();

        drop(first);

        assert!(!first_dir.exists());
        assert!(second.dir().exists());
        assert!(root.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_render_job_writes_downscaled_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        image::RgbImage::from_pixel(600, 300, image::Rgb([200, 120, 40]))
            .save(&source)
            .unwrap();

        let mut cache = PreviewCache::in_dir(dir.path().join("previews")).unwrap();
        let handle = cache.acquire(&source);

        let written = handle.render_job().run().await.unwrap();

        assert_eq!(written, handle.thumbnail_path());
        let thumb = image::open(&written).unwrap();
        assert_eq!(thumb.width(), THUMBNAIL_SIZE);
        assert_eq!(thumb.height(), THUMBNAIL_SIZE / 2);
    }

    #[tokio::test]
    async fn test_render_job_reports_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("manual.pdf");
        fs::write(&source, b"%PDF-1.7").unwrap();

        let mut cache = PreviewCache::in_dir(dir.path().join("previews")).unwrap();
        let handle = cache.acquire(&source);

        let err = handle.render_job().run().await.unwrap_err();
        assert!(matches!(err, PreviewError::Decode { .. }));
        assert!(!handle.thumbnail_path().exists());
    }
}
