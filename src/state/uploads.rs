/// Staged image attachments for a listing
///
/// Each entry pairs the selected file with its preview handle, so the
/// file list and the preview list can never drift apart. The batch is
/// also the single owner of the overflow flag.

use tracing::{debug, info};

use super::data::SelectedFile;
use crate::media::{PreviewCache, PreviewHandle, PreviewId, RenderJob};

/// Maximum number of images attached to one listing
pub const MAX_IMAGE_COUNT: usize = 5;

/// One staged attachment
#[derive(Debug)]
pub struct StagedImage {
    pub file: SelectedFile,
    pub preview: PreviewHandle,
}

/// Result of adding a picker selection to the batch
#[derive(Debug, Default)]
pub struct AddOutcome {
    /// Thumbnails to render for the newly staged entries
    pub jobs: Vec<RenderJob>,
    /// Number of selected files that did not fit
    pub dropped: usize,
}

impl AddOutcome {
    pub fn added(&self) -> usize {
        self.jobs.len()
    }
}

#[derive(Debug)]
pub struct UploadBatch {
    entries: Vec<StagedImage>,
    max: usize,
    /// True while the "too many images" modal is shown
    overflow: bool,
}

impl Default for UploadBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::with_capacity_limit(MAX_IMAGE_COUNT)
    }

    pub fn with_capacity_limit(max: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max),
            max,
            overflow: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.entries.len())
    }

    pub fn overflow(&self) -> bool {
        self.overflow
    }

    pub fn entries(&self) -> &[StagedImage] {
        &self.entries
    }

    #[cfg(test)]
    pub fn files(&self) -> impl Iterator<Item = &SelectedFile> {
        self.entries.iter().map(|entry| &entry.file)
    }

    #[cfg(test)]
    pub fn previews(&self) -> impl Iterator<Item = &PreviewHandle> {
        self.entries.iter().map(|entry| &entry.preview)
    }

    /// Stage a picker selection.
    ///
    /// Files are kept in picker order. If they do not all fit, only the
    /// first `remaining()` are staged, the rest are dropped and the
    /// overflow flag is raised. Existing entries are never touched.
    /// Dropped files never get a preview handle.
    pub fn add(&mut self, files: Vec<SelectedFile>, previews: &mut PreviewCache) -> AddOutcome {
        let remaining = self.remaining();
        let dropped = files.len().saturating_sub(remaining);

        if dropped > 0 {
            self.overflow = true;
            info!(
                selected = files.len(),
                dropped,
                max = self.max,
                "image selection exceeds attachment limit"
            );
        }

        let mut jobs = Vec::with_capacity(files.len() - dropped);
        for file in files.into_iter().take(remaining) {
            let preview = previews.acquire(file.path());
            debug!(file = %file.name, preview = %preview.id(), "staged image");
            jobs.push(preview.render_job());
            self.entries.push(StagedImage { file, preview });
        }

        debug_assert!(self.entries.len() <= self.max);
        AddOutcome { jobs, dropped }
    }

    /// Remove the entry at `index`, releasing its preview.
    /// Entries after `index` shift left by one.
    pub fn remove(&mut self, index: usize) -> Option<SelectedFile> {
        if index >= self.entries.len() {
            return None;
        }

        let StagedImage { file, preview } = self.entries.remove(index);
        drop(preview);

        if self.entries.len() < self.max {
            self.overflow = false;
        }

        debug!(file = %file.name, index, "removed staged image");
        Some(file)
    }

    /// Close the overflow modal. The batch itself is unchanged.
    pub fn dismiss_overflow(&mut self) {
        self.overflow = false;
    }

    /// Mark the preview with `id` as rendered.
    /// Returns false if no staged entry owns that preview anymore.
    pub fn mark_preview_ready(&mut self, id: PreviewId) -> bool {
        match self.entries.iter_mut().find(|entry| entry.preview.id() == id) {
            Some(entry) => {
                entry.preview.mark_ready();
                true
            }
            None => false,
        }
    }
}
