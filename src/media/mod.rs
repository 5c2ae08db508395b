/// Local media handling
///
/// This module handles:
/// - Preview handles for staged attachments (preview.rs)
/// - Rendering and caching preview thumbnails to disk

pub mod preview;

pub use preview::{PreviewCache, PreviewHandle, PreviewId, RenderJob};
