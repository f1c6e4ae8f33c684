// SPDX-License-Identifier: MPL-2.0
//! Core image-entry types.
//!
//! These are pure data without presentation dependencies. An entry's
//! identity is its index within the current image sequence; dimensions
//! arrive asynchronously and reconcile by that index, in any order.

use iced_core::Size;
use std::path::{Path, PathBuf};

/// Where an image's pixels live. The engine never dereferences sources
/// itself; they pass through to the size provider and the host renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk, probeable by the bundled [`crate::media::FileSizeProvider`].
    Path(PathBuf),
    /// An opaque identifier (e.g. a remote URL) only the host can resolve.
    Uri(String),
}

impl ImageSource {
    #[must_use]
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    /// Returns the file path for disk-backed sources.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) => Some(path),
            Self::Uri(_) => None,
        }
    }
}

/// Host-supplied description of one image: its source and, when the host
/// already knows it, the natural size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub source: ImageSource,
    pub size: Option<(u32, u32)>,
}

impl ImageDescriptor {
    /// An image whose size must be resolved asynchronously.
    #[must_use]
    pub fn new(source: ImageSource) -> Self {
        Self { source, size: None }
    }

    /// An image with a known natural size.
    #[must_use]
    pub fn with_size(source: ImageSource, width: u32, height: u32) -> Self {
        Self {
            source,
            size: Some((width, height)),
        }
    }
}

/// One entry of the viewer's image sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    source: ImageSource,
    width: Option<u32>,
    height: Option<u32>,
    loaded: bool,
    errored: bool,
    index: usize,
}

impl ImageEntry {
    #[must_use]
    pub fn new(descriptor: ImageDescriptor, index: usize) -> Self {
        let (width, height) = match descriptor.size {
            Some((w, h)) => (Some(w), Some(h)),
            None => (None, None),
        };
        Self {
            source: descriptor.source,
            width,
            height,
            loaded: false,
            errored: false,
            index,
        }
    }

    #[must_use]
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Natural size, once resolved to positive dimensions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // image dimensions fit f32 exactly up to 16M px
    pub fn dimensions(&self) -> Option<Size> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(Size::new(w as f32, h as f32)),
            _ => None,
        }
    }

    /// Whether geometry can be computed for this entry.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.errored && self.dimensions().is_some()
    }

    /// Whether the host reported the pixels as decoded and displayable.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn is_errored(&self) -> bool {
        self.errored
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = Some(width);
        self.height = Some(height);
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Marks the entry failed; geometry stops being computed for it and
    /// the error state is reported upward. Not a fatal condition.
    pub fn mark_errored(&mut self) {
        self.errored = true;
    }
}

/// A resolved natural size, keyed by the entry's original index so
/// results may arrive out of order or partially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeResult {
    pub index: usize,
    pub width: u32,
    pub height: u32,
}
