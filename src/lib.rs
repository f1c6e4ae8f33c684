// SPDX-License-Identifier: MPL-2.0
//! `swipe_lens` is the gesture-to-transform engine behind a paged,
//! pinch-zoomable, swipe-dismissible image viewer overlay.
//!
//! The crate converts raw multi-touch samples and paging offsets into
//! per-image scale/translate state, decides when a vertical drag becomes a
//! dismiss gesture, and keeps the focused image's geometry consistent across
//! screen rotation and image-set changes. Rendering, the paging list widget,
//! and image decoding stay with the host; the engine only hands back
//! transform values, fade progress, and explicit host requests.

#![doc(html_root_url = "https://docs.rs/swipe_lens/0.1.0")]

pub mod config;
pub mod dismiss;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod media;
pub mod paging;
pub mod session;
pub mod transform;

#[cfg(test)]
mod test_utils;

pub use config::ViewerConfig;
pub use dismiss::{DismissOutcome, DismissProgress};
pub use error::{Error, Result};
pub use geometry::{FitParams, Viewport};
pub use gesture::GestureSample;
pub use media::{ImageDescriptor, ImageEntry, ImageSource, SizeResult};
pub use session::{HostRequest, RenderParams, ViewerSession};
pub use transform::TransformState;
