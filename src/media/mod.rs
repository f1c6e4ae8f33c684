// SPDX-License-Identifier: MPL-2.0
//! Image entries and asynchronous size resolution.

pub mod size_loader;
pub mod types;

pub use size_loader::{FileSizeProvider, ImageSizeProvider, SizeProbe, SizeRequest};
pub use types::{ImageDescriptor, ImageEntry, ImageSource, SizeResult};
