// SPDX-License-Identifier: MPL-2.0
//! Asynchronous image size resolution.
//!
//! The session never blocks on sizes: it emits a resolve request, and the
//! host feeds results back through
//! [`crate::session::ViewerSession::apply_size_results`] with the session
//! generation it captured at request time. [`FileSizeProvider`] is the
//! bundled implementation for disk-backed sources; it reads only the
//! image header off-thread, never the full pixel data.

use crate::error::{Error, Result};
use crate::media::types::{ImageSource, SizeResult};
use futures_util::future::join_all;
use std::future::Future;
use std::path::PathBuf;

/// One entry the session wants a size for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRequest {
    pub index: usize,
    pub source: ImageSource,
}

/// Outcome of probing one entry. Failures are per-entry and map to the
/// errored state; a bad file never poisons the batch.
#[derive(Debug, Clone)]
pub struct SizeProbe {
    pub index: usize,
    pub result: Result<(u32, u32)>,
}

impl SizeProbe {
    /// Converts a successful probe into the session's merge format.
    #[must_use]
    pub fn ok(&self) -> Option<SizeResult> {
        self.result.as_ref().ok().map(|&(width, height)| SizeResult {
            index: self.index,
            width,
            height,
        })
    }
}

/// Resolves natural image sizes for a batch of entries.
///
/// Implementations may return results partially and in any order; entries
/// absent from the output simply stay "not ready".
pub trait ImageSizeProvider {
    fn resolve_sizes(
        &self,
        requests: Vec<SizeRequest>,
    ) -> impl Future<Output = Vec<SizeProbe>> + Send;
}

/// Size provider for disk-backed sources.
///
/// Header probing is synchronous file I/O, so each probe runs on the
/// blocking pool the way the viewer's other media loads do.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSizeProvider;

impl FileSizeProvider {
    async fn probe(index: usize, path: PathBuf) -> SizeProbe {
        let result = tokio::task::spawn_blocking(move || {
            image_rs::image_dimensions(&path).map_err(Error::from)
        })
        .await
        .unwrap_or_else(|join_error| Err(Error::Probe(join_error.to_string())));

        SizeProbe { index, result }
    }
}

impl ImageSizeProvider for FileSizeProvider {
    async fn resolve_sizes(&self, requests: Vec<SizeRequest>) -> Vec<SizeProbe> {
        let probes = requests.into_iter().map(|request| {
            let index = request.index;
            async move {
                match request.source.as_path() {
                    Some(path) => Self::probe(index, path.to_path_buf()).await,
                    None => SizeProbe {
                        index,
                        result: Err(Error::Probe(
                            "source is not a file path".to_string(),
                        )),
                    },
                }
            }
        });

        join_all(probes).await
    }
}
