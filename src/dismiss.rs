// SPDX-License-Identifier: MPL-2.0
//! Swipe-to-close state and the commit/snap-back decision.
//!
//! While a vertical drag is in progress the controller tracks the offset
//! and fades the backdrop; on release it either commits to closing the
//! viewer (handing the host a fling target and duration to animate) or
//! snaps everything back. The distance threshold is a hard cutoff: a
//! slow drag past it closes, a fast flick short of it does not.

use crate::config::{DISMISS_FLING_DURATION_MS, FLING_VELOCITY_PROJECTION};
use iced_core::Color;
use std::time::Duration;

/// Live progress of a dismiss drag.
///
/// Created when the drag starts, destroyed on release (committed or
/// snapped back). `opacity` is the backdrop opacity: 1 at rest, falling
/// toward 0 as the image is dragged away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DismissProgress {
    pub vertical_offset: f32,
    pub opacity: f32,
    pub committing: bool,
}

/// Release decision for a dismiss drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DismissOutcome {
    /// Close the viewer: the host animates translate-y to `target_y`
    /// over `duration`, then the close request fires.
    Commit { target_y: f32, duration: Duration },
    /// Not far enough: restore opacity to 1 and translate-y to 0.
    SnapBack,
}

/// Converts vertical drag distance and velocity into backdrop fade and
/// the commit-to-close decision.
#[derive(Debug, Clone)]
pub struct DismissController {
    distance_threshold: f32,
    opacity_falloff: f32,
    progress: Option<DismissProgress>,
}

impl DismissController {
    #[must_use]
    pub fn new(distance_threshold: f32, opacity_falloff: f32) -> Self {
        Self {
            distance_threshold,
            opacity_falloff,
            progress: None,
        }
    }

    /// Starts tracking a dismiss drag.
    pub fn begin(&mut self) {
        self.progress = Some(DismissProgress {
            vertical_offset: 0.0,
            opacity: 1.0,
            committing: false,
        });
    }

    /// Tracks one move sample. The translate follows `dy` 1:1 (no
    /// resistance curve) and the backdrop fades linearly with distance.
    pub fn on_move(&mut self, dy: f32) {
        let opacity = (1.0 - dy.abs() * self.opacity_falloff).clamp(0.0, 1.0);
        if let Some(progress) = &mut self.progress {
            if progress.committing {
                return;
            }
            progress.vertical_offset = dy;
            progress.opacity = opacity;
        }
    }

    /// Decides the release: commit when the drag crossed the distance
    /// threshold and the pager is not mid-momentum-scroll, snap back
    /// otherwise.
    pub fn on_release(&mut self, dy: f32, vy: f32, momentum_scrolling: bool) -> DismissOutcome {
        let past_threshold = dy.abs() >= self.distance_threshold;

        if past_threshold && !momentum_scrolling {
            if let Some(progress) = &mut self.progress {
                progress.committing = true;
            }
            log::debug!("dismiss commit at dy={dy} vy={vy}");
            DismissOutcome::Commit {
                target_y: dy + FLING_VELOCITY_PROJECTION * vy,
                duration: Duration::from_millis(DISMISS_FLING_DURATION_MS),
            }
        } else {
            self.progress = None;
            DismissOutcome::SnapBack
        }
    }

    /// Drops any in-flight drag without a release decision (teardown,
    /// page change).
    pub fn cancel(&mut self) {
        self.progress = None;
    }

    /// Whether a dismiss drag is currently tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.progress.is_some()
    }

    /// Whether the release decision already committed to closing.
    #[must_use]
    pub fn is_committing(&self) -> bool {
        self.progress.is_some_and(|p| p.committing)
    }

    #[must_use]
    pub fn progress(&self) -> Option<DismissProgress> {
        self.progress
    }

    /// Backdrop color with the current fade applied, for host chrome that
    /// fades in sync with the drag.
    #[must_use]
    pub fn background(&self, base: Color) -> Color {
        let opacity = self.progress.map_or(1.0, |p| p.opacity);
        Color { a: opacity, ..base }
    }
}
