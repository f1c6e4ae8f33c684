// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all engine constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: pinch scale floor/ceiling conventions
//! - **Dismiss**: swipe-to-close thresholds and fade falloff
//! - **Paging**: page settle and scroll freeze distances
//! - **Glide**: auto-advance delay

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Conventional upper zoom ceiling (5× the fit scale).
///
/// Not applied unless a host opts in via `ViewerConfig::max_scale`; the
/// shipping default leaves pinch zoom unbounded above the fit scale.
pub const SCALE_MAXIMUM: f32 = 5.0;

/// Two scales closer than this are treated as equal when deciding whether
/// the image sits at its fit scale.
pub const SCALE_EPSILON: f32 = 1e-3;

// ==========================================================================
// Dismiss Defaults
// ==========================================================================

/// Vertical drag distance (logical px) past which a release commits to close.
pub const DEFAULT_DISMISS_DISTANCE: f32 = 60.0;

/// Background opacity lost per logical pixel of vertical drag.
/// The backdrop is fully transparent after roughly 300 px.
pub const DEFAULT_DISMISS_OPACITY_FALLOFF: f32 = 0.003;

/// Seconds of release velocity folded into the fling-out target.
pub const FLING_VELOCITY_PROJECTION: f32 = 0.2;

/// Duration of the fling-out animation the host is asked to run.
pub const DISMISS_FLING_DURATION_MS: u64 = 200;

/// Default backdrop color (opaque black), as linear RGB components.
pub const DEFAULT_BACKGROUND_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

// ==========================================================================
// Paging Defaults
// ==========================================================================

/// A scroll offset within this distance of a page boundary counts as
/// settling rather than mid-swipe.
pub const PAGE_SETTLE_DISTANCE: f32 = 10.0;

/// Vertical drag distance past which the host pager is asked to stop
/// scrolling, so the drag owns the dismiss axis.
pub const FREEZE_SCROLL_DISTANCE: f32 = 15.0;

// ==========================================================================
// Glide Defaults
// ==========================================================================

/// Delay before an auto-advance (glide) to the next page is requested.
pub const DEFAULT_GLIDE_DELAY_MS: u64 = 75;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Zoom validation
    assert!(SCALE_MAXIMUM > 1.0);
    assert!(SCALE_EPSILON > 0.0);

    // Dismiss validation
    assert!(DEFAULT_DISMISS_DISTANCE > 0.0);
    assert!(DEFAULT_DISMISS_OPACITY_FALLOFF > 0.0);
    assert!(FLING_VELOCITY_PROJECTION > 0.0);
    assert!(DISMISS_FLING_DURATION_MS > 0);

    // Paging validation
    assert!(PAGE_SETTLE_DISTANCE > 0.0);
    assert!(FREEZE_SCROLL_DISTANCE > PAGE_SETTLE_DISTANCE);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_defaults_are_valid() {
        assert_eq!(DEFAULT_DISMISS_DISTANCE, 60.0);
        assert!(DEFAULT_DISMISS_OPACITY_FALLOFF > 0.0);
        // Fully faded well before a full screen height of drag.
        assert!(1.0 / DEFAULT_DISMISS_OPACITY_FALLOFF < 400.0);
    }

    #[test]
    fn paging_defaults_are_valid() {
        assert_eq!(PAGE_SETTLE_DISTANCE, 10.0);
        assert_eq!(FREEZE_SCROLL_DISTANCE, 15.0);
    }

    #[test]
    fn zoom_defaults_are_valid() {
        assert_eq!(SCALE_MAXIMUM, 5.0);
        assert!(SCALE_EPSILON < 0.01);
    }
}
