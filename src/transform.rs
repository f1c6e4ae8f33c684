// SPDX-License-Identifier: MPL-2.0
//! Transform state for the focused image.
//!
//! A [`TransformState`] is a plain snapshot of {scale, translate}; the
//! session replaces it wholesale as gestures progress, and the rendering
//! host interpolates toward it. Animation timing never lives here.
//!
//! The clamp math keeps a panned image inside its legal translate range:
//! a zoomed image may be dragged edge-to-edge but never off-screen, and an
//! axis without overflow snaps back to center.

use crate::geometry::{scales_are_equal, FitParams, Viewport};
use iced_core::{Size, Vector};

/// Scale and translate of the currently focused image.
///
/// Invariant: `scale` never drops below the image's fit scale; the pinch
/// floor in the gesture interpreter and the reset paths in the session
/// both maintain this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub scale: f32,
    pub translate: Vector,
}

impl TransformState {
    /// Creates the rest-state transform for an image's fit geometry.
    #[must_use]
    pub fn from_fit(fit: &FitParams) -> Self {
        Self {
            scale: fit.scale,
            translate: fit.translate,
        }
    }

    /// Returns whether the image currently sits at its fit scale.
    #[must_use]
    pub fn is_at_fit(&self, fit: &FitParams) -> bool {
        scales_are_equal(self.scale, fit.scale)
    }

    /// Returns the image size after applying the current scale.
    #[must_use]
    pub fn scaled_size(&self, image: Size) -> Size {
        Size::new(image.width * self.scale, image.height * self.scale)
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::from_fit(&FitParams::not_ready())
    }
}

/// Clamps a candidate translate to the legal range for the given scale.
///
/// Per axis: if the scaled image overflows the viewport, the translate may
/// range from "far edge flush" to "near edge flush"; otherwise the axis
/// recenters, so a pan can never strand a small image off to one side.
#[must_use]
pub fn clamp_translate(
    candidate: Vector,
    scale: f32,
    image: Size,
    viewport: Viewport,
) -> Vector {
    Vector::new(
        clamp_axis(candidate.x, image.width * scale, viewport.width),
        clamp_axis(candidate.y, image.height * scale, viewport.height),
    )
}

fn clamp_axis(candidate: f32, scaled: f32, screen: f32) -> f32 {
    if scaled <= screen {
        (screen - scaled) / 2.0
    } else {
        candidate.clamp(screen - scaled, 0.0)
    }
}

/// Rescales a transform around the viewport-centered image midpoint.
///
/// Keeping the image's visual center fixed while the scale changes is what
/// makes a pinch feel anchored instead of drifting toward the top-left
/// corner of the scaled-space model.
#[must_use]
pub fn rescale_about_center(transform: &TransformState, new_scale: f32, image: Size) -> Vector {
    let old = transform.scaled_size(image);
    Vector::new(
        transform.translate.x + (old.width - image.width * new_scale) / 2.0,
        transform.translate.y + (old.height - image.height * new_scale) / 2.0,
    )
}
