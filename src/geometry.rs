// SPDX-License-Identifier: MPL-2.0
//! Rest-state geometry for images inside the viewport.
//!
//! [`resolve`] is the single entry point: given an image's natural size and
//! the viewport, it computes the fit scale and centering translate. It is a
//! pure function with no caching and no side effects, so callers are free to
//! memoize per image index and recompute wholesale on viewport changes.

use crate::config::SCALE_EPSILON;
use iced_core::{Size, Vector};

/// Screen dimensions in logical pixels. Replaced wholesale on rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Creates a new viewport.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns whether both dimensions are positive and finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl From<Size> for Viewport {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Rest-state geometry for one image at one viewport: the scale that fits
/// the image and the translate that centers it.
///
/// Invariant: `scale > 0`. A degenerate value (`scale = 1`, origin
/// translate) stands in while an image's size is unresolved; readiness is
/// reported separately, never inferred from the geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub scale: f32,
    pub translate: Vector,
}

impl FitParams {
    /// The placeholder geometry used while an image's size is unknown.
    #[must_use]
    pub fn not_ready() -> Self {
        Self {
            scale: 1.0,
            translate: Vector::new(0.0, 0.0),
        }
    }

    /// Returns the image size after applying the fit scale.
    #[must_use]
    pub fn scaled_size(&self, image: Size) -> Size {
        Size::new(image.width * self.scale, image.height * self.scale)
    }
}

/// Computes the fit scale and centering translate for an image.
///
/// The image is scaled to fit entirely within the viewport preserving
/// aspect ratio, and never scaled above natural size, unless
/// `upscale_small` is set, in which case images that fit entirely inside
/// the viewport are scaled up until the dominant axis (the one with the
/// smaller gap) meets the viewport edge.
///
/// Missing or non-positive dimensions yield [`FitParams::not_ready`]
/// rather than an error; the host hides such images until their size
/// resolves.
#[must_use]
pub fn resolve(image: Option<Size>, viewport: Viewport, upscale_small: bool) -> FitParams {
    let Some(image) = image else {
        return FitParams::not_ready();
    };

    if image.width <= 0.0 || image.height <= 0.0 || !viewport.is_valid() {
        return FitParams::not_ready();
    }

    let scale_x = viewport.width / image.width;
    let scale_y = viewport.height / image.height;
    let fit = scale_x.min(scale_y);

    if !fit.is_finite() || fit <= 0.0 {
        return FitParams::not_ready();
    }

    // Small images stay at natural size unless the host opted into
    // upscaling; then the min ratio already picks the dominant axis.
    let scale = if upscale_small { fit } else { fit.min(1.0) };

    let scaled_width = image.width * scale;
    let scaled_height = image.height * scale;

    FitParams {
        scale,
        translate: Vector::new(
            (viewport.width - scaled_width) / 2.0,
            (viewport.height - scaled_height) / 2.0,
        ),
    }
}

/// Returns whether two scales are close enough to count as the same zoom
/// level. Gesture math accumulates float error, so exact equality is the
/// wrong test.
#[must_use]
pub fn scales_are_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < SCALE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    const VIEWPORT: Viewport = Viewport {
        width: 400.0,
        height: 300.0,
    };

    #[test]
    fn resolve_fits_landscape_image() {
        let fit = resolve(Some(Size::new(800.0, 300.0)), VIEWPORT, false);

        assert_abs_diff_eq!(fit.scale, 0.5);
        assert_abs_diff_eq!(fit.translate.x, 0.0);
        // 300 * 0.5 = 150, centered in 300 leaves 75 above and below.
        assert_abs_diff_eq!(fit.translate.y, 75.0);
    }

    #[test]
    fn resolve_fits_portrait_image() {
        let fit = resolve(Some(Size::new(300.0, 600.0)), VIEWPORT, false);

        assert_abs_diff_eq!(fit.scale, 0.5);
        assert_abs_diff_eq!(fit.translate.x, 125.0);
        assert_abs_diff_eq!(fit.translate.y, 0.0);
    }

    #[test]
    fn resolve_never_upscales_by_default() {
        let fit = resolve(Some(Size::new(100.0, 50.0)), VIEWPORT, false);

        assert_abs_diff_eq!(fit.scale, 1.0);
        assert_abs_diff_eq!(fit.translate.x, 150.0);
        assert_abs_diff_eq!(fit.translate.y, 125.0);
    }

    #[test]
    fn resolve_upscales_small_image_to_dominant_axis() {
        let fit = resolve(Some(Size::new(100.0, 50.0)), VIEWPORT, true);

        // Width gap is smaller (4x vs 6x), so width becomes the dominant axis.
        assert_abs_diff_eq!(fit.scale, 4.0);
        assert_abs_diff_eq!(fit.translate.x, 0.0);
        assert_abs_diff_eq!(fit.translate.y, 50.0);
    }

    #[test]
    fn resolve_is_idempotent() {
        let size = Some(Size::new(123.0, 457.0));
        let first = resolve(size, VIEWPORT, false);
        let second = resolve(size, VIEWPORT, false);
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_fit_invariant_holds() {
        let cases = [
            (1.0_f32, 1.0_f32),
            (37.0, 4503.0),
            (4096.0, 4096.0),
            (399.0, 299.0),
            (400.0, 300.0),
            (401.0, 301.0),
        ];
        for (w, h) in cases {
            let fit = resolve(Some(Size::new(w, h)), VIEWPORT, false);
            assert!(fit.scale * w <= VIEWPORT.width + f32::EPSILON, "w={w} h={h}");
            assert!(
                fit.scale * h <= VIEWPORT.height + f32::EPSILON,
                "w={w} h={h}"
            );
        }
    }

    #[test]
    fn resolve_missing_size_is_not_ready() {
        let fit = resolve(None, VIEWPORT, false);
        assert_eq!(fit, FitParams::not_ready());
    }

    #[test]
    fn resolve_zero_size_is_not_ready() {
        let fit = resolve(Some(Size::new(0.0, 100.0)), VIEWPORT, false);
        assert_eq!(fit, FitParams::not_ready());
    }

    #[test]
    fn resolve_invalid_viewport_is_not_ready() {
        let fit = resolve(
            Some(Size::new(100.0, 100.0)),
            Viewport::new(0.0, 300.0),
            false,
        );
        assert_eq!(fit, FitParams::not_ready());
    }

    #[test]
    fn scales_within_epsilon_are_equal() {
        assert!(scales_are_equal(1.0, 1.0005));
        assert!(!scales_are_equal(1.0, 1.01));
    }
}
