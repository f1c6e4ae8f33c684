// SPDX-License-Identifier: MPL-2.0
//! Gesture classification state machine.
//!
//! Phases move `Idle → SinglePointer → MultiPointer → Idle`. The
//! `SinglePointer → MultiPointer` edge mid-gesture *rebases* the pinch
//! baseline (a fresh touch set, inter-finger distance, and reference
//! scale) so the zoom does not jump when a second finger lands late.
//! Dropping back to one finger returns to `SinglePointer`; a later second
//! finger rebases again.

use crate::geometry::{scales_are_equal, FitParams, Viewport};
use crate::gesture::{touch_distance, GestureSample};
use iced_core::{Point, Size};

/// Classification phase of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    SinglePointer,
    MultiPointer,
}

/// Per-sample context the session hands to [`GestureInterpreter::on_move`].
#[derive(Debug, Clone, Copy)]
pub struct MoveContext {
    /// Scale the focused image currently renders at.
    pub current_scale: f32,
    /// Rest-state geometry of the focused image.
    pub fit: FitParams,
    /// Natural size of the focused image, if resolved.
    pub image_size: Option<Size>,
    pub viewport: Viewport,
    pub pinch_enabled: bool,
    pub swipe_close_enabled: bool,
    /// Zoom ceiling as a multiple of the fit scale; `None` is unbounded.
    pub max_scale: Option<f32>,
    /// Whether a dismiss drag is already in progress.
    pub dismiss_active: bool,
}

/// What one move sample is allowed to do to the viewer state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureUpdate {
    /// Apply the sample's dx to translate-x.
    pub pan_x: bool,
    /// Apply the sample's dy to translate-y (vertical overflow to pan
    /// through, or a dismiss drag tracking the finger).
    pub pan_y: bool,
    /// Route the sample's dy to the dismiss controller.
    pub dismiss_drag: bool,
    /// Clamped pinch candidate scale, when this sample pinches.
    pub pinch_scale: Option<f32>,
}

/// Classifies touch samples into pan/pinch updates.
///
/// Owns the pinch baseline (initial touches, inter-finger distance,
/// reference scale) and the transient zoomed flag the host uses to
/// suppress chrome while an image is pinched above its fit scale.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    phase: GesturePhase,
    initial_touches: Vec<Point>,
    reference_scale: f32,
    zoomed: bool,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureInterpreter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
            initial_touches: Vec::new(),
            reference_scale: 1.0,
            zoomed: false,
        }
    }

    /// Begins a gesture, capturing the pinch baseline at the current scale.
    pub fn on_start(&mut self, touches: &[Point], current_scale: f32) {
        self.rebase(touches, current_scale);
        self.phase = if touches.len() >= 2 {
            GesturePhase::MultiPointer
        } else {
            GesturePhase::SinglePointer
        };
    }

    /// Classifies one move sample.
    ///
    /// Returns the default (all-noop) update when no gesture is active;
    /// a stray move without a start is ignored rather than an error.
    pub fn on_move(&mut self, sample: &GestureSample, ctx: &MoveContext) -> GestureUpdate {
        if self.phase == GesturePhase::Idle {
            return GestureUpdate::default();
        }

        // A second finger landing mid-gesture rebases the baseline so the
        // pinch ratio starts from 1 at the current scale.
        if self.phase == GesturePhase::SinglePointer && sample.touches.len() >= 2 {
            self.rebase(&sample.touches, ctx.current_scale);
            self.phase = GesturePhase::MultiPointer;
        } else if self.phase == GesturePhase::MultiPointer && sample.touches.len() < 2 {
            self.rebase(&sample.touches, ctx.current_scale);
            self.phase = GesturePhase::SinglePointer;
        }

        let mut update = GestureUpdate {
            pan_x: !scales_are_equal(ctx.current_scale, ctx.fit.scale),
            ..GestureUpdate::default()
        };

        let scaled_height = ctx
            .image_size
            .map(|size| size.height * ctx.current_scale)
            .unwrap_or(0.0);
        let fit_height = ctx
            .image_size
            .map(|size| size.height * ctx.fit.scale)
            .unwrap_or(0.0);

        // Vertical pan needs overflow to pan through, unless a dismiss
        // drag already owns the axis.
        update.pan_y = scaled_height > ctx.viewport.height || ctx.dismiss_active;

        update.dismiss_drag = ctx.swipe_close_enabled
            && scales_are_equal(ctx.current_scale, ctx.fit.scale)
            && ctx.image_size.is_some()
            && fit_height < ctx.viewport.height;

        update.pinch_scale = self.pinch_candidate(sample, ctx);
        if let Some(scale) = update.pinch_scale {
            if !scales_are_equal(scale, ctx.fit.scale) {
                self.zoomed = true;
            }
        }

        update
    }

    /// Ends the gesture: scale snaps back to fit (the session applies it),
    /// the zoomed flag and baseline are cleared.
    pub fn on_release(&mut self) {
        self.phase = GesturePhase::Idle;
        self.initial_touches.clear();
        self.zoomed = false;
    }

    /// Whether the focused image is pinched above its fit scale.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Scale captured at gesture or rebase start; pinch ratios anchor here.
    #[must_use]
    pub fn reference_scale(&self) -> f32 {
        self.reference_scale
    }

    fn rebase(&mut self, touches: &[Point], current_scale: f32) {
        self.initial_touches = touches.to_vec();
        self.reference_scale = current_scale;
    }

    fn pinch_candidate(&self, sample: &GestureSample, ctx: &MoveContext) -> Option<f32> {
        if !ctx.pinch_enabled || sample.touches.len() < 2 {
            return None;
        }

        // Coincident fingers make the ratio undefined; skip this sample
        // and resume on the next one.
        let initial_distance = touch_distance(&self.initial_touches);
        if initial_distance == 0.0 {
            return None;
        }
        let current_distance = touch_distance(&sample.touches);
        if current_distance == 0.0 {
            return None;
        }

        let ratio = current_distance / initial_distance;
        let mut candidate = ratio * self.reference_scale;

        if candidate < ctx.fit.scale {
            candidate = ctx.fit.scale;
        }
        if let Some(max) = ctx.max_scale {
            candidate = candidate.min(max * ctx.fit.scale);
        }

        Some(candidate)
    }
}
