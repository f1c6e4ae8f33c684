// SPDX-License-Identifier: MPL-2.0
//! The viewer session orchestrator.
//!
//! A [`ViewerSession`] owns the state of one "open" lifecycle: the image
//! sequence, the focused index, the focused image's transform, dismiss
//! progress, and the fit-geometry cache. The host drives it with gesture,
//! scroll, viewport, and size-resolution events, reads transforms back,
//! and drains an explicit queue of [`HostRequest`]s for everything the
//! engine cannot do itself (seeking the pager, scheduling timers,
//! resolving sizes, closing).
//!
//! All entry points are synchronous and run on the host's event thread;
//! the only asynchronous collaborator is size resolution, reconciled by
//! session generation so stale results are discarded instead of applied
//! to a newer lifecycle.

use crate::config::{ViewerConfig, FREEZE_SCROLL_DISTANCE};
use crate::dismiss::{DismissController, DismissOutcome, DismissProgress};
use crate::geometry::{self, FitParams, Viewport};
use crate::gesture::{GestureInterpreter, GesturePhase, GestureSample, MoveContext};
use crate::media::{ImageDescriptor, ImageEntry, SizeRequest, SizeResult};
use crate::paging::PagingController;
use crate::transform::{self, TransformState};
use iced_core::{Color, Vector};
use std::time::Duration;

mod glide;

pub use glide::GlideTimer;

/// Side effects the host executes on the engine's behalf. Drained with
/// [`ViewerSession::take_requests`]; the engine only hands out target
/// values and durations, never runs animations or timers itself.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    /// Seek the pager to an index. `deferred` asks the host to re-issue
    /// the seek on the next scheduling tick; same-tick seeks are dropped
    /// by some paging hosts right after a relayout.
    SeekTo {
        index: usize,
        animated: bool,
        deferred: bool,
    },
    /// Resolve natural sizes for these entries; results come back through
    /// [`ViewerSession::apply_size_results`] tagged with `generation`.
    ResolveSizes {
        generation: u64,
        requests: Vec<SizeRequest>,
    },
    /// Schedule a glide (auto-advance) firing after `delay`, echoing
    /// `token` into [`ViewerSession::on_glide_fired`].
    ScheduleGlide { token: u64, delay: Duration },
    /// Animate the focused image's translate-y to `target_y` over
    /// `duration`: the fling-out trajectory of a committed dismiss.
    Dismiss { target_y: f32, duration: Duration },
    /// Tear down the overlay. Follows a committed dismiss.
    Close,
}

/// What the host needs to draw one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub scale: f32,
    pub translate: Vector,
    /// Zero while the entry's size is unresolved or errored, so
    /// placeholders never flash mis-sized pixels.
    pub opacity: f32,
}

/// Orchestrates gesture, dismiss, and paging state for one viewer overlay.
#[derive(Debug)]
pub struct ViewerSession {
    config: ViewerConfig,
    generation: u64,
    visible: bool,
    viewport: Viewport,
    entries: Vec<ImageEntry>,
    fit_cache: Vec<FitParams>,
    current_index: usize,
    transform: TransformState,
    gesture_origin: Vector,
    interpreter: GestureInterpreter,
    dismiss: DismissController,
    paging: PagingController,
    glide: GlideTimer,
    scroll_enabled: bool,
    requests: Vec<HostRequest>,
}

impl ViewerSession {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        let config = config.sanitized();
        let dismiss = DismissController::new(
            config.dismiss_distance_threshold,
            config.dismiss_opacity_falloff,
        );
        Self {
            config,
            generation: 0,
            visible: false,
            viewport: Viewport::new(0.0, 0.0),
            entries: Vec::new(),
            fit_cache: Vec::new(),
            current_index: 0,
            transform: TransformState::default(),
            gesture_origin: Vector::new(0.0, 0.0),
            interpreter: GestureInterpreter::new(),
            dismiss,
            paging: PagingController::new(),
            glide: GlideTimer::new(),
            scroll_enabled: true,
            requests: Vec::new(),
        }
    }

    // ----------------------------------------------------------------
    // Lifecycle
    // ----------------------------------------------------------------

    /// Opens the viewer on an image set. Starts a new session generation;
    /// any size results still in flight for the previous one will be
    /// discarded when they land.
    pub fn open(&mut self, images: Vec<ImageDescriptor>, viewport: Viewport) {
        self.visible = true;
        self.viewport = viewport;
        let initial = self.config.initial_index;
        self.reset_images(images, initial);
    }

    /// Replaces the image set (or focused index) while the viewer stays
    /// open; the session resets rather than being destroyed.
    pub fn replace_images(&mut self, images: Vec<ImageDescriptor>, index: usize) {
        self.reset_images(images, index);
    }

    /// Tears the session down when the overlay is hidden. Pending timers
    /// are invalidated so nothing fires against disposed state.
    pub fn teardown(&mut self) {
        self.visible = false;
        self.glide.cancel();
        self.dismiss.cancel();
        self.interpreter.on_release();
        self.requests.clear();
    }

    fn reset_images(&mut self, images: Vec<ImageDescriptor>, index: usize) {
        self.generation += 1;
        self.entries = images
            .into_iter()
            .enumerate()
            .map(|(i, descriptor)| ImageEntry::new(descriptor, i))
            .collect();
        self.current_index = index.min(self.entries.len().saturating_sub(1));
        self.rebuild_fit_cache();
        self.transform = TransformState::from_fit(&self.current_fit());
        self.dismiss.cancel();
        self.interpreter.on_release();
        self.scroll_enabled = true;

        // Some paging hosts ignore a seek issued in the same tick as a
        // relayout, so the initial positioning goes out deferred.
        self.requests.push(HostRequest::SeekTo {
            index: self.current_index,
            animated: false,
            deferred: true,
        });

        let unresolved: Vec<SizeRequest> = self
            .entries
            .iter()
            .filter(|entry| !entry.is_ready() && !entry.is_errored())
            .map(|entry| SizeRequest {
                index: entry.index(),
                source: entry.source().clone(),
            })
            .collect();
        if !unresolved.is_empty() {
            self.requests.push(HostRequest::ResolveSizes {
                generation: self.generation,
                requests: unresolved,
            });
        }

        if self.config.glide_always && !self.entries.is_empty() {
            self.arm_glide();
        }
    }

    /// Handles a rotation (or any wholesale viewport replacement):
    /// re-derives every fit, resets the focused transform, and re-issues
    /// the seek both immediately and deferred to defeat the same-tick
    /// seek race in paging hosts.
    pub fn on_viewport_changed(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            return;
        }
        self.viewport = viewport;
        self.rebuild_fit_cache();
        self.transform = TransformState::from_fit(&self.current_fit());
        self.dismiss.cancel();

        self.requests.push(HostRequest::SeekTo {
            index: self.current_index,
            animated: false,
            deferred: false,
        });
        self.requests.push(HostRequest::SeekTo {
            index: self.current_index,
            animated: false,
            deferred: true,
        });
    }

    // ----------------------------------------------------------------
    // Size resolution
    // ----------------------------------------------------------------

    /// Merges resolved sizes into the entry sequence, keyed by index.
    /// Partial and out-of-order results are fine; results stamped with a
    /// stale generation are discarded wholesale.
    pub fn apply_size_results(&mut self, generation: u64, results: Vec<SizeResult>) {
        if generation != self.generation {
            log::debug!(
                "discarding {} size result(s) for stale generation {generation}",
                results.len()
            );
            return;
        }

        let mut current_changed = false;
        for result in results {
            let Some(entry) = self.entries.get_mut(result.index) else {
                continue;
            };
            if entry.is_errored() {
                continue;
            }
            entry.set_size(result.width, result.height);
            self.fit_cache[result.index] = self.fit_for(result.index);
            current_changed |= result.index == self.current_index;
        }

        // Adopt the fresh geometry unless a gesture is mid-flight; the
        // release path re-reads the fit anyway.
        if current_changed && self.interpreter.phase() == GesturePhase::Idle {
            self.transform = TransformState::from_fit(&self.current_fit());
        }
    }

    /// Marks an entry's pixels as decoded and displayable.
    pub fn on_image_loaded(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.mark_loaded();
        }
    }

    /// Marks an entry failed. Geometry stops being computed for it; the
    /// error is a per-entry display state, never a session failure.
    pub fn on_image_load_failed(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.mark_errored();
            self.fit_cache[index] = FitParams::not_ready();
        }
    }

    // ----------------------------------------------------------------
    // Gestures
    // ----------------------------------------------------------------

    pub fn on_gesture_start(&mut self, sample: &GestureSample) {
        if !self.visible || self.dismiss.is_committing() {
            return;
        }
        self.glide.cancel();
        self.gesture_origin = self.transform.translate;
        self.interpreter.on_start(&sample.touches, self.transform.scale);
    }

    pub fn on_gesture_move(&mut self, sample: &GestureSample) {
        if !self.visible || self.dismiss.is_committing() {
            return;
        }
        // While the pager is mid-swipe or gliding under momentum and we
        // have not frozen it, the gesture belongs to the pager.
        if self.paging.is_scrolling() && self.scroll_enabled {
            return;
        }

        let ctx = self.move_context();
        let update = self.interpreter.on_move(sample, &ctx);

        if update.dismiss_drag {
            if !self.dismiss.is_active() {
                self.glide.cancel();
                self.dismiss.begin();
            }
            self.dismiss.on_move(sample.dy);
        } else if update.pan_x || update.pan_y {
            let mut target = self.gesture_origin;
            if update.pan_x {
                target.x += sample.dx;
            }
            if update.pan_y {
                target.y += sample.dy;
            }
            self.transform.translate = match ctx.image_size {
                Some(size) => transform::clamp_translate(
                    target,
                    self.transform.scale,
                    size,
                    self.viewport,
                ),
                None => target,
            };
        }

        if let Some(scale) = update.pinch_scale {
            let translate = match ctx.image_size {
                Some(size) => {
                    let centered =
                        transform::rescale_about_center(&self.transform, scale, size);
                    transform::clamp_translate(centered, scale, size, self.viewport)
                }
                None => self.transform.translate,
            };
            self.transform = TransformState { scale, translate };

            // A pinch that leaves the fit scale takes over the gesture;
            // an in-flight dismiss drag ends without a release decision.
            if self.dismiss.is_active() && !self.transform.is_at_fit(&ctx.fit) {
                self.dismiss.cancel();
            }
        }

        // Past this drag distance the vertical axis belongs to the
        // gesture, not the pager.
        self.scroll_enabled = sample.dy.abs() < FREEZE_SCROLL_DISTANCE;
    }

    pub fn on_gesture_release(&mut self, sample: &GestureSample) {
        if !self.visible {
            return;
        }

        if self.dismiss.is_active() && !self.dismiss.is_committing() {
            let outcome = self.dismiss.on_release(
                sample.dy,
                sample.vy,
                self.paging.is_momentum_scrolling(),
            );
            match outcome {
                DismissOutcome::Commit { target_y, duration } => {
                    self.glide.cancel();
                    self.requests.push(HostRequest::Dismiss { target_y, duration });
                    self.requests.push(HostRequest::Close);
                }
                DismissOutcome::SnapBack => {
                    self.transform = TransformState::from_fit(&self.current_fit());
                }
            }
        } else if !self.dismiss.is_committing() {
            // Pinch release always snaps back to fit; there is no
            // stay-zoomed mode.
            self.transform = TransformState::from_fit(&self.current_fit());
        }

        self.interpreter.on_release();
        self.scroll_enabled = true;
    }

    // ----------------------------------------------------------------
    // Paging
    // ----------------------------------------------------------------

    pub fn on_scroll_offset_changed(&mut self, offset_x: f32) {
        if !self.visible {
            return;
        }
        self.paging.on_offset_changed(offset_x, self.viewport.width);

        let next = PagingController::page_index(offset_x, self.viewport.width);
        if next != self.current_index && next < self.entries.len() {
            self.current_index = next;
            // Each page starts fresh; zoom and pan never survive a swipe.
            self.transform = TransformState::from_fit(&self.current_fit());
            self.dismiss.cancel();
        }
    }

    pub fn on_momentum_scroll_begin(&mut self) {
        self.paging.on_momentum_scroll_begin();
        self.glide.cancel();
    }

    pub fn on_momentum_scroll_end(&mut self) {
        self.paging.on_momentum_scroll_end();
        if self.visible && self.config.glide_always && !self.entries.is_empty() {
            self.arm_glide();
        }
    }

    /// Requests an animated seek to the next image, if any.
    pub fn scroll_to_next(&mut self) {
        let next = self.current_index + 1;
        if next < self.entries.len() {
            self.requests.push(HostRequest::SeekTo {
                index: next,
                animated: true,
                deferred: false,
            });
        }
    }

    /// Requests an animated seek to the previous image, if any.
    pub fn scroll_to_prev(&mut self) {
        if self.current_index > 0 {
            self.requests.push(HostRequest::SeekTo {
                index: self.current_index - 1,
                animated: true,
                deferred: false,
            });
        }
    }

    /// Whether prev-navigation chrome should show (only at fit scale).
    #[must_use]
    pub fn can_scroll_prev(&self) -> bool {
        self.current_index > 0 && self.transform.is_at_fit(&self.current_fit())
    }

    /// Whether next-navigation chrome should show (only at fit scale).
    #[must_use]
    pub fn can_scroll_next(&self) -> bool {
        self.current_index + 1 < self.entries.len()
            && self.transform.is_at_fit(&self.current_fit())
    }

    // ----------------------------------------------------------------
    // Glide
    // ----------------------------------------------------------------

    /// Host callback for a scheduled glide firing. Stale tokens are
    /// no-ops, which is how cancellation works.
    pub fn on_glide_fired(&mut self, token: u64) {
        if !self.glide.accept(token) {
            log::debug!("ignoring stale glide token {token}");
            return;
        }
        if self.visible && !self.paging.is_momentum_scrolling() {
            self.scroll_to_next();
        }
    }

    fn arm_glide(&mut self) {
        let token = self.glide.arm();
        self.requests.push(HostRequest::ScheduleGlide {
            token,
            delay: Duration::from_millis(self.config.glide_always_delay_ms),
        });
    }

    // ----------------------------------------------------------------
    // Read-only outputs
    // ----------------------------------------------------------------

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    /// Snapshot of the focused image's transform.
    #[must_use]
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Cached rest-state geometry for any index.
    #[must_use]
    pub fn fit_params(&self, index: usize) -> FitParams {
        self.fit_cache
            .get(index)
            .copied()
            .unwrap_or_else(FitParams::not_ready)
    }

    /// Draw parameters for any image. The focused image carries live
    /// gesture state (including the dismiss drag on translate-y);
    /// off-focus images sit at their fit geometry.
    #[must_use]
    pub fn image_params(&self, index: usize) -> RenderParams {
        let ready = self
            .entries
            .get(index)
            .is_some_and(ImageEntry::is_ready);
        let opacity = if ready { 1.0 } else { 0.0 };

        if index == self.current_index {
            let mut translate = self.transform.translate;
            if let Some(progress) = self.dismiss.progress() {
                translate.y += progress.vertical_offset;
            }
            RenderParams {
                scale: self.transform.scale,
                translate,
                opacity,
            }
        } else {
            let fit = self.fit_params(index);
            RenderParams {
                scale: fit.scale,
                translate: fit.translate,
                opacity,
            }
        }
    }

    /// Draw parameters for the focused image.
    #[must_use]
    pub fn focused_params(&self) -> RenderParams {
        self.image_params(self.current_index)
    }

    #[must_use]
    pub fn dismiss_progress(&self) -> Option<DismissProgress> {
        self.dismiss.progress()
    }

    /// Backdrop color with the dismiss fade applied.
    #[must_use]
    pub fn background(&self) -> Color {
        self.dismiss.background(self.config.background_color())
    }

    /// Whether the focused image is pinched above its fit scale; hosts
    /// use this to suppress chrome and paging.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.interpreter.is_zoomed()
    }

    /// Whether the host pager may scroll. Frozen while a vertical drag
    /// owns the dismiss axis.
    #[must_use]
    pub fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled && !self.interpreter.is_zoomed()
    }

    /// Drains the pending host requests, in the order they were issued.
    #[must_use]
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    // ----------------------------------------------------------------
    // Internals
    // ----------------------------------------------------------------

    fn rebuild_fit_cache(&mut self) {
        self.fit_cache = (0..self.entries.len()).map(|i| self.fit_for(i)).collect();
    }

    fn fit_for(&self, index: usize) -> FitParams {
        let Some(entry) = self.entries.get(index) else {
            return FitParams::not_ready();
        };
        if entry.is_errored() {
            return FitParams::not_ready();
        }
        geometry::resolve(
            entry.dimensions(),
            self.viewport,
            self.config.upscale_small_images,
        )
    }

    fn current_fit(&self) -> FitParams {
        self.fit_params(self.current_index)
    }

    fn move_context(&self) -> MoveContext {
        let entry = self.entries.get(self.current_index);
        MoveContext {
            current_scale: self.transform.scale,
            fit: self.current_fit(),
            image_size: entry.and_then(ImageEntry::dimensions),
            viewport: self.viewport,
            pinch_enabled: self.config.is_pinch_zoom_enabled,
            swipe_close_enabled: self.config.is_swipe_close_enabled,
            max_scale: self.config.max_scale,
            dismiss_active: self.dismiss.is_active(),
        }
    }
}
