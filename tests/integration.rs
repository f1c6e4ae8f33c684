// SPDX-License-Identifier: MPL-2.0
//! End-to-end gesture replay scenarios over the public session API.

use approx::assert_abs_diff_eq;
use iced_core::Point;
use swipe_lens::media::{FileSizeProvider, ImageSizeProvider, SizeRequest};
use swipe_lens::session::HostRequest;
use swipe_lens::{
    GestureSample, ImageDescriptor, ImageSource, SizeResult, ViewerConfig, ViewerSession, Viewport,
};

const VIEWPORT: Viewport = Viewport {
    width: 320.0,
    height: 568.0,
};

fn gallery() -> Vec<ImageDescriptor> {
    vec![
        ImageDescriptor::with_size(ImageSource::uri("image-0"), 1280, 960),
        ImageDescriptor::with_size(ImageSource::uri("image-1"), 640, 640),
        ImageDescriptor::new(ImageSource::uri("image-2")),
        ImageDescriptor::new(ImageSource::uri("image-3")),
    ]
}

fn open() -> ViewerSession {
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.open(gallery(), VIEWPORT);
    let _ = session.take_requests();
    session
}

#[test]
fn pinch_zoom_and_release_round_trip() {
    let mut session = open();
    let fit_scale = session.transform().scale;

    session.on_gesture_start(&GestureSample::new(
        vec![Point::new(120.0, 280.0), Point::new(200.0, 280.0)],
        0.0,
        0.0,
    ));
    session.on_gesture_move(&GestureSample::new(
        vec![Point::new(80.0, 280.0), Point::new(240.0, 280.0)],
        0.0,
        0.0,
    ));

    // Fingers spread to 2x: the image doubles from its gesture-start scale.
    assert_abs_diff_eq!(session.transform().scale, fit_scale * 2.0, epsilon = 1e-5);
    assert!(session.is_zoomed());
    assert!(!session.is_scroll_enabled());

    session.on_gesture_release(&GestureSample::new(vec![], 0.0, 0.0));

    // No stay-zoomed mode: release always lands back on the fit geometry.
    assert_abs_diff_eq!(session.transform().scale, fit_scale);
    assert!(!session.is_zoomed());
    assert!(session.is_scroll_enabled());
}

#[test]
fn late_second_finger_does_not_jump_the_zoom() {
    let mut session = open();
    let fit_scale = session.transform().scale;

    // One finger down, drags a little.
    session.on_gesture_start(&GestureSample::new(vec![Point::new(160.0, 280.0)], 0.0, 0.0));
    session.on_gesture_move(&GestureSample::new(vec![Point::new(160.0, 284.0)], 0.0, 4.0));

    // Second finger lands 90 px away: this very sample must be ratio 1.
    session.on_gesture_move(&GestureSample::new(
        vec![Point::new(160.0, 284.0), Point::new(250.0, 284.0)],
        0.0,
        4.0,
    ));
    assert_abs_diff_eq!(session.transform().scale, fit_scale, epsilon = 1e-5);

    // Only spreading from the rebased baseline zooms.
    session.on_gesture_move(&GestureSample::new(
        vec![Point::new(160.0, 284.0), Point::new(340.0, 284.0)],
        0.0,
        4.0,
    ));
    assert_abs_diff_eq!(session.transform().scale, fit_scale * 2.0, epsilon = 1e-5);
}

#[test]
fn swipe_down_commits_and_closes_exactly_once() {
    let mut session = open();

    session.on_gesture_start(&GestureSample::new(vec![Point::new(160.0, 280.0)], 0.0, 0.0));
    for dy in [20.0, 45.0, 80.0] {
        session.on_gesture_move(&GestureSample::new(
            vec![Point::new(160.0, 280.0 + dy)],
            0.0,
            dy,
        ));
    }

    let progress = session.dismiss_progress().expect("dismiss in progress");
    assert_abs_diff_eq!(progress.vertical_offset, 80.0);
    assert!(session.background().a < 1.0);

    session.on_gesture_release(
        &GestureSample::new(vec![Point::new(160.0, 360.0)], 0.0, 80.0).with_velocity(900.0),
    );

    let requests = session.take_requests();
    let mut saw_dismiss = false;
    let mut close_count = 0;
    for request in &requests {
        match request {
            HostRequest::Dismiss { target_y, .. } => {
                saw_dismiss = true;
                // Fling target extrapolates the release velocity.
                assert!(*target_y > 80.0);
            }
            HostRequest::Close => close_count += 1,
            _ => {}
        }
    }
    assert!(saw_dismiss);
    assert_eq!(close_count, 1);
}

#[test]
fn short_swipe_snaps_back_to_rest() {
    let mut session = open();
    let rest_y = session.focused_params().translate.y;

    session.on_gesture_start(&GestureSample::new(vec![Point::new(160.0, 280.0)], 0.0, 0.0));
    session.on_gesture_move(&GestureSample::new(
        vec![Point::new(160.0, 339.0)],
        0.0,
        59.0,
    ));
    session.on_gesture_release(&GestureSample::new(
        vec![Point::new(160.0, 339.0)],
        0.0,
        59.0,
    ));

    assert!(session.dismiss_progress().is_none());
    assert_abs_diff_eq!(session.focused_params().translate.y, rest_y);
    assert_abs_diff_eq!(session.background().a, 1.0);
    assert!(session.take_requests().is_empty());
}

#[test]
fn paging_discards_zoom_state_per_page() {
    let mut session = open();

    session.on_gesture_start(&GestureSample::new(
        vec![Point::new(120.0, 280.0), Point::new(200.0, 280.0)],
        0.0,
        0.0,
    ));
    session.on_gesture_move(&GestureSample::new(
        vec![Point::new(40.0, 280.0), Point::new(280.0, 280.0)],
        0.0,
        0.0,
    ));
    session.on_gesture_release(&GestureSample::new(vec![], 0.0, 0.0));

    // 736 / 320 rounds to page 2.
    session.on_momentum_scroll_begin();
    session.on_scroll_offset_changed(736.0);
    session.on_momentum_scroll_end();
    assert_eq!(session.current_index(), 2);

    // Page 2 has no size yet: hidden placeholder geometry.
    let params = session.focused_params();
    assert_abs_diff_eq!(params.opacity, 0.0);
    assert_abs_diff_eq!(params.scale, 1.0);
}

#[test]
fn size_resolution_round_trip_through_requests() {
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.open(gallery(), VIEWPORT);

    let (generation, unresolved) = session
        .take_requests()
        .into_iter()
        .find_map(|request| match request {
            HostRequest::ResolveSizes {
                generation,
                requests,
            } => Some((generation, requests)),
            _ => None,
        })
        .expect("unsized entries produce a resolve request");

    let indices: Vec<usize> = unresolved.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![2, 3]);

    // Results arrive out of order and partially: only entry 3 resolves.
    session.apply_size_results(
        generation,
        vec![SizeResult {
            index: 3,
            width: 320,
            height: 240,
        }],
    );

    assert!(session.entry(3).expect("entry").is_ready());
    assert!(!session.entry(2).expect("entry").is_ready());
    assert_abs_diff_eq!(session.image_params(3).opacity, 1.0);
    assert_abs_diff_eq!(session.image_params(2).opacity, 0.0);
}

#[test]
fn rotation_preserves_focus_and_resets_geometry() {
    let mut session = open();

    // Pan state from a pinch-drag on the focused image.
    session.on_gesture_start(&GestureSample::new(
        vec![Point::new(120.0, 280.0), Point::new(200.0, 280.0)],
        0.0,
        0.0,
    ));
    session.on_gesture_move(&GestureSample::new(
        vec![Point::new(40.0, 280.0), Point::new(280.0, 280.0)],
        0.0,
        0.0,
    ));

    let landscape = Viewport::new(568.0, 320.0);
    session.on_viewport_changed(landscape);

    // No residual zoom/pan survives the rotation.
    let fit = session.fit_params(session.current_index());
    assert_abs_diff_eq!(session.transform().scale, fit.scale);
    assert_abs_diff_eq!(session.transform().translate.x, fit.translate.x);
    assert_abs_diff_eq!(session.transform().translate.y, fit.translate.y);

    let seeks: Vec<bool> = session
        .take_requests()
        .into_iter()
        .filter_map(|request| match request {
            HostRequest::SeekTo { deferred, .. } => Some(deferred),
            _ => None,
        })
        .collect();
    assert_eq!(seeks, vec![false, true]);
}

#[test]
fn stale_size_results_never_touch_a_new_session() {
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.open(gallery(), VIEWPORT);
    let stale_generation = session.generation();
    let _ = session.take_requests();

    // The host swaps the image set before the probe returns.
    session.replace_images(vec![ImageDescriptor::new(ImageSource::uri("fresh"))], 0);
    session.apply_size_results(
        stale_generation,
        vec![SizeResult {
            index: 0,
            width: 999,
            height: 999,
        }],
    );

    assert!(!session.entry(0).expect("entry").is_ready());
}

#[tokio::test]
async fn file_size_provider_feeds_the_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("photo.png");
    image_rs::RgbaImage::new(64, 32).save(&path).expect("png");

    let mut session = ViewerSession::new(ViewerConfig::default());
    session.open(
        vec![ImageDescriptor::new(ImageSource::path(&path))],
        VIEWPORT,
    );

    let (generation, requests): (u64, Vec<SizeRequest>) = session
        .take_requests()
        .into_iter()
        .find_map(|request| match request {
            HostRequest::ResolveSizes {
                generation,
                requests,
            } => Some((generation, requests)),
            _ => None,
        })
        .expect("resolve request");

    let probes = FileSizeProvider.resolve_sizes(requests).await;
    let results: Vec<SizeResult> = probes.iter().filter_map(|p| p.ok()).collect();
    session.apply_size_results(generation, results);

    let entry = session.entry(0).expect("entry");
    assert!(entry.is_ready());
    assert_abs_diff_eq!(session.transform().scale, 1.0);
}
