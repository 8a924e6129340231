// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the hold-to-decide capture controller
//!
//! These run on tokio's paused test clock, so press durations are exact
//! virtual time and the suite completes quickly.

use locket_capture::backends::camera::test_pattern::render_test_frame;
use locket_capture::backends::camera::{
    DeviceSession, PermissionState, TestPatternCamera,
};
use locket_capture::controller::{CaptureController, CapturePhase};
use locket_capture::errors::{CameraError, CaptureError, SessionError};
use locket_capture::media::{VideoClip, codec};
use locket_capture::storage::{AssetKind, AssetStore};
use locket_capture::submit::{Post, PostSink};
use locket_capture::{CaptureFormat, Config, FacingMode};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sink that records delivered posts for assertions
#[derive(Debug, Default, Clone)]
struct RecordingSink {
    delivered: Arc<Mutex<Vec<Post>>>,
}

impl PostSink for RecordingSink {
    fn deliver(&self, post: &Post) {
        self.delivered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(post.clone());
    }
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "locket-controller-test-{}-{}",
        std::process::id(),
        tag
    ));
    std::fs::remove_dir_all(&dir).ok();
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn test_config(width: u32, height: u32) -> Config {
    let mut config = Config::default();
    config.capture_format = CaptureFormat {
        width,
        height,
        framerate: 10,
    };
    config
}

fn build(
    backend: TestPatternCamera,
    config: Config,
    tag: &str,
) -> (CaptureController<TestPatternCamera>, RecordingSink) {
    let sink = RecordingSink::default();
    let device = DeviceSession::new(backend, config.capture_format, config.default_facing);
    let store = AssetStore::with_dir(scratch_dir(tag)).expect("asset store");
    let controller = CaptureController::new(device, store, Box::new(sink.clone()), config);
    (controller, sink)
}

async fn press_for(
    controller: &mut CaptureController<TestPatternCamera>,
    duration: Duration,
) -> locket_capture::Asset {
    controller.begin_press().expect("begin press");
    tokio::time::sleep(duration).await;
    controller.end_press().await.expect("end press")
}

fn decode_stored_clip(asset: &locket_capture::Asset) -> VideoClip {
    let bytes = std::fs::read(&asset.path).expect("read stored clip");
    VideoClip::from_mjpeg(&bytes, 10).expect("parse stored clip")
}

#[tokio::test(start_paused = true)]
async fn test_tap_produces_square_image() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "tap");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    let asset = press_for(&mut controller, Duration::from_millis(300)).await;

    assert_eq!(asset.kind, AssetKind::Image);
    assert_eq!(asset.square_size, 48, "square side must be min(w, h)");
    assert!(asset.duration.is_none());
    assert!(asset.path.exists());
    assert_eq!(controller.phase(), CapturePhase::Reviewing);
}

#[tokio::test(start_paused = true)]
async fn test_square_size_on_portrait_source() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(48, 64), "portrait");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    let asset = press_for(&mut controller, Duration::from_millis(300)).await;
    assert_eq!(asset.square_size, 48);
}

#[tokio::test(start_paused = true)]
async fn test_front_camera_still_is_mirrored() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "mirror-still");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    let asset = press_for(&mut controller, Duration::from_millis(300)).await;

    let bytes = std::fs::read(&asset.path).expect("read stored still");
    let frame = codec::decode_frame(&bytes, Duration::ZERO).expect("decode still");
    // The raw pattern is red on the left; the mirrored capture shows blue
    let left = frame.pixel(5, 24);
    assert!(
        left[2] > 150 && left[0] < 100,
        "front still should be mirrored, left pixel {:?}",
        left
    );
}

#[tokio::test(start_paused = true)]
async fn test_rear_camera_still_is_not_mirrored() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "plain-still");
    controller
        .acquire_stream(FacingMode::Environment)
        .await
        .expect("acquire");

    let asset = press_for(&mut controller, Duration::from_millis(300)).await;

    let bytes = std::fs::read(&asset.path).expect("read stored still");
    let frame = codec::decode_frame(&bytes, Duration::ZERO).expect("decode still");
    let left = frame.pixel(5, 24);
    assert!(
        left[0] > 150 && left[2] < 100,
        "rear still must not be mirrored, left pixel {:?}",
        left
    );
}

#[tokio::test(start_paused = true)]
async fn test_hold_produces_video_stopped_by_release() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "hold");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    let asset = press_for(&mut controller, Duration::from_secs(3)).await;

    assert_eq!(asset.kind, AssetKind::Video);
    assert_eq!(asset.square_size, 48);
    // Recording runs from the 1s threshold to release at 3s
    let duration = asset.duration.expect("video duration");
    assert!(
        duration >= Duration::from_millis(1_800) && duration <= Duration::from_millis(2_200),
        "expected ~2s of recording, got {:?}",
        duration
    );
    assert_eq!(controller.phase(), CapturePhase::Reviewing);
}

#[tokio::test(start_paused = true)]
async fn test_phase_passes_through_holding_and_recording() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "phases");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    controller.begin_press().expect("begin press");
    assert_eq!(controller.phase(), CapturePhase::Holding);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(controller.phase(), CapturePhase::Recording);

    controller.end_press().await.expect("end press");
    assert_eq!(controller.phase(), CapturePhase::Reviewing);
}

#[tokio::test(start_paused = true)]
async fn test_ceiling_auto_stops_recording() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "ceiling");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    // Held for 12s against a 10s ceiling
    let asset = press_for(&mut controller, Duration::from_secs(12)).await;

    assert_eq!(asset.kind, AssetKind::Video);
    let duration = asset.duration.expect("video duration");
    assert!(
        duration >= Duration::from_millis(9_800) && duration <= Duration::from_millis(10_200),
        "recorder should auto-stop at the 10s ceiling, got {:?}",
        duration
    );
}

#[tokio::test(start_paused = true)]
async fn test_front_camera_video_is_mirrored() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "mirror-clip");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    let asset = press_for(&mut controller, Duration::from_secs(2)).await;
    assert_eq!(asset.kind, AssetKind::Video);

    let clip = decode_stored_clip(&asset);
    assert_eq!(clip.frame_size(), (48, 48));
    let frame = clip
        .into_reader()
        .next_frame()
        .expect("decode")
        .expect("frame present");
    let left = frame.pixel(5, 24);
    assert!(
        left[2] > 150 && left[0] < 100,
        "front clip should be mirrored, left pixel {:?}",
        left
    );
}

#[tokio::test(start_paused = true)]
async fn test_rear_camera_video_is_not_mirrored() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "plain-clip");
    controller
        .acquire_stream(FacingMode::Environment)
        .await
        .expect("acquire");

    let asset = press_for(&mut controller, Duration::from_secs(2)).await;
    let clip = decode_stored_clip(&asset);
    let frame = clip
        .into_reader()
        .next_frame()
        .expect("decode")
        .expect("frame present");
    let left = frame.pixel(5, 24);
    assert!(
        left[0] > 150 && left[2] < 100,
        "rear clip must not be mirrored, left pixel {:?}",
        left
    );
}

#[tokio::test(start_paused = true)]
async fn test_begin_press_is_noop_while_recording() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "noop-press");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    controller.begin_press().expect("begin press");
    tokio::time::sleep(Duration::from_secs(2)).await;

    // A second press mid-gesture is guarded by state
    controller.begin_press().expect("no-op press");
    assert_eq!(controller.phase(), CapturePhase::Recording);

    let asset = controller.end_press().await.expect("end press");
    assert_eq!(asset.kind, AssetKind::Video);
}

#[tokio::test(start_paused = true)]
async fn test_delete_then_fresh_capture_leaves_no_residue() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "delete");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    controller.set_caption("first one");
    let first = press_for(&mut controller, Duration::from_millis(300)).await;
    let first_path = first.path.clone();

    controller.delete_asset().await.expect("delete");
    assert_eq!(controller.phase(), CapturePhase::Idle);
    assert!(controller.caption().is_empty(), "caption must clear on delete");
    assert!(!first_path.exists(), "temp file must be released on delete");

    let second = press_for(&mut controller, Duration::from_millis(300)).await;
    assert_ne!(second.id, first.id);
    assert_ne!(second.path, first_path);
    assert!(second.path.exists());
}

#[tokio::test(start_paused = true)]
async fn test_submit_delivers_at_most_once() {
    let (mut controller, sink) = build(TestPatternCamera::new(), test_config(64, 48), "submit");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    let asset = press_for(&mut controller, Duration::from_millis(300)).await;
    controller.set_caption("hello");
    controller.set_recipients(vec!["friend-1".to_string()]);

    controller.submit().expect("first submit");
    let result = controller.submit();
    assert!(matches!(
        result,
        Err(CaptureError::Session(SessionError::AlreadySubmitted))
    ));

    let delivered = sink.delivered.lock().expect("lock");
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].asset.id, asset.id);
    assert_eq!(delivered[0].caption, "hello");
    assert_eq!(delivered[0].recipients, ["friend-1"]);
}

#[tokio::test(start_paused = true)]
async fn test_submit_requires_live_asset() {
    let (mut controller, sink) = build(TestPatternCamera::new(), test_config(64, 48), "no-asset");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");

    let result = controller.submit();
    assert!(matches!(result, Err(CaptureError::Session(_))));
    assert!(sink.delivered.lock().expect("lock").is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_permission_denied_leaves_usable_idle_session() {
    let backend = TestPatternCamera::new().with_permission(PermissionState::Denied);
    let (mut controller, _) = build(backend, test_config(64, 48), "denied");

    let result = controller.acquire_stream(FacingMode::User).await;
    assert!(matches!(
        result,
        Err(CaptureError::Camera(CameraError::PermissionDenied))
    ));
    assert_eq!(controller.phase(), CapturePhase::Idle);
    assert!(!controller.has_stream());

    // A press without a stream is a camera error, not a panic
    let result = controller.begin_press();
    assert!(matches!(
        result,
        Err(CaptureError::Camera(CameraError::DeviceUnavailable(_)))
    ));

    // File selection remains available as the fallback input path
    let dir = scratch_dir("denied-file");
    let path = dir.join("fallback.png");
    let frame = render_test_frame(
        &CaptureFormat {
            width: 64,
            height: 48,
            framerate: 10,
        },
        0,
    );
    std::fs::write(&path, codec::encode_png(&frame).expect("encode")).expect("write");

    let asset = controller.select_file(&path).await.expect("select file");
    assert_eq!(asset.kind, AssetKind::Image);
    assert_eq!(asset.square_size, 48);
    assert_eq!(controller.phase(), CapturePhase::Reviewing);
}

#[tokio::test(start_paused = true)]
async fn test_device_unavailable_is_reported() {
    let backend = TestPatternCamera::new().unavailable();
    let (mut controller, _) = build(backend, test_config(64, 48), "unavailable");

    let result = controller.acquire_stream(FacingMode::User).await;
    assert!(matches!(
        result,
        Err(CaptureError::Camera(CameraError::DeviceUnavailable(_)))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_switch_facing_replaces_stream() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "switch");
    controller
        .acquire_stream(FacingMode::User)
        .await
        .expect("acquire");
    assert_eq!(controller.facing(), FacingMode::User);

    controller.switch_facing().await.expect("switch");
    assert_eq!(controller.facing(), FacingMode::Environment);
    assert!(controller.has_stream());

    // Captures after the switch use the new facing (no mirroring)
    let asset = press_for(&mut controller, Duration::from_millis(300)).await;
    let bytes = std::fs::read(&asset.path).expect("read stored still");
    let frame = codec::decode_frame(&bytes, Duration::ZERO).expect("decode still");
    assert!(frame.pixel(5, 24)[0] > 150, "unmirrored after switch to rear");
}

#[tokio::test(start_paused = true)]
async fn test_imported_clip_is_normalized_square() {
    let (mut controller, _) = build(TestPatternCamera::new(), test_config(64, 48), "import-clip");

    // Build a landscape motion-JPEG file on disk
    let dir = scratch_dir("import-clip-src");
    let path = dir.join("clip.mjpeg");
    let fmt = CaptureFormat {
        width: 96,
        height: 48,
        framerate: 10,
    };
    let mut writer = locket_capture::media::ClipWriter::new(96, 48, 10, 85);
    for i in 0..5 {
        writer
            .push_frame(&render_test_frame(&fmt, i))
            .expect("push");
    }
    let mut bytes = Vec::new();
    writer.finish().write_mjpeg(&mut bytes).expect("serialize");
    std::fs::write(&path, bytes).expect("write clip");

    let asset = controller.select_file(&path).await.expect("select file");
    assert_eq!(asset.kind, AssetKind::Video);
    assert_eq!(asset.square_size, 48);

    // File media is cropped but never mirrored
    let clip = decode_stored_clip(&asset);
    assert_eq!(clip.len(), 5);
    let frame = clip
        .into_reader()
        .next_frame()
        .expect("decode")
        .expect("frame present");
    assert!(frame.pixel(5, 24)[0] > 150, "imported clip must not mirror");
}
