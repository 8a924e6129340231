// SPDX-License-Identifier: MPL-2.0

//! Square-crop post-processing for recorded clips
//!
//! A recorded clip carries raw sensor framing. Normalization re-renders it
//! frame by frame: each decoded frame is square-cropped (and mirrored for
//! front-camera clips) and re-encoded into a fresh clip. The pass is
//! frame-synchronous with no frame drops: every decoded frame is processed
//! exactly once, in presentation order, and the loop terminates when the
//! source reports ended, after which the re-encoder output is finalized.
//!
//! The loop is cooperative — it yields to the runtime between frames and is
//! bounded by the source clip length.

use crate::constants::QualityPreset;
use crate::errors::RecordingError;
use crate::media::{ClipWriter, VideoClip};
use crate::pipelines::photo::transform;
use tracing::{debug, info};

/// Re-render a clip into centered-square form
///
/// `mirror` selects the front-camera path (horizontal flip per frame);
/// rear-camera and file-sourced clips pass `false` for crop-only.
pub async fn normalize_clip(
    clip: VideoClip,
    mirror: bool,
    quality: QualityPreset,
) -> Result<VideoClip, RecordingError> {
    let (width, height) = clip.frame_size();
    let rect = transform::centered_square(width, height);
    let framerate = clip.framerate();
    let source_frames = clip.len();

    info!(
        source_frames,
        width, height,
        square_size = rect.size,
        mirror,
        "Normalizing clip"
    );

    let mut reader = clip.into_reader();
    let mut writer = ClipWriter::new(rect.size, rect.size, framerate, quality.jpeg_quality());

    while let Some(frame) = reader.next_frame()? {
        let square = transform::square_crop(&frame, mirror);
        writer.push_frame(&square)?;
        // One frame per iteration; the ended check happens on the next
        // next_frame call, bounding the loop by the source duration.
        tokio::task::yield_now().await;
    }

    debug_assert!(reader.ended());
    debug!(frames = writer.len(), "Clip normalization finished");

    let normalized = writer.finish();
    debug_assert_eq!(normalized.len(), source_frames);
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::test_pattern::render_test_frame;
    use crate::backends::camera::types::CaptureFormat;
    use crate::media::ClipWriter;

    fn landscape_clip(frames: u64) -> VideoClip {
        let fmt = CaptureFormat {
            width: 96,
            height: 48,
            framerate: 30,
        };
        let mut writer = ClipWriter::new(fmt.width, fmt.height, fmt.framerate, 90);
        for i in 0..frames {
            writer
                .push_frame(&render_test_frame(&fmt, i))
                .expect("push frame");
        }
        writer.finish()
    }

    #[tokio::test]
    async fn test_every_frame_processed_exactly_once() {
        let clip = landscape_clip(12);
        let normalized = normalize_clip(clip, false, QualityPreset::High)
            .await
            .expect("normalize");
        assert_eq!(normalized.len(), 12);
        assert_eq!(normalized.frame_size(), (48, 48));
    }

    #[tokio::test]
    async fn test_presentation_order_is_preserved() {
        let clip = landscape_clip(8);
        let normalized = normalize_clip(clip, false, QualityPreset::High)
            .await
            .expect("normalize");
        for pair in normalized.chunks().windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn test_mirrored_clip_swaps_left_and_right() {
        let clip = landscape_clip(3);
        let normalized = normalize_clip(clip, true, QualityPreset::High)
            .await
            .expect("normalize");

        let mut reader = normalized.into_reader();
        let frame = reader
            .next_frame()
            .expect("decode")
            .expect("frame present");
        // The source's left-half red now sits on the right
        let left = frame.pixel(5, 24);
        let right = frame.pixel(42, 24);
        assert!(
            left[2] > 150 && left[0] < 100,
            "mirrored left should be blue, got {:?}",
            left
        );
        assert!(
            right[0] > 150 && right[2] < 100,
            "mirrored right should be red, got {:?}",
            right
        );
    }

    #[tokio::test]
    async fn test_unmirrored_clip_keeps_orientation() {
        let clip = landscape_clip(3);
        let normalized = normalize_clip(clip, false, QualityPreset::High)
            .await
            .expect("normalize");

        let mut reader = normalized.into_reader();
        let frame = reader
            .next_frame()
            .expect("decode")
            .expect("frame present");
        let left = frame.pixel(5, 24);
        assert!(left[0] > 150 && left[2] < 100, "left should stay red");
    }
}
