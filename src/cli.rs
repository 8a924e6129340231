// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for capture operations
//!
//! This module provides command-line functionality for:
//! - Capturing a square still (tap simulation)
//! - Recording a square clip (hold simulation)
//! - Normalizing a local image or video file
//! - Running the full press-to-post flow

use locket_capture::backends::camera::{DeviceSession, TestPatternCamera};
use locket_capture::controller::CaptureController;
use locket_capture::errors::CaptureError;
use locket_capture::storage::AssetStore;
use locket_capture::submit::ConsoleSink;
use locket_capture::{Asset, Config, FacingMode};
use std::path::PathBuf;
use std::time::Duration;

/// Build a controller over the synthetic test-pattern camera
///
/// The core has no native camera access; the synthetic backend stands in
/// for the platform stream so every capture path can be exercised.
fn build_controller(config: Config) -> Result<CaptureController<TestPatternCamera>, CaptureError> {
    let device = DeviceSession::new(
        TestPatternCamera::new(),
        config.capture_format,
        config.default_facing,
    );
    Ok(CaptureController::new(
        device,
        AssetStore::new()?,
        Box::new(ConsoleSink),
        config,
    ))
}

/// Export the live asset, honoring an optional user-specified path
fn export(
    controller: &CaptureController<TestPatternCamera>,
    output: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let exported = controller.export_asset()?;
    if let Some(user_path) = output {
        if let Some(parent) = user_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::rename(&exported, &user_path)?;
        return Ok(user_path);
    }
    Ok(exported)
}

/// Capture a square still via a tap gesture
pub fn snap(facing: FacingMode, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(&Config::default_path());
    config.default_facing = facing;

    let rt = tokio::runtime::Runtime::new()?;
    let saved = rt.block_on(async {
        let mut controller = build_controller(config)?;
        controller.acquire_stream(facing).await?;

        // Tap: release well under the hold threshold
        controller.begin_press()?;
        tokio::time::sleep(Duration::from_millis(200)).await;
        let asset = controller.end_press().await?;
        print_asset(&asset);
        Ok::<_, CaptureError>(controller)
    })?;

    let path = export(&saved, output)?;
    println!("Photo saved: {}", path.display());
    Ok(())
}

/// Record a square clip via a hold gesture
pub fn record(
    facing: FacingMode,
    duration: u64,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(&Config::default_path());
    config.default_facing = facing;
    let ceiling = config.recording_ceiling();
    let threshold = config.hold_threshold();

    // Set up Ctrl+C handler for early stop
    let stop_flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let stop_flag_clone = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_clone.store(true, std::sync::atomic::Ordering::SeqCst);
    })?;

    println!("Recording... (press Ctrl+C to stop early)");
    println!(
        "Hold threshold: {:.1}s, ceiling: {:.1}s",
        threshold.as_secs_f64(),
        ceiling.as_secs_f64()
    );

    let rt = tokio::runtime::Runtime::new()?;
    let saved = rt.block_on(async {
        let mut controller = build_controller(config)?;
        controller.acquire_stream(facing).await?;

        controller.begin_press()?;
        let hold_for = threshold + Duration::from_secs(duration).min(ceiling);
        let start = tokio::time::Instant::now();
        while start.elapsed() < hold_for {
            if stop_flag.load(std::sync::atomic::Ordering::SeqCst) {
                println!();
                println!("Stopping early...");
                break;
            }
            let elapsed = start.elapsed().as_secs();
            print!("\rRecording: {:02}:{:02}", elapsed / 60, elapsed % 60);
            std::io::Write::flush(&mut std::io::stdout())?;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        println!();

        let asset = controller.end_press().await?;
        print_asset(&asset);
        Ok::<_, Box<dyn std::error::Error>>(controller)
    })?;

    let path = export(&saved, output)?;
    println!("Video saved: {}", path.display());
    Ok(())
}

/// Normalize a local image or video file into a square asset
pub fn import(input: PathBuf, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&Config::default_path());

    let rt = tokio::runtime::Runtime::new()?;
    let saved = rt.block_on(async {
        let mut controller = build_controller(config)?;
        // File selection needs no camera stream
        let asset = controller.select_file(&input).await?;
        print_asset(&asset);
        Ok::<_, CaptureError>(controller)
    })?;

    let path = export(&saved, output)?;
    println!("Saved: {}", path.display());
    Ok(())
}

/// Run the full press-to-post flow and submit to the console sink
pub fn post(
    facing: FacingMode,
    press_ms: u64,
    caption: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(&Config::default_path());
    config.default_facing = facing;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut controller = build_controller(config)?;
        controller.acquire_stream(facing).await?;

        controller.begin_press()?;
        tokio::time::sleep(Duration::from_millis(press_ms)).await;
        let asset = controller.end_press().await?;
        print_asset(&asset);

        if let Some(caption) = caption {
            controller.set_caption(caption);
        }
        controller.submit()?;
        println!("Post submitted (logged to console sink)");
        Ok::<_, CaptureError>(())
    })?;
    Ok(())
}

fn print_asset(asset: &Asset) {
    match asset.duration {
        Some(duration) => println!(
            "Captured {} asset: {}px square, {:.1}s",
            asset.kind,
            asset.square_size,
            duration.as_secs_f64()
        ),
        None => println!(
            "Captured {} asset: {}px square",
            asset.kind, asset.square_size
        ),
    }
}
