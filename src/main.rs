//! Headless runner: load a scene document, play a path for a number of
//! fixed-step frames, and print what the last frame saw as JSON.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use visionlab::engine::{FrameDriver, FrameReport};
use visionlab::options::Options;
use visionlab::scene::{Scene, SceneDocument, SceneStore};
use visionlab::VisionLabError;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a work-cell scene headlessly")]
struct Args {
    /// Scene document (JSON)
    scene: PathBuf,
    /// Path to play; defaults to the first robot's assigned path
    #[arg(long)]
    path: Option<String>,
    /// Number of frames to run
    #[arg(long, default_value_t = 60)]
    frames: u32,
    /// Seconds per frame (capped by `simulation.max_frame_delta` when set)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Speed multiplier
    #[arg(long, default_value_t = 1.0)]
    speed: f32,
    /// Options file (TOML)
    #[arg(long)]
    options: Option<PathBuf>,
    /// Write the resulting scene document here
    #[arg(long)]
    out: Option<PathBuf>,
}

fn summary(scene: &Scene, report: &FrameReport, frames: u32) -> serde_json::Value {
    let visibility: serde_json::Map<String, serde_json::Value> = report
        .visibility
        .iter()
        .map(|camera| (camera.camera_id.clone(), json!(camera.visible_ids)))
        .collect();
    json!({
        "frames": frames,
        "simulation": scene.simulation(),
        "completed": report.completed,
        "collidingIds": report.colliding_ids,
        "visibility": visibility,
    })
}

/// Path of the first robot that has one, else the first path.
fn default_path(scene: &Scene) -> Option<String> {
    scene
        .objects()
        .iter()
        .filter_map(|o| o.as_robot()?.path_id.clone())
        .find(|id| scene.path(id).is_some())
        .or_else(|| scene.paths().first().map(|p| p.id.clone()))
}

fn run(args: &Args) -> Result<(), VisionLabError> {
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let document = SceneDocument::load(&args.scene)?;
    let mut scene = Scene::from_document(document);
    scene.set_limits(options.simulation.clone());
    scene.set_speed(args.speed);

    let path_id = args.path.clone().or_else(|| default_path(&scene));
    if let Some(id) = path_id {
        if !scene.play(&id) {
            return Err(VisionLabError::UnknownPath { path_id: id });
        }
    } else {
        log::warn!("scene has no paths; running without playback");
    }

    let driver = FrameDriver::new(options);
    let mut last = FrameReport::default();
    let mut frames = 0;
    while frames < args.frames {
        let report = driver.tick(&mut scene, args.dt);
        frames += 1;
        if report.colliding_ids != last.colliding_ids {
            log::info!("frame {frames}: colliding {:?}", report.colliding_ids);
        }
        if report.visibility != last.visibility {
            for camera in &report.visibility {
                log::info!(
                    "frame {frames}: {} sees {:?}",
                    camera.camera_id,
                    camera.visible_ids
                );
            }
        }
        last = report;
        if last.completed {
            log::info!("playback finished after {frames} frames");
            break;
        }
    }

    let text = serde_json::to_string_pretty(&summary(&scene, &last, frames))?;
    writeln!(std::io::stdout(), "{text}")?;

    if let Some(out) = &args.out {
        scene.to_document().save(out)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
