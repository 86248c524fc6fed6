use anyhow::Context;
use clap::{Parser, Subcommand};
use marchview_camera::{CameraConfig, CameraState};
use marchview_control::{ManualScheduler, RenderLoop};
use marchview_input::{BINDINGS, binding};
use marchview_render::DebugTextRenderer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marchview-cli", about = "Headless tool for the marchview camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the key bindings
    Info,
    /// Hold keys for a number of ticks and report where the camera ends up
    Fly {
        /// Keys to hold, comma separated (e.g. `w,ArrowRight`)
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,
        /// Ticks to hold the keys before releasing them
        #[arg(short, long, default_value = "10")]
        ticks: u64,
        /// Optional YAML camera config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print every rendered frame
        #[arg(long)]
        trace: bool,
    },
}

/// Result of a simulated flight.
struct Flight {
    frames: Vec<String>,
    camera: CameraState,
    ticks: u64,
    running: bool,
}

/// Keys in `keys` with no binding. They still keep the loop running.
fn unbound_keys(keys: &[String]) -> Vec<&str> {
    keys.iter()
        .map(String::as_str)
        .filter(|key| binding(key).is_none())
        .collect()
}

/// Drive the render loop headlessly: startup render, hold `keys` for `ticks`
/// frames, release them, then drain the trailing frame.
fn fly(camera: CameraState, keys: &[String], ticks: u64) -> Flight {
    let mut renderer = DebugTextRenderer::new();
    let mut frame_loop = RenderLoop::new(camera, ManualScheduler::new());
    let mut frames = vec![frame_loop.start(&mut renderer)];

    for key in keys {
        frame_loop.key_down(key);
    }
    for _ in 0..ticks {
        match frame_loop.step(&mut renderer) {
            Some(frame) => frames.push(frame),
            None => break,
        }
    }
    for key in keys {
        frame_loop.key_up(key);
    }
    while let Some(frame) = frame_loop.step(&mut renderer) {
        frames.push(frame);
    }

    Flight {
        frames,
        camera: frame_loop.camera().clone(),
        ticks: frame_loop.ticks(),
        running: frame_loop.is_running(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("marchview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", marchview_input::crate_info());
            println!("render: {}", marchview_render::crate_info());
            println!("bindings:");
            for (key, action) in BINDINGS {
                println!("  {key:>10}  {action:?}");
            }
        }
        Commands::Fly {
            keys,
            ticks,
            config,
            trace,
        } => {
            let config = match &config {
                Some(path) => CameraConfig::load(path)
                    .with_context(|| format!("loading camera config {}", path.display()))?,
                None => CameraConfig::default(),
            };
            for key in unbound_keys(&keys) {
                tracing::warn!(key, "key is unbound; the camera will not move for it");
            }
            tracing::info!(?keys, ticks, "simulating flight");

            let flight = fly(config.camera(), &keys, ticks);
            if trace {
                for frame in &flight.frames {
                    println!("{frame}");
                }
            }

            let camera = &flight.camera;
            let basis = camera.basis();
            println!(
                "ticks={} frames={} running={}",
                flight.ticks,
                flight.frames.len(),
                flight.running
            );
            println!(
                "position=({:.4}, {:.4}, {:.4}) yaw={:.4} pitch={:.4}",
                camera.position.x, camera.position.y, camera.position.z, camera.yaw, camera.pitch
            );
            println!(
                "back=({:.4}, {:.4}, {:.4}) right=({:.4}, {:.4}, {:.4})",
                basis.back.x, basis.back.y, basis.back.z, basis.right.x, basis.right.y, basis.right.z
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn no_keys_renders_only_startup_frame() {
        let flight = fly(CameraState::default(), &[], 10);
        assert_eq!(flight.frames.len(), 1);
        assert_eq!(flight.ticks, 0);
        assert!(!flight.running);
    }

    #[test]
    fn forward_flight_includes_trailing_frame() {
        let flight = fly(CameraState::default(), &keys(&["w"]), 10);
        // Startup + 10 held ticks + 1 after release.
        assert_eq!(flight.frames.len(), 12);
        assert_eq!(flight.ticks, 11);
        assert!(!flight.running);
        assert!((flight.camera.position.z - -1.95).abs() < 1e-5);
        assert!(flight.frames.last().unwrap().starts_with("frame 12:"));
    }

    #[test]
    fn turn_flight_keeps_position() {
        let flight = fly(CameraState::default(), &keys(&["ArrowRight"]), 5);
        assert!((flight.camera.yaw - 0.05).abs() < 1e-5);
        assert_eq!(flight.camera.position, CameraState::default().position);
    }

    #[test]
    fn reports_unbound_keys() {
        let keys = keys(&["w", "W", "ArrowLeft", "Shift"]);
        assert_eq!(unbound_keys(&keys), vec!["W", "Shift"]);
        assert!(unbound_keys(&[]).is_empty());
    }

    #[test]
    fn parses_comma_separated_keys() {
        let cli = Cli::parse_from(["marchview-cli", "fly", "--keys", "w,ArrowLeft", "--ticks", "3"]);
        match cli.command {
            Commands::Fly { keys, ticks, .. } => {
                assert_eq!(keys, vec!["w".to_string(), "ArrowLeft".to_string()]);
                assert_eq!(ticks, 3);
            }
            Commands::Info => panic!("expected fly"),
        }
    }
}
