use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use cli::SketchJob;
use color_eyre::eyre::Result;
use lineart::{LineartConfig, SketchManager};
use playback::{
    AlwaysConfirm, ConfirmGate, Outcome, PlaybackConfig, PlaybackController, PointerDevice,
    RecordingPointer, StatusSink, TracingStatusSink, TriggerOutcome,
};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct LineartArgs {
    /// Lower edge-detection threshold
    #[arg(long, default_value = "50.0")]
    threshold_low: f32,
    /// Upper edge-detection threshold
    #[arg(long, default_value = "150.0")]
    threshold_high: f32,
    /// Draw dark strokes on a bright background
    #[arg(long)]
    invert: bool,
}

impl LineartArgs {
    fn to_config(&self) -> LineartConfig {
        LineartConfig {
            threshold_low: self.threshold_low,
            threshold_high: self.threshold_high,
            invert: self.invert,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct PlaybackArgs {
    /// Pause after each stroke, in milliseconds
    #[arg(long, default_value = "0")]
    stroke_delay_ms: u64,
    /// Keep every nth contour point
    #[arg(long, default_value = "1")]
    point_stride: i32,
    /// Minimum delay between pointer events, in seconds
    #[arg(long, default_value = "0.0")]
    pacing_secs: f64,
}

impl PlaybackArgs {
    fn to_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            stroke_delay_ms: self.stroke_delay_ms,
            point_stride: self.point_stride,
            pacing_secs: self.pacing_secs,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render an image to line art and save the mask as a PNG
    Trace {
        /// Path to the source image
        #[arg(short, long)]
        input: PathBuf,
        /// Path for the rendered line-art PNG
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        lineart: LineartArgs,
    },
    /// Trace an image and replay it as mouse drags
    Draw {
        /// Path to the source image
        #[arg(short, long)]
        input: PathBuf,
        /// X of the drawing area's top-left corner
        #[arg(long, default_value = "0")]
        origin_x: i32,
        /// Y of the drawing area's top-left corner
        #[arg(long, default_value = "0")]
        origin_y: i32,
        #[command(flatten)]
        lineart: LineartArgs,
        #[command(flatten)]
        playback: PlaybackArgs,
        /// Record pointer events instead of injecting them
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Run a complete job from a .toml or .json definition
    Run {
        /// Path to the job file
        #[arg(short, long)]
        config: PathBuf,
        /// Record pointer events instead of injecting them
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Capture the primary screen to an image file
    #[cfg(feature = "capture")]
    Capture {
        /// Path for the captured PNG
        #[arg(short, long)]
        output: PathBuf,
        /// Crop region as x,y,width,height
        #[arg(long, value_delimiter = ',', num_args = 4)]
        region: Option<Vec<u32>>,
    },
    /// Print the JSON schema for job files
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trace {
            input,
            output,
            lineart,
        } => {
            trace_image(&input, &output, &lineart.to_config())?;
        }
        Commands::Draw {
            input,
            origin_x,
            origin_y,
            lineart,
            playback,
            dry_run,
            yes,
        } => {
            let job = SketchJob {
                input_path: input.to_string_lossy().into_owned(),
                origin: [origin_x, origin_y],
                lineart: lineart.to_config(),
                playback: playback.to_config(),
            };
            draw_job(&job, dry_run, yes).await?;
        }
        Commands::Run {
            config,
            dry_run,
            yes,
        } => {
            let job = SketchJob::from_file(&config)?;
            info!(config = %config.display(), "loaded job definition");
            draw_job(&job, dry_run, yes).await?;
        }
        #[cfg(feature = "capture")]
        Commands::Capture { output, region } => {
            let region = region.map(|r| cli::capture::Region {
                x: r[0],
                y: r[1],
                width: r[2],
                height: r[3],
            });
            let shot = cli::capture::capture_screen(region)?;
            shot.save(&output)?;
            info!(output = %output.display(), "screen capture saved");
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(SketchJob);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn trace_image(input: &Path, output: &Path, config: &LineartConfig) -> Result<()> {
    let mut manager = SketchManager::new();
    manager.load_capture(input)?;
    let mask = manager.regenerate(config)?;
    let contours = lineart::decompose(mask)?;
    info!(
        width = mask.width(),
        height = mask.height(),
        contours = contours.len(),
        "line art rendered"
    );
    mask.as_image().save(output)?;
    info!(output = %output.display(), "line art saved");
    Ok(())
}

async fn draw_job(job: &SketchJob, dry_run: bool, yes: bool) -> Result<()> {
    let mut manager = SketchManager::new();
    manager.load_capture(Path::new(&job.input_path))?;
    let mask = manager.regenerate(&job.lineart)?.clone();

    let mut controller = PlaybackController::new();
    let sink: Arc<dyn StatusSink> = Arc::new(TracingStatusSink);
    let gate: Box<dyn ConfirmGate> = if yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(StdinConfirm)
    };

    // Ctrl-C requests cooperative cancellation instead of killing the
    // process mid-drag with the button held.
    let cancel = controller.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; stopping after the current move");
            cancel.cancel();
        }
    });

    let outcome = if dry_run {
        let device = RecordingPointer::new();
        let log = device.log();
        let triggered = trigger(&mut controller, device, &mask, job, gate.as_ref(), sink)?;
        let outcome = finish(&mut controller, triggered).await;
        info!(events = log.len(), "dry run recorded pointer events");
        outcome
    } else {
        let device = real_device()?;
        let triggered = trigger(&mut controller, device, &mask, job, gate.as_ref(), sink)?;
        finish(&mut controller, triggered).await
    };

    if let Some(Outcome::Failed(reason)) = outcome {
        return Err(color_eyre::eyre::eyre!("playback failed: {reason}"));
    }
    Ok(())
}

fn trigger<D: PointerDevice + 'static>(
    controller: &mut PlaybackController,
    device: D,
    mask: &lineart::EdgeMask,
    job: &SketchJob,
    gate: &dyn ConfirmGate,
    sink: Arc<dyn StatusSink>,
) -> Result<TriggerOutcome> {
    let outcome = controller.trigger(device, mask, job.origin, &job.playback, gate, sink)?;
    match outcome {
        TriggerOutcome::Started => {}
        TriggerOutcome::NoStrokes => warn!("nothing to draw"),
        TriggerOutcome::Declined => info!("drawing declined"),
        TriggerOutcome::AlreadyRunning => warn!("a drawing session is already running"),
    }
    Ok(outcome)
}

async fn finish(controller: &mut PlaybackController, triggered: TriggerOutcome) -> Option<Outcome> {
    if triggered != TriggerOutcome::Started {
        return None;
    }
    let outcome = tokio::task::block_in_place(|| controller.wait());
    if let Some(outcome) = &outcome {
        info!(%outcome, "playback finished");
    }
    outcome
}

#[cfg(feature = "inject")]
fn real_device() -> Result<playback::EnigoPointer> {
    Ok(playback::EnigoPointer::new()?)
}

#[cfg(not(feature = "inject"))]
fn real_device() -> Result<RecordingPointer> {
    warn!("built without the `inject` feature; recording events instead");
    Ok(RecordingPointer::new())
}

/// Asks on stdin before a session may start.
struct StdinConfirm;

impl ConfirmGate for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
