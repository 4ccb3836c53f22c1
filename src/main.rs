//! Command-line player: plays one preset for its full session duration,
//! then exits. There is no early-stop path in this surface.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use entrain::{
    AudioOutput, PlaybackController, PlaybackError, PresetCatalog, DEFAULT_DURATION,
    DEFAULT_SAMPLE_RATE,
};

#[derive(Parser, Debug)]
#[command(name = "entrain")]
#[command(about = "Play a binaural beat sweep preset", long_about = None)]
struct Args {
    /// Preset to play (e.g. alpha, focus, calm)
    preset: Option<String>,

    /// Session length in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_DURATION.as_secs())]
    duration_secs: u64,

    /// Output sample rate in Hz
    #[arg(long, value_name = "HZ", default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let catalog = PresetCatalog::builtin();

    // Both the missing and the invalid case name the valid presets.
    let Some(preset) = args.preset.clone() else {
        eprintln!(
            "Missing preset name. Available presets: {}",
            preset_list(&catalog)
        );
        return ExitCode::FAILURE;
    };

    match run(&args, &preset, catalog.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(PlaybackError::UnknownPreset { name }) =
                err.downcast_ref::<PlaybackError>()
            {
                eprintln!(
                    "Invalid preset name {name:?}. Available presets: {}",
                    preset_list(&catalog)
                );
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn preset_list(catalog: &PresetCatalog) -> String {
    catalog.names().collect::<Vec<_>>().join(", ")
}

async fn run(args: &Args, preset: &str, catalog: PresetCatalog) -> Result<()> {
    let sink = Arc::new(AudioOutput::init()?);
    let controller = PlaybackController::new(sink, catalog);

    let duration = Duration::from_secs(args.duration_secs);
    controller.start(preset, duration, args.sample_rate).await?;
    println!(
        "Playing {} for {}s at {} Hz",
        preset, args.duration_secs, args.sample_rate
    );

    controller.wait_until_idle().await;
    Ok(())
}
