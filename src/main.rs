mod cli;

use vidsplit::{
    config,
    library::MediaLibrary,
    probe,
    session::{ConfirmSplit, FfmpegExporter, SessionEvent, SessionOutcome, SplitDriver},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use vidsplit_av::{Container, ScratchDir};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidsplit=trace,vidsplit_av=debug".to_string()
        } else {
            "vidsplit=info,vidsplit_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Split {
            input,
            seconds,
            library,
            container,
            yes,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_split(
                &input,
                seconds,
                library,
                container,
                yes,
                cli.config.as_deref(),
            ))
        }
        Commands::Probe { file, json } => probe_file(&file, json, cli.config.as_deref()),
        Commands::CheckTools => check_tools(),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("vidsplit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Auto-approves large estimates (`--yes`).
struct AutoConfirm;

#[async_trait]
impl ConfirmSplit for AutoConfirm {
    async fn confirm(&self, _estimated_segments: u32) -> bool {
        true
    }
}

/// Asks on the terminal before a large session starts.
struct PromptConfirm;

#[async_trait]
impl ConfirmSplit for PromptConfirm {
    async fn confirm(&self, estimated_segments: u32) -> bool {
        tokio::task::spawn_blocking(move || {
            use std::io::Write;

            print!(
                "{} videos are estimated to be created. Continue? [y/N] ",
                estimated_segments
            );
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            if std::io::stdin().read_line(&mut line).is_err() {
                return false;
            }
            matches!(line.trim(), "y" | "Y" | "yes")
        })
        .await
        .unwrap_or(false)
    }
}

async fn run_split(
    input: &Path,
    seconds: u64,
    library_override: Option<PathBuf>,
    container_override: Option<Container>,
    yes: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let ffprobe = vidsplit_av::get_tool_path("ffprobe", config.tools.ffprobe.as_deref())?;
    let ffmpeg = vidsplit_av::get_tool_path("ffmpeg", config.tools.ffmpeg.as_deref())?;

    tracing::info!("Probing {:?}", input);
    let source = probe::probe_file_with(&ffprobe, input)?;

    if source.primary_video().is_none() {
        anyhow::bail!("Not a video file: {:?}", input);
    }

    let total = source
        .duration_secs()
        .with_context(|| format!("Source reports no duration: {:?}", input))?;

    // Bound the chosen duration the way the original slider does:
    // [1, min(max_seconds, ceil(source duration))]
    let bound = config.split.max_seconds.min(total.ceil() as u64);
    let seconds = if seconds > bound {
        println!("Segment length clamped to {} seconds.", bound);
        bound
    } else {
        seconds
    };

    let container = container_override.unwrap_or(config.split.container);
    let library_root = library_override
        .map(|p| config::expand_path(&p))
        .unwrap_or(config.library.path.clone());
    let library = MediaLibrary::new(library_root);

    let scratch = ScratchDir::new()?;
    let exporter = FfmpegExporter::new(ffmpeg, source, scratch, library.clone(), container);

    // Progress display, fed by session events
    let (event_tx, mut event_rx) = broadcast::channel::<SessionEvent>(32);
    let printer = tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            match event {
                SessionEvent::SessionStarted { estimated_segments } => {
                    println!("Processing 1 of {}", estimated_segments);
                }
                SessionEvent::SegmentExported {
                    index,
                    estimated_segments,
                } => {
                    println!("Processing {} of {}", index + 1, estimated_segments);
                }
                _ => {}
            }
        }
    });

    // Ctrl-C cancels between steps; the in-flight segment still finishes
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let confirm: Box<dyn ConfirmSplit> = if yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(PromptConfirm)
    };

    let mut driver = SplitDriver::new(&exporter, &library, confirm.as_ref())
        .with_confirm_threshold(config.split.confirm_threshold)
        .with_events(event_tx)
        .with_cancellation(cancel);

    let result = driver.run(total, seconds).await;

    // Dropping the driver closes the event channel and ends the printer
    drop(driver);
    let _ = printer.await;

    match result? {
        SessionOutcome::Completed { segments } => {
            println!(
                "Split finished! {} segments saved to {}",
                segments,
                library.root().display()
            );
        }
        SessionOutcome::Declined => {
            println!("Split cancelled.");
        }
        SessionOutcome::Cancelled { segments } => {
            println!(
                "Split interrupted after {} segments; finished segments remain in {}",
                segments,
                library.root().display()
            );
        }
    }

    Ok(())
}

fn probe_file(file: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let ffprobe = vidsplit_av::get_tool_path("ffprobe", config.tools.ffprobe.as_deref())?;
    let media_info = probe::probe_file_with(&ffprobe, file)?;

    if json {
        let json_str = serde_json::to_string_pretty(&media_info)?;
        println!("{}", json_str);
    } else {
        println!("File: {}", media_info.file_path.display());
        println!("Container: {}", media_info.container);
        println!("Size: {} bytes", media_info.file_size);
        if let Some(ref duration) = media_info.duration {
            let secs = duration.as_secs();
            let mins = secs / 60;
            let hours = mins / 60;
            println!("Duration: {:02}:{:02}:{:02}", hours, mins % 60, secs % 60);
        }

        println!("\nVideo Tracks: {}", media_info.video_tracks.len());
        for (i, track) in media_info.video_tracks.iter().enumerate() {
            print!("  [{}] {} {}x{}", i, track.codec, track.width, track.height);
            if let Some(fps) = track.frame_rate {
                print!(", {:.3} fps", fps);
            }
            if let Some(rotation) = track.rotation {
                print!(", rotated {}°", rotation);
            }
            println!();
        }

        println!("\nAudio Tracks: {}", media_info.audio_tracks.len());
        for (i, track) in media_info.audio_tracks.iter().enumerate() {
            print!("  [{}] {} {}ch", i, track.codec, track.channels);
            if let Some(ref lang) = track.language {
                print!(" ({})", lang);
            }
            if track.default {
                print!(" [default]");
            }
            println!();
        }
    }

    Ok(())
}

fn check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = probe::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable splitting.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Library: {}", config.library.path.display());
            println!("  Max segment length: {}s", config.split.max_seconds);
            println!("  Confirm threshold: {}", config.split.confirm_threshold);
            println!("  Container: {}", config.split.container);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Library: {}", config.library.path.display());
            println!("  Max segment length: {}s", config.split.max_seconds);
        }
    }

    Ok(())
}
