//! xedl CLI Tool
//!
//! Command-line interface for converting xmeml editing projects to EDL files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use xedl_core::edl::{display_name, reel_name, sequence_title};
use xedl_core::timecode::format_frames;
use xedl_core::{parse_project, suggested_output_name, ConvertConfig, Sequence};

#[derive(Parser)]
#[command(name = "xedl")]
#[command(about = "xedl - Convert XML editing projects to Edit Decision Lists")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an XML project to an EDL file
    Convert {
        /// Input XML project path
        input: PathBuf,

        /// Output EDL path (defaults to <input>_converted.edl next to the input)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Frame rate used for all timecodes
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Write the EDL to standard output instead of a file
        #[arg(long)]
        stdout: bool,
    },

    /// Show the clips of an XML project
    Info {
        /// Input XML project path
        input: PathBuf,

        /// Frame rate used for all timecodes
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Print the parsed project as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            fps,
            stdout,
        } => convert_project(input, output, fps, stdout)?,

        Commands::Info { input, fps, json } => show_info(input, fps, json)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn convert_project(input: PathBuf, output: Option<PathBuf>, fps: u32, stdout: bool) -> Result<()> {
    let config = ConvertConfig::default().with_fps(fps);

    let data = std::fs::read(&input)
        .with_context(|| format!("Failed to read XML file {}", input.display()))?;
    let document = xedl_core::convert(&data, &config).context("Failed to convert XML project")?;

    if stdout {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", document).context("Failed to write EDL to stdout")?;
        return Ok(());
    }

    let output = output.unwrap_or_else(|| suggested_output_name(&input));
    debug!("Writing {} lines to {}", document.lines.len(), output.display());

    let file = File::create(&output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(document.to_text().as_bytes())
        .context("Failed to write EDL file")?;
    writer.flush().context("Failed to write EDL file")?;

    println!(
        "Successfully converted {} clips to EDL format.",
        document.clip_count
    );
    println!("Output saved to: {}", output.display());

    Ok(())
}

fn show_info(input: PathBuf, fps: u32, json: bool) -> Result<()> {
    let config = ConvertConfig::default().with_fps(fps);
    config.validate().context("Invalid conversion settings")?;

    let data = std::fs::read(&input)
        .with_context(|| format!("Failed to read XML file {}", input.display()))?;
    let sequence = parse_project(&data).context("Failed to parse XML project")?;

    if json {
        let text = serde_json::to_string_pretty(&sequence).context("Failed to serialize project")?;
        println!("{}", text);
        return Ok(());
    }

    print_info(&sequence, &config);
    Ok(())
}

fn print_info(sequence: &Sequence, config: &ConvertConfig) {
    println!("\n=== Sequence Information ===");
    println!("Title: {}", sequence_title(sequence, config));
    if !sequence.id.is_empty() {
        println!("ID: {}", sequence.id);
    }
    println!("Video tracks: {}", sequence.tracks.len());
    println!("Clips: {}", sequence.clip_count());
    println!("Frame rate: {} fps", config.fps);

    for (i, track) in sequence.tracks.iter().enumerate() {
        let name = if track.name.is_empty() {
            format!("V{}", i + 1)
        } else {
            track.name.clone()
        };
        println!("\n=== Track {} ({} clips) ===", name, track.clips.len());

        for clip in &track.clips {
            println!(
                "  {} [{}] src in {} out {} / rec {} - {}  ({})",
                clip.name,
                reel_name(clip),
                clip.in_frame,
                clip.out_frame,
                format_frames(clip.start, config.fps),
                format_frames(clip.end, config.fps),
                display_name(clip, &config.fallback_extension)
            );
        }
    }
}
