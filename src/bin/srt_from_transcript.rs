use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use subtitle_binner::{
    Meta, Report, SubtitleConfig, SubtitlePipelineBuilder, TrackReport, REPORT_SCHEMA_VERSION,
};

#[derive(Debug, Parser)]
#[command(name = "srt_from_transcript")]
#[command(about = "Group word-timed recognizer output into SubRip subtitle files")]
struct Args {
    /// Recognizer response JSON files (`results[].alternatives[].words[]`).
    #[arg(required = true)]
    responses: Vec<PathBuf>,
    /// Directory for the `.srt` files; defaults to each response's directory.
    #[arg(long, env = "SUBTITLE_BIN_OUT_DIR")]
    out_dir: Option<PathBuf>,
    #[arg(
        long,
        env = "SUBTITLE_BIN_SECONDS",
        default_value_t = SubtitleConfig::DEFAULT_BIN_SECONDS
    )]
    bin_seconds: f64,
    /// Write a JSON report covering every processed response.
    #[arg(long, env = "SUBTITLE_BIN_REPORT")]
    report: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    // Fail on a bad bin before any file is touched.
    SubtitleConfig {
        bin_seconds: args.bin_seconds,
        ..SubtitleConfig::default()
    }
    .bin_duration()
    .map_err(|err| format!("--bin-seconds: {err}"))?;

    let progress = ProgressBar::new(args.responses.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let mut tracks: Vec<TrackReport> = Vec::with_capacity(args.responses.len());
    let mut written = Vec::with_capacity(args.responses.len());
    for response in &args.responses {
        progress.set_message(response.display().to_string());
        let output = srt_output_path(response, args.out_dir.as_deref())?;
        let config = SubtitleConfig {
            response_path: response.to_string_lossy().into_owned(),
            output_path: output.to_string_lossy().into_owned(),
            bin_seconds: args.bin_seconds,
        };

        let pipeline = SubtitlePipelineBuilder::new(config)
            .build()
            .map_err(|err| format!("{}: {err}", response.display()))?;
        let run = pipeline
            .run()
            .map_err(|err| format!("{}: {err}", response.display()))?;

        tracks.push(run.report);
        written.push(output);
        progress.inc(1);
    }
    progress.finish_and_clear();

    for path in &written {
        println!("{}", path.display());
    }

    if let Some(report_path) = args.report.as_ref() {
        let report = Report {
            schema_version: REPORT_SCHEMA_VERSION,
            meta: Meta {
                generated_at: Utc::now().to_rfc3339(),
                bin_seconds: args.bin_seconds,
                track_count: tracks.len(),
            },
            tracks,
        };
        report
            .write_json(report_path)
            .map_err(|err| format!("{}: {err}", report_path.display()))?;
        println!("{}", report_path.display());
    }

    Ok(())
}

fn srt_output_path(response: &Path, out_dir: Option<&Path>) -> Result<PathBuf, String> {
    let stem = response
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| format!("Cannot derive an output name from '{}'", response.display()))?;
    let file_name = format!("{}.srt", stem.to_string_lossy());
    Ok(match out_dir {
        Some(dir) => dir.join(file_name),
        None => response.with_file_name(file_name),
    })
}
