//! mgather - Media Gatherer
//!
//! Scan a source tree for media files and copy them into per-folder
//! buckets under a destination root, powered by mediagather.

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mediagather::{
    CopyPlan, Error as GatherError, ExecStats, GatherOptions, OnError, SuffixFilter,
    create_progress_bar, execute_with_progress, is_no_space_error, plan, scan,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

/// mgather - Gather media files
///
/// Scan SOURCE recursively for files matching a set of suffixes and copy
/// each one into DEST/<parent-folder-name>/, giving colliding folder names
/// unique suffixes instead of merging them.
///
/// Usage:
///   mgather SOURCE DEST
///   mgather -n SOURCE DEST        (show the plan, copy nothing)
#[derive(Parser, Debug)]
#[command(name = "mgather", version, about, long_about = None)]
struct Args {
    /// Source directory to scan
    source: PathBuf,

    /// Destination root directory
    dest: PathBuf,

    /// File suffix to collect (repeatable; defaults to common image and
    /// video extensions)
    #[arg(short = 's', long = "suffix", value_name = "EXT")]
    suffixes: Vec<String>,

    /// Number of parallel copy operations
    #[arg(short = 'j', long, default_value = "16")]
    jobs: usize,

    /// Attempt every copy and report all failures at the end, instead of
    /// aborting on the first one
    #[arg(long)]
    best_effort: bool,

    /// Print what would be copied without actually copying
    #[arg(short = 'n', long = "plan", alias = "dry-run")]
    plan: bool,

    /// Output format for --plan
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Do not preserve file timestamps
    #[arg(long)]
    no_times: bool,

    /// Do not call fsync after each file (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// Do not write the manifest file at the destination root
    #[arg(long)]
    no_manifest: bool,

    /// Disable progress display
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Gather(#[from] GatherError),

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Gather(
                GatherError::InvalidPath(_)
                | GatherError::SourceNotFound(_)
                | GatherError::NotADirectory(_),
            ) => 2,
            Self::Gather(GatherError::Cancelled { .. }) => 130,
            _ => 1,
        }
    }
}

fn main() {
    if let Err(error) = run() {
        if let CliError::Gather(GatherError::Cancelled {
            files_copied,
            bytes_copied,
        }) = &error
        {
            eprintln!(
                "Cancelled after copying {} files ({}).",
                files_copied,
                format_bytes(*bytes_copied)
            );
            std::process::exit(130);
        }

        if let CliError::Gather(GatherError::PartialCopy { failures, .. }) = &error {
            for (path, cause) in failures {
                eprintln!("failed: {}: {}", path.display(), cause);
            }
        }

        if let CliError::Gather(GatherError::Copy { source, .. }) = &error {
            if is_no_space_error(source) {
                eprintln!("error: {}", error);
                eprintln!("Destination has no space left; free up space and re-run.");
                std::process::exit(1);
            }
        }

        eprintln!("error: {}", error);
        std::process::exit(error.exit_code());
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();

    let mut options = GatherOptions::default().with_parallel(args.jobs);
    if args.best_effort {
        options = options.with_on_error(OnError::BestEffort);
    }
    if args.no_times {
        options = options.without_timestamps();
    }
    if args.no_sync {
        options = options.without_fsync();
    }
    if args.no_manifest {
        options = options.without_manifest();
    }
    if args.verbose {
        options = options.with_warn_handler(|msg| {
            eprintln!("warning: {}", msg);
        });
    }

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel_clone = cancel.clone();
        ctrlc::set_handler(move || {
            if cancel_clone.load(Ordering::Relaxed) {
                eprintln!("\nForce quit.");
                std::process::exit(130);
            }
            cancel_clone.store(true, Ordering::Relaxed);
            eprintln!(
                "\nCancelling... finishing in-flight files. Press Ctrl+C again to abort immediately."
            );
        })
        .ok();
    }
    options = options.with_cancel_token(cancel);

    let filter = if args.suffixes.is_empty() {
        SuffixFilter::default()
    } else {
        SuffixFilter::new(&args.suffixes)
    };

    let show_progress = args.output == OutputMode::Human && !args.quiet && !args.plan;

    let scan_spinner = if show_progress {
        spinner(format!("Scanning {}...", args.source.display()))
    } else {
        None
    };

    let scan_result = scan(&args.source, &filter, &options);
    if let Some(spinner) = scan_spinner {
        spinner.finish_and_clear();
    }
    let copy_plan = plan(scan_result?, &args.dest)?;

    if args.plan {
        return emit_plan_output(args.output, &copy_plan);
    }

    let pb = if show_progress {
        Some(create_progress_bar(copy_plan.len() as u64))
    } else {
        None
    };

    let pb_ref = pb.as_ref();
    let result = execute_with_progress(&copy_plan, &options, || {
        if let Some(pb) = pb_ref {
            pb.inc(1);
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let stats = result?;
    print_stats(&stats, copy_plan.dest_dirs().len(), args.verbose);
    Ok(())
}

fn spinner(message: String) -> Option<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner().template("{spinner:.green} {msg}");
    match style {
        Ok(style) => {
            pb.set_style(style);
            pb.enable_steady_tick(Duration::from_millis(100));
            pb.set_message(message);
            Some(pb)
        }
        Err(_) => None,
    }
}

fn emit_plan_output(output_mode: OutputMode, copy_plan: &CopyPlan) -> CliResult<()> {
    match output_mode {
        OutputMode::Human => {
            println!(
                "Plan ({} files into {} directories):",
                copy_plan.len(),
                copy_plan.dest_dirs().len()
            );
            for assignment in copy_plan.assignments() {
                println!(
                    "  {} -> {}",
                    assignment.source().path().display(),
                    assignment.dest_dir().display()
                );
            }
            Ok(())
        }
        OutputMode::Json => {
            let payload = json!({
                "schema_version": "1.0",
                "mode": "plan",
                "dest_root": display_path(copy_plan.dest_root()),
                "dest_dirs": copy_plan
                    .dest_dirs()
                    .iter()
                    .map(|d| Value::String(display_path(d)))
                    .collect::<Vec<Value>>(),
                "items": copy_plan
                    .assignments()
                    .iter()
                    .map(|a| json!({
                        "source": display_path(a.source().path()),
                        "dest_dir": display_path(a.dest_dir()),
                    }))
                    .collect::<Vec<Value>>(),
            });
            let serialized = serde_json::to_string(&payload)
                .map_err(|source| CliError::JsonSerialize { source })?;
            println!("{serialized}");
            Ok(())
        }
    }
}

fn print_stats(stats: &ExecStats, dirs_planned: usize, verbose: bool) {
    if stats.files_copied == 0 {
        println!("Nothing to copy");
        return;
    }

    let bytes_str = format_bytes(stats.bytes_copied);

    if verbose {
        println!("Gather completed in {:?}", stats.duration);
        println!("  Files copied:   {}", stats.files_copied);
        println!("  Directories:    {} ({} planned)", stats.dirs_created, dirs_planned);
        println!("  Total size:     {}", bytes_str);

        if stats.duration.as_secs_f64() > 0.0 {
            let speed = stats.bytes_copied as f64 / stats.duration.as_secs_f64();
            println!("  Speed:          {}/s", format_bytes(speed as u64));
        }
    } else {
        println!(
            "Copied {} files into {} dirs ({})",
            stats.files_copied, stats.dirs_created, bytes_str
        );
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
