//! CLI entry point for dirsnap

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, SystemTime};

use clap::{Parser, ValueEnum};
use dirsnap::output::display_path;
use dirsnap::walk::resolve_root;
use dirsnap::{Entry, ListFormatter, OutputConfig, WalkerConfig, print_json, walk};
use regex::Regex;
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirsnap")]
#[command(about = "List every file and directory beneath a root, with metadata")]
#[command(version)]
struct Args {
    /// Directory to walk
    #[arg(default_value = ".")]
    path: PathBuf,

    /// List directories only
    #[arg(short = 'd', long = "dirs-only")]
    dirs_only: bool,

    /// List files only (everything that is not a directory)
    #[arg(short = 'f', long = "files-only", conflicts_with = "dirs_only")]
    files_only: bool,

    /// Descend at most N levels below the root's children (-1 = unlimited)
    #[arg(
        short = 'L',
        long = "depth",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    depth: i64,

    /// Skip entries matching a glob, and everything beneath them
    /// (can be used multiple times; prefix with ! to re-include)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Only show entries whose path relative to the root matches REGEX
    #[arg(short = 'm', long = "match", value_name = "REGEX")]
    pattern: Option<String>,

    /// Only show files modified more recently than DURATION ago
    /// Duration format: 30s, 5m, 1h, 7d, 2w, 3M, 1y
    #[arg(long = "newer", value_name = "DURATION")]
    newer: Option<String>,

    /// Only show files modified longer than DURATION ago
    #[arg(long = "older", value_name = "DURATION")]
    older: Option<String>,

    /// Do not descend into directories rejected by --match/--newer/--older
    /// (with --files-only, no directory is descended into)
    #[arg(long = "prune")]
    prune: bool,

    /// Sort output by path instead of directory listing order
    #[arg(short = 's', long = "sort")]
    sort: bool,

    /// Long format: type, permissions, links, size, mtime
    #[arg(short = 'l', long = "long", conflicts_with = "json")]
    long: bool,

    /// Print paths relative to the root
    #[arg(short = 'r', long = "relative")]
    relative: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

/// Parse a duration string like "1h", "7d", "2w" into a Duration.
fn parse_duration_string(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("dirsnap: {}", message);
    process::exit(1);
}

fn cutoff(flag: &str, value: &Option<String>) -> Option<SystemTime> {
    value.as_ref().map(|s| {
        let duration = parse_duration_string(s)
            .unwrap_or_else(|e| fail(format!("invalid --{} duration '{}': {}", flag, s, e)));
        SystemTime::now()
            .checked_sub(duration)
            .unwrap_or(SystemTime::UNIX_EPOCH)
    })
}

/// Time window applied to non-directory entries.
fn in_time_window(entry: &Entry, newer: Option<SystemTime>, older: Option<SystemTime>) -> bool {
    if entry.is_dir() {
        return true;
    }
    // Entries without an mtime are kept
    let Some(mtime) = entry.metadata.modified else {
        return true;
    };
    newer.is_none_or(|n| mtime >= n) && older.is_none_or(|o| mtime <= o)
}

fn build_config(args: &Args, root: &Path) -> WalkerConfig {
    let mut config = WalkerConfig::default()
        .include_directories(!args.files_only)
        .include_files(!args.dirs_only)
        .ignore_patterns(args.ignore.iter().cloned())
        .no_recurse_on_failed_filter(args.prune)
        .with_depth_sentinel(args.depth)
        .unwrap_or_else(|e| fail(e));

    let regex = args.pattern.as_ref().map(|p| {
        Regex::new(p).unwrap_or_else(|e| fail(format!("invalid --match regex '{}': {}", p, e)))
    });
    let newer = cutoff("newer", &args.newer);
    let older = cutoff("older", &args.older);

    if regex.is_some() || newer.is_some() || older.is_some() {
        let root = root.to_path_buf();
        config = config.filter(move |entry| {
            let path_ok = regex
                .as_ref()
                .is_none_or(|re| re.is_match(&display_path(&entry.path, Some(&root))));
            path_ok && in_time_window(entry, newer, older)
        });
    }
    config
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let root = resolve_root(&args.path).unwrap_or_else(|e| fail(e));
    let config = build_config(&args, &root);
    tracing::debug!(?config, "parsed arguments");

    let mut entries = walk(&root, &config).unwrap_or_else(|e| fail(e));
    if args.sort {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
    }

    let relative_to = args.relative.then(|| root.clone());
    let result = if args.json {
        print_json(&entries, relative_to.as_deref())
    } else {
        let formatter = ListFormatter::new(OutputConfig {
            use_color: should_use_color(args.color),
            long: args.long,
            relative_to,
        });
        formatter.print(&entries)
    };

    if let Err(e) = result {
        fail(format!("error writing output: {}", e));
    }
}
