use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

#[derive(Parser, Debug)]
#[command(name = "writepad", version)]
struct Cli {
    /// Log at debug level instead of info.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate exported rounds and print the verdict as JSON.
    Validate(ValidateArgs),
    /// Print totals for a stroke data document.
    Stats(StatsArgs),
    /// Fill the offline cache from a local copy of the app, then drop stale caches.
    Precache(PrecacheArgs),
    /// Resolve one URL through the offline cache and write the body to stdout.
    Respond(RespondArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Rounds JSON (object keyed by round timestamp).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Grid JSON with at least `ROW_COUNT` and `GROUP_COUNT`. Defaults to the standard 4x6 grid.
    #[arg(long)]
    grid: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Stroke data JSON, as produced by `getStrokeData`.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PrecacheArgs {
    /// Directory served as the site root (`/writepad/...` resolves below it).
    #[arg(long)]
    root: PathBuf,

    /// Cache storage directory.
    #[arg(long)]
    cache_dir: PathBuf,

    /// Optional pad config JSON; only the `cache` section is used.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RespondArgs {
    /// Cache storage directory.
    #[arg(long)]
    cache_dir: PathBuf,

    /// Site root used on a cache miss.
    #[arg(long)]
    root: PathBuf,

    url: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Precache(args) => cmd_precache(args),
        Command::Respond(args) => cmd_respond(args),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    let v = serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))?;
    Ok(v)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let rounds: writepad::RoundsMap = read_json(&args.in_path, "rounds")?;
    let grid = match &args.grid {
        Some(path) => {
            let grid: writepad::GridConfig = read_json(path, "grid")?;
            grid.validate()?;
            grid
        }
        None => writepad::GridConfig::default(),
    };

    let verdict = writepad::validate_session(&rounds, &grid);
    println!("{}", serde_json::to_string_pretty(&verdict)?);

    if !verdict.is_exportable() {
        anyhow::bail!("session is not exportable ({} issue(s))", verdict.issues.len());
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let data: writepad::StrokeData = read_json(&args.in_path, "stroke data")?;
    let recomputed = writepad::StrokeMetadata::summarize(&data.strokes);
    let duration_ms = data
        .start_time
        .map(|start| data.end_time.saturating_sub(start));

    let out = serde_json::json!({
        "totalStrokes": recomputed.total_strokes,
        "totalPoints": recomputed.total_points,
        "strokesInCells": recomputed.strokes_in_cells,
        "durationMs": duration_ms,
        "metadataConsistent": data.metadata_consistent(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_precache(args: PrecacheArgs) -> anyhow::Result<()> {
    let cache_cfg = match &args.config {
        Some(path) => writepad::PadConfig::from_json_file(path)?.cache,
        None => writepad::CacheConfig::default(),
    };

    let full = writepad::PrecacheManifest::writepad_named(cache_cfg.cache_name.as_str());
    let local: Vec<String> = full.local_urls().map(str::to_string).collect();
    let skipped = full.urls.len() - local.len();
    if skipped > 0 {
        tracing::info!(skipped, "remote urls are not precached from a local root");
    }
    let manifest = writepad::PrecacheManifest::new(cache_cfg.cache_name, local);

    let mut cache = writepad::OfflineCache::new(
        writepad::FsCacheStorage::new(&args.cache_dir),
        writepad::FsFetcher::new(&args.root),
        manifest,
    )
    .with_chunk_size(cache_cfg.chunk_size);

    let report = cache
        .install()
        .with_context(|| format!("precache from '{}'", args.root.display()))?;
    let deleted = cache.activate()?;

    let out = serde_json::json!({
        "cache": cache.cache_name(),
        "cached": report.cached,
        "chunks": report.chunks,
        "deleted": deleted,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_respond(args: RespondArgs) -> anyhow::Result<()> {
    let cache = writepad::OfflineCache::new(
        writepad::FsCacheStorage::new(&args.cache_dir),
        writepad::FsFetcher::new(&args.root),
        writepad::PrecacheManifest::writepad(),
    );
    let served = cache.respond(&args.url);
    eprintln!(
        "{:?} {} ({} bytes)",
        served.source,
        served.response.content_type,
        served.response.body.len()
    );
    std::io::stdout()
        .write_all(&served.response.body)
        .context("write response body")?;
    Ok(())
}
