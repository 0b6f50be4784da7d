use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gridpath_core::Point;
use gridpath_service::ascii_map::AsciiMap;
use gridpath_service::{AsyncRequestHandler, Config, SearchRequest, TargetTracking};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "gridpath", version, about = "Run one path search or waypoint sample against an ASCII map")]
struct Args {
    /// ASCII map, `#` marks collidable cells
    #[arg(long = "map", value_name = "PATH")]
    map: PathBuf,

    /// Start point in world units
    #[arg(long = "from", value_name = "X,Y", value_parser = parse_point)]
    from: Point,

    /// Goal point in world units
    #[arg(long = "to", value_name = "X,Y", value_parser = parse_point, required_unless_present = "radius", conflicts_with = "radius")]
    to: Option<Point>,

    /// Sample a random waypoint within this radius of --from instead
    #[arg(long = "radius", value_name = "R")]
    radius: Option<f32>,

    /// Poll interval in milliseconds (overrides GRIDPATH_TICK_MS)
    #[arg(long = "tick-ms", value_name = "MS")]
    tick_ms: Option<u64>,
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().with_writer(std::io::stderr).init();

    let args = Args::parse();
    let mut cfg = Config::from_env();
    if let Some(ms) = args.tick_ms {
        cfg.tick_ms = ms;
    }

    let text = std::fs::read_to_string(&args.map).with_context(|| format!("reading map {}", args.map.display()))?;
    let map = AsciiMap::parse(&text).context("parsing map")?;
    let engine = Arc::new(map.to_engine(&cfg.engine).context("building path engine")?);
    let handler = AsyncRequestHandler::from_config(Arc::clone(&engine), &cfg)?;
    info!(core_version = %gridpath_core::version(), width = map.width, height = map.height, "map loaded");

    let (request, mut tracking) = match (args.to, args.radius) {
        (Some(goal), _) => (SearchRequest::path(args.from, goal), TargetTracking::new(goal)),
        (None, Some(radius)) => (SearchRequest::random_around(args.from, radius), TargetTracking::default()),
        (None, None) => anyhow::bail!("either --to or --radius is required"),
    };

    let mut handle = handler.submit(request);
    let tick = Duration::from_millis(cfg.tick_ms);
    let mut ticks = 0u64;
    let result = loop {
        if let Some(result) = handle.poll_ready(Some(&mut tracking)) {
            break result;
        }
        ticks += 1;
        std::thread::sleep(tick);
    };

    let out = json!({
        "kind": result.kind(),
        "points": result.points(),
        "ticks_waited": ticks,
        "tracking": tracking,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
