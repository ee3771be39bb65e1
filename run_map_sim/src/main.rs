// Run map resolver — CLI entry point.
//
// Loads a saved map (the `MapGraph` JSON form from `graph.rs`), applies any
// number of travel commands through a `MapRun`, and prints the resulting
// node/edge states, completion flag, and layout summary as pretty JSON on
// stdout. Logs go to stderr.
//
// Usage:
//   resolve <map.json> [OPTIONS]
//     --travel <COL,LAYER>   Travel to a point (repeatable, applied in order)
//     --config <FILE>        MapConfig JSON; adds each node's blueprint sprite
//     --verbose              Debug-level logging

use run_map_sim::config::MapConfig;
use run_map_sim::graph::MapGraph;
use run_map_sim::layout::{max_lateral_offset, span_between_first_and_last_layer};
use run_map_sim::resolve::Resolution;
use run_map_sim::run::MapRun;
use run_map_sim::types::Point;
use serde::Serialize;
use tracing::Level;

struct Args {
    map_path: String,
    travels: Vec<Point>,
    config_path: Option<String>,
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    frontier: Option<Point>,
    complete: bool,
    path: &'a [Point],
    resolution: &'a Resolution,
    max_lateral_offset: f32,
    layer_span: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sprites: Vec<SpriteEntry<'a>>,
}

#[derive(Serialize)]
struct SpriteEntry<'a> {
    point: Point,
    sprite: &'a str,
}

fn main() {
    let args = parse_args();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let graph = match std::fs::read_to_string(&args.map_path) {
        Ok(json) => MapGraph::from_json(&json).unwrap_or_else(|e| {
            eprintln!("Failed to load map {}: {e}", args.map_path);
            std::process::exit(1);
        }),
        Err(e) => {
            eprintln!("Failed to read {}: {e}", args.map_path);
            std::process::exit(1);
        }
    };
    tracing::info!(
        nodes = graph.node_count(),
        path_len = graph.path().len(),
        "map loaded"
    );

    let config = args.config_path.as_deref().map(load_config);

    let mut run = MapRun::new(graph);
    for point in args.travels {
        match run.travel(point) {
            Ok(events) => {
                for event in events {
                    tracing::info!(?event, "travel applied");
                }
            }
            Err(e) => {
                eprintln!("Travel to {point} rejected: {e}");
                std::process::exit(1);
            }
        }
    }

    let graph = run.graph();
    let sprites = match &config {
        Some(config) => graph
            .nodes()
            .filter_map(|node| {
                config.blueprint_for(node).map(|b| SpriteEntry {
                    point: node.point,
                    sprite: &b.sprite,
                })
            })
            .collect(),
        None => Vec::new(),
    };
    let report = Report {
        frontier: graph.current_frontier(),
        complete: graph.is_complete(),
        path: graph.path(),
        resolution: run.resolution(),
        max_lateral_offset: max_lateral_offset(graph),
        layer_span: span_between_first_and_last_layer(graph),
        sprites,
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(path: &str) -> MapConfig {
    let json = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {path}: {e}");
        std::process::exit(1);
    });
    MapConfig::from_json(&json).unwrap_or_else(|e| {
        eprintln!("Failed to parse config {path}: {e}");
        std::process::exit(1);
    })
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching, with
/// no clap dependency.
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut map_path = None;
    let mut travels = Vec::new();
    let mut config_path = None;
    let mut verbose = false;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--travel" => {
                i += 1;
                let point = args.get(i).and_then(|s| parse_point(s)).unwrap_or_else(|| {
                    eprintln!("--travel requires a point as COL,LAYER");
                    std::process::exit(1);
                });
                travels.push(point);
            }
            "--config" => {
                i += 1;
                config_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--config requires a file path");
                    std::process::exit(1);
                }));
            }
            "--verbose" => verbose = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
            other => {
                if map_path.is_some() {
                    eprintln!("Unexpected extra argument: {other}");
                    std::process::exit(1);
                }
                map_path = Some(other.to_string());
            }
        }
        i += 1;
    }

    let Some(map_path) = map_path else {
        print_usage();
        std::process::exit(1);
    };
    Args {
        map_path,
        travels,
        config_path,
        verbose,
    }
}

fn parse_point(s: &str) -> Option<Point> {
    let (column, layer) = s.split_once(',')?;
    Some(Point::new(
        column.trim().parse().ok()?,
        layer.trim().parse().ok()?,
    ))
}

fn print_usage() {
    eprintln!("Usage: resolve <map.json> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --travel <COL,LAYER>   Travel to a point (repeatable, applied in order)");
    eprintln!("  --config <FILE>        MapConfig JSON; adds blueprint sprites to the report");
    eprintln!("  --verbose              Debug-level logging");
    eprintln!("  --help, -h             Show this help");
}
