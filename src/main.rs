//! Headless blockfall runner (default binary).
//!
//! Plays one session with a greedy placement bot, no terminal or clock involved, and
//! prints a JSON summary on stdout. Logs go to stderr; set `RUST_LOG` to see more
//! (e.g. `RUST_LOG=blockfall_core=debug`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::core::{CollisionDetector, Grid, LineClearEngine, Playfield};
use blockfall::types::{Direction, MoveIntent, PlayfieldConfig, RotationPolicy};

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "Play a headless blockfall session")]
struct Args {
    /// JSON playfield config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Seed for the piece source
    #[arg(short, long)]
    seed: Option<u32>,

    /// Turn rotation into a no-op
    #[arg(long)]
    identity_rotation: bool,

    /// Stop after this many pieces
    #[arg(short, long, default_value_t = 500)]
    pieces: u64,

    /// Print the final grid to stderr
    #[arg(long)]
    show_grid: bool,
}

/// Final result printed on stdout
#[derive(Debug, Serialize)]
struct Summary {
    seed: u32,
    pieces: u64,
    points: i64,
    lines: i64,
    max_combo: u32,
    topped_out: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=info")),
        )
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut playfield = Playfield::new(config).context("invalid playfield config")?;
    info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        "starting session"
    );

    let summary = run(&mut playfield, args.pieces);

    if args.show_grid {
        eprintln!("{}", render_grid(playfield.grid()));
    }
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn load_config(args: &Args) -> Result<PlayfieldConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => PlayfieldConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.identity_rotation {
        config.rotation_policy = RotationPolicy::Identity;
    }
    Ok(config)
}

fn run(playfield: &mut Playfield, max_pieces: u64) -> Summary {
    let mut placed = 0;
    let mut max_combo = 0;

    while placed < max_pieces && !playfield.is_topped_out() {
        let Some(target) = plan(playfield) else {
            warn!("no legal placement");
            break;
        };
        debug!(
            piece = playfield.current_piece().kind().as_str(),
            rotations = target.rotations,
            x = target.x,
            "placing"
        );

        for _ in 0..target.rotations {
            playfield.apply_intent(MoveIntent::user(Direction::RotateClockwise));
        }
        while playfield.offset().x > target.x {
            if !playfield.apply_intent(MoveIntent::user(Direction::Left)).moved {
                break;
            }
        }
        while playfield.offset().x < target.x {
            if !playfield.apply_intent(MoveIntent::user(Direction::Right)).moved {
                break;
            }
        }
        playfield.apply_intent(MoveIntent::user(Direction::HardDrop));

        placed += 1;
        max_combo = max_combo.max(playfield.score().combo);
    }

    let score = playfield.score();
    info!(
        pieces = placed,
        points = score.points,
        lines = score.lines_total,
        "session finished"
    );
    Summary {
        seed: playfield.config().seed,
        pieces: placed,
        points: score.points,
        lines: score.lines_total,
        max_combo,
        topped_out: playfield.is_topped_out(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    /// Rotate presses from the spawn state
    rotations: usize,
    x: i32,
}

/// Pick the best rotation and column for the active piece
///
/// Straight drops only, scored on the resulting grid.
fn plan(playfield: &Playfield) -> Option<Placement> {
    let piece = playfield.current_piece();
    let policy = playfield.rotation_policy();
    let spawn = playfield.offset();
    let grid = playfield.grid();

    let mut best: Option<(i64, Placement)> = None;
    let mut index = playfield.rotation_index();
    for rotations in 0..piece.rotation_count() {
        let shape = piece.shape(index)?;
        for x in -(shape.width() as i32)..grid.width() as i32 {
            if CollisionDetector::intersects(grid, shape, spawn.shifted(x - spawn.x, 0)) {
                continue;
            }
            let y = CollisionDetector::landing_y(grid, shape, x, spawn.y);
            let score = evaluate(&grid.merge(shape, x, y));
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, Placement { rotations, x }));
            }
        }
        index = policy.next_index(index, piece.rotation_count());
    }
    best.map(|(_, placement)| placement)
}

/// Higher is better: reward cleared lines, punish holes and stack height
fn evaluate(grid: &Grid) -> i64 {
    let cleared = LineClearEngine::check_and_clear(grid);
    let grid = &cleared.compacted_grid;

    let mut holes = 0i64;
    let mut height = 0i64;
    for x in 0..grid.width() as i32 {
        let mut seen_block = false;
        for y in 0..grid.height() as i32 {
            if grid.is_occupied(x, y) {
                if !seen_block {
                    height += grid.height() as i64 - y as i64;
                }
                seen_block = true;
            } else if seen_block {
                holes += 1;
            }
        }
    }

    cleared.lines_removed as i64 * 100 - holes * 40 - height * 5
}

fn render_grid(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid.visible_rows() {
        out.push('|');
        for &cell in row {
            out.push(if cell == 0 { ' ' } else { '#' });
        }
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(grid.width()));
    out.push('+');
    out
}
