use std::io::Read;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use stagehop_core::{hash_moves, replay, AttemptStatus, Player, RunInput, RunOutput};

/// JSON shape printed on stdout; the digest is hex instead of a byte array.
#[derive(Serialize)]
struct Report<'a> {
    stage: &'a str,
    status: AttemptStatus,
    ticks: u32,
    elapsed_ms: f64,
    player: &'a Player,
    trajectory_hash: String,
    moves_hash: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Read the run file named by the first non-flag argument, or stdin.
fn load_input() -> Result<RunInput> {
    let path = std::env::args().skip(1).find(|a| !a.starts_with("--"));

    let json_str = match &path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read run file {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read run file from stdin")?;
            buf
        }
    };

    serde_json::from_str(&json_str).context("failed to parse run file JSON")
}

fn print_result(input: &RunInput, output: &RunOutput) -> Result<()> {
    let stage = input
        .custom_stage
        .as_ref()
        .map_or(input.stage.as_str(), |s| s.id.as_str());
    let report = Report {
        stage,
        status: output.status,
        ticks: output.ticks,
        elapsed_ms: output.elapsed_ms,
        player: &output.player,
        trajectory_hash: hex::encode(output.trajectory_hash),
        moves_hash: hex::encode(hash_moves(input.moves.as_slice())),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    let input = load_input()?;
    tracing::info!(
        stage = %input.stage,
        moves = input.moves.len(),
        custom = input.custom_stage.is_some(),
        "run loaded"
    );

    let start = Instant::now();
    let output = replay(&input).context("replay failed")?;
    tracing::info!(
        status = ?output.status,
        ticks = output.ticks,
        wall_ms = start.elapsed().as_secs_f64() * 1000.0,
        "replay complete"
    );

    print_result(&input, &output)
}
