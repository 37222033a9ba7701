//! Generates run files for the replay host.
//!
//! Usage:
//!   cargo run -p stagehop-core --example gen-run -- [stage] [move,move,...] > run.json

use stagehop_core::*;

fn main() {
    let stage_id = std::env::args()
        .nth(1)
        .or_else(|| first_stage().map(|s| s.id))
        .unwrap_or_else(|| "tutorial".to_string());
    let moves: Vec<String> = match std::env::args().nth(2) {
        Some(list) => list.split(',').map(|m| m.trim().to_string()).collect(),
        None => match stage_by_id(&stage_id) {
            // Default to the stage's own choices, padded with stops.
            Ok(stage) => {
                let mut moves = stage.animation_choices.clone();
                moves.resize(stage.max_selection_count as usize, "stop".to_string());
                moves
            }
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
    };

    let input = RunInput {
        stage: stage_id.clone(),
        custom_stage: None,
        moves,
        start_delay_override_ms: None,
        config: default_config(),
        frames: FrameTiming::Fixed {
            dt: 1.0 / 60.0,
            ticks: 60 * 20,
        },
    };

    // Verify by running the sim
    let output = match replay(&input) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    eprintln!("=== Sim result ({stage_id}) ===");
    eprintln!("Moves: {}", input.moves.join(", "));
    eprintln!("Status: {:?}", output.status);
    eprintln!("Ticks: {} ({:.0} ms)", output.ticks, output.elapsed_ms);
    eprintln!(
        "Final position: ({:.1}, {:.1})",
        output.player.x, output.player.y
    );

    println!("{}", serde_json::to_string(&input).unwrap());
}
