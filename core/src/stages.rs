use crate::error::{CoreError, CoreResult};
use crate::types::*;

const YELLOW: &str = "#d6a33b";
const SPIKE_FALL_SPEED: f64 = 320.0;

fn platform(x: f64, y: f64, width: f64, height: f64) -> Platform {
    Platform::solid(x, y, width, height)
}

/// Platform that disappears half a second after the player lands on it.
fn yellow(id: &str, x: f64, y: f64, width: f64, height: f64) -> Platform {
    Platform {
        id: Some(id.to_string()),
        vanish_on_stand_ms: Some(500.0),
        color: Some(YELLOW.to_string()),
        ..Platform::solid(x, y, width, height)
    }
}

/// 30×30 spike with its trigger zone.
fn spike(id: &str, x: f64, y: f64, trigger: [f64; 4]) -> FallingSpike {
    let [tx, ty, tw, th] = trigger;
    FallingSpike {
        id: id.to_string(),
        x,
        y,
        width: 30.0,
        height: 30.0,
        trigger: Rect {
            x: tx,
            y: ty,
            width: tw,
            height: th,
        },
        fall_speed: SPIKE_FALL_SPEED,
    }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn screen(id: &str, name: &str) -> Stage {
    Stage {
        id: id.to_string(),
        name: name.to_string(),
        size: StageSize {
            width: 800.0,
            height: 450.0,
        },
        ground_y: 400.0,
        holes: Vec::new(),
        max_selection_count: 1,
        animation_choices: Vec::new(),
        new_animation_ids: Vec::new(),
        player_start: Vec2 { x: 0.0, y: 360.0 },
        goal: GoalLine {
            x: 0.0,
            y: 0.0,
            height: 0.0,
        },
        platforms: Vec::new(),
        obstacles: Vec::new(),
        enemies: Vec::new(),
    }
}

fn tutorial() -> Stage {
    Stage {
        holes: vec![Hole {
            x: 180.0,
            width: 75.0,
        }],
        max_selection_count: 3,
        animation_choices: ids(&["jump", "double-jump", "stop"]),
        player_start: Vec2 { x: 90.0, y: 360.0 },
        goal: GoalLine {
            x: 590.0,
            y: 200.0,
            height: 100.0,
        },
        platforms: vec![platform(520.0, 300.0, 160.0, 20.0)],
        obstacles: vec![spike("spike-1", 350.0, 140.0, [310.0, 240.0, 50.0, 160.0])],
        ..screen("tutorial", "Tutorial")
    }
}

fn stage_1_1() -> Stage {
    Stage {
        holes: vec![Hole {
            x: 270.0,
            width: 65.0,
        }],
        max_selection_count: 4,
        animation_choices: ids(&["jump", "double-jump", "stop", "move"]),
        new_animation_ids: ids(&["move"]),
        player_start: Vec2 { x: 80.0, y: 360.0 },
        goal: GoalLine {
            x: 780.0,
            y: 150.0,
            height: 90.0,
        },
        platforms: vec![
            platform(230.0, 330.0, 120.0, 20.0),
            platform(550.0, 330.0, 120.0, 20.0),
            platform(360.0, 250.0, 140.0, 20.0),
            platform(720.0, 240.0, 170.0, 20.0),
        ],
        obstacles: vec![spike("spike-1-1", 430.0, 120.0, [420.0, 180.0, 36.0, 160.0])],
        ..screen("1-1", "1-1")
    }
}

fn stage_1_2() -> Stage {
    Stage {
        max_selection_count: 5,
        animation_choices: ids(&["jump", "stop", "move", "reverse"]),
        new_animation_ids: ids(&["reverse"]),
        player_start: Vec2 { x: 140.0, y: 360.0 },
        goal: GoalLine {
            x: 170.0,
            y: 125.0,
            height: 90.0,
        },
        platforms: vec![
            platform(110.0, 215.0, 160.0, 20.0),
            platform(290.0, 300.0, 145.0, 20.0),
        ],
        ..screen("1-2", "1-2")
    }
}

fn stage_1_3() -> Stage {
    Stage {
        holes: vec![Hole {
            x: 380.0,
            width: 80.0,
        }],
        max_selection_count: 5,
        animation_choices: ids(&["jump", "double-jump", "reverse", "crouch"]),
        new_animation_ids: ids(&["crouch"]),
        player_start: Vec2 { x: 40.0, y: 360.0 },
        goal: GoalLine {
            x: 500.0,
            y: 320.0,
            height: 80.0,
        },
        platforms: vec![
            platform(160.0, 320.0, 220.0, 20.0),
            platform(360.0, 300.0, 20.0, 20.0),
            platform(220.0, 200.0, 20.0, 100.0),
            platform(240.0, 280.0, 60.0, 20.0),
            platform(400.0, 240.0, 260.0, 20.0),
            platform(480.0, 200.0, 180.0, 20.0),
            platform(600.0, 160.0, 200.0, 20.0),
        ],
        ..screen("1-3", "1-3")
    }
}

fn stage_1_4() -> Stage {
    Stage {
        // The whole floor is a pit.
        holes: vec![Hole {
            x: 0.0,
            width: 800.0,
        }],
        max_selection_count: 5,
        animation_choices: ids(&["double-jump", "reverse", "move", "dash"]),
        new_animation_ids: ids(&["dash"]),
        player_start: Vec2 { x: 40.0, y: 260.0 },
        goal: GoalLine {
            x: 60.0,
            y: 140.0,
            height: 80.0,
        },
        platforms: vec![
            platform(0.0, 120.0, 360.0, 20.0),
            platform(360.0, 0.0, 20.0, 140.0),
            platform(0.0, 220.0, 140.0, 20.0),
            yellow("1-4-yellow-1", 140.0, 220.0, 120.0, 20.0),
            platform(260.0, 220.0, 100.0, 20.0),
            platform(460.0, 220.0, 180.0, 20.0),
            platform(0.0, 300.0, 180.0, 20.0),
            yellow("1-4-yellow-2", 180.0, 300.0, 120.0, 20.0),
            platform(300.0, 300.0, 160.0, 20.0),
        ],
        ..screen("1-4", "1-4")
    }
}

fn stage_1_5() -> Stage {
    Stage {
        size: StageSize {
            width: 800.0,
            height: 900.0,
        },
        ground_y: 880.0,
        holes: vec![Hole {
            x: 420.0,
            width: 100.0,
        }],
        max_selection_count: 15,
        animation_choices: ids(&[
            "jump",
            "double-jump",
            "stop",
            "move",
            "reverse",
            "crouch",
            "dash",
        ]),
        player_start: Vec2 { x: 120.0, y: 840.0 },
        goal: GoalLine {
            x: 780.0,
            y: 160.0,
            height: 80.0,
        },
        platforms: vec![
            platform(600.0, 840.0, 100.0, 20.0),
            platform(0.0, 800.0, 160.0, 20.0),
            platform(280.0, 800.0, 180.0, 20.0),
            platform(640.0, 780.0, 180.0, 20.0),
            platform(0.0, 740.0, 80.0, 20.0),
            platform(460.0, 700.0, 200.0, 20.0),
            platform(560.0, 660.0, 60.0, 20.0),
            platform(80.0, 660.0, 60.0, 20.0),
            platform(140.0, 640.0, 60.0, 20.0),
            yellow("1-5-yellow-1", 200.0, 640.0, 60.0, 20.0),
            platform(260.0, 640.0, 80.0, 20.0),
            platform(80.0, 620.0, 20.0, 40.0),
            platform(540.0, 600.0, 20.0, 80.0),
            platform(200.0, 580.0, 60.0, 20.0),
            platform(420.0, 540.0, 120.0, 20.0),
            platform(600.0, 540.0, 220.0, 20.0),
            platform(260.0, 480.0, 20.0, 120.0),
            platform(280.0, 480.0, 60.0, 20.0),
            platform(620.0, 480.0, 60.0, 20.0),
            platform(600.0, 400.0, 20.0, 100.0),
            platform(440.0, 400.0, 100.0, 20.0),
            yellow("1-5-yellow-2", 0.0, 400.0, 80.0, 20.0),
            platform(80.0, 400.0, 80.0, 20.0),
            platform(720.0, 360.0, 80.0, 20.0),
            platform(240.0, 300.0, 420.0, 20.0),
            platform(280.0, 260.0, 100.0, 20.0),
            platform(460.0, 260.0, 120.0, 20.0),
            platform(80.0, 240.0, 20.0, 100.0),
            platform(100.0, 240.0, 60.0, 20.0),
            platform(760.0, 240.0, 40.0, 20.0),
            platform(520.0, 220.0, 60.0, 20.0),
            platform(500.0, 140.0, 20.0, 100.0),
            platform(300.0, 140.0, 200.0, 20.0),
        ],
        obstacles: vec![
            spike("1-5-spike-top", 340.0, 160.0, [320.0, 220.0, 80.0, 80.0]),
            spike("1-5-spike-mid", 760.0, 560.0, [740.0, 680.0, 80.0, 160.0]),
            spike("1-5-spike-low", 380.0, 660.0, [360.0, 720.0, 80.0, 160.0]),
        ],
        ..screen("1-5", "1-5")
    }
}

/// Built-in stages in play order.
pub fn stages() -> Vec<Stage> {
    vec![
        tutorial(),
        stage_1_1(),
        stage_1_2(),
        stage_1_3(),
        stage_1_4(),
        stage_1_5(),
    ]
}

pub fn stage_by_id(id: &str) -> CoreResult<Stage> {
    stages()
        .into_iter()
        .find(|stage| stage.id == id)
        .ok_or_else(|| CoreError::UnknownStage(id.to_string()))
}
