pub mod animation;
pub mod clips;
pub mod constants;
pub mod double_jump;
pub mod enemies;
pub mod error;
pub mod hash;
pub mod init;
pub mod keyframe;
pub mod moves;
pub mod obstacles;
pub mod physics;
pub mod platforms;
pub mod projectiles;
pub mod replay;
pub mod stages;
pub mod step;
pub mod types;

pub use animation::{AnimationSystem, Sample};
pub use clips::{build_animation_clips, build_from_definitions, BuildOptions};
pub use constants::*;
pub use error::{CoreError, CoreResult};
pub use hash::*;
pub use init::*;
pub use moves::{get_move, get_moves, move_catalogue, MoveDefinition, MoveEffect};
pub use physics::PhysicsSystem;
pub use replay::replay;
pub use stages::{stage_by_id, stages};
pub use step::Attempt;
pub use types::*;
