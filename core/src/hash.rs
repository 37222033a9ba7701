use sha2::{Digest, Sha256};

use crate::types::Player;

/// Running SHA-256 over per-tick player kinematics.
#[derive(Clone, Default)]
pub struct TrajectoryHasher {
    hasher: Sha256,
}

impl TrajectoryHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, player: &Player) {
        for value in [player.x, player.y, player.vx, player.vy, player.height] {
            self.hasher.update(value.to_le_bytes());
        }
    }

    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }
}

/// SHA-256 of a full list of per-tick player snapshots.
pub fn hash_trajectory(frames: &[Player]) -> [u8; 32] {
    let mut hasher = TrajectoryHasher::new();
    for player in frames {
        hasher.record(player);
    }
    hasher.finalize()
}

/// SHA-256 commitment of an ordered move selection.
pub fn hash_moves<S: AsRef<str>>(move_ids: &[S]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for id in move_ids {
        let id = id.as_ref();
        hasher.update((id.len() as u32).to_le_bytes());
        hasher.update(id.as_bytes());
    }
    hasher.finalize().into()
}
