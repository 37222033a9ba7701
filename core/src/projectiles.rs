use crate::constants::*;
use crate::types::*;

/// Enemy bullets in flight. Bullets travel in a straight line and are removed
/// on contact with the player or once they leave the stage.
#[derive(Clone, Debug, Default)]
pub struct BulletSystem {
    bullets: Vec<Bullet>,
    next_id: u32,
}

impl BulletSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.bullets.clear();
        self.next_id = 0;
    }

    /// Spawn a bullet from the enemy's leading edge, vertically centered.
    pub fn spawn_bullet(&mut self, enemy: &Enemy, facing: Facing) {
        let x = match facing {
            Facing::Left => enemy.x,
            Facing::Right => enemy.x + enemy.width,
        };
        self.bullets.push(Bullet {
            id: self.next_id,
            x,
            y: enemy.y + enemy.height / 2.0 - BULLET_SIZE / 2.0,
            width: BULLET_SIZE,
            height: BULLET_SIZE,
            vx: facing.sign() * enemy.bullet_speed,
            vy: 0.0,
        });
        self.next_id += 1;
    }

    /// Move all bullets. Returns true if one struck an undefended player.
    pub fn update(&mut self, dt: f64, player: &Player, stage: &Stage) -> bool {
        let player_rect = player.rect();
        let mut hit = false;

        self.bullets.retain_mut(|bullet| {
            bullet.x += bullet.vx * dt;
            bullet.y += bullet.vy * dt;

            if bullet.rect().intersects(&player_rect) {
                if player.is_defending {
                    tracing::debug!(id = bullet.id, "bullet blocked");
                } else {
                    tracing::debug!(id = bullet.id, "bullet hit player");
                    hit = true;
                }
                return false;
            }
            !is_off_stage(bullet, stage)
        });

        hit
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }
}

fn is_off_stage(bullet: &Bullet, stage: &Stage) -> bool {
    bullet.x + bullet.width < 0.0
        || bullet.x > stage.size.width
        || bullet.y + bullet.height < 0.0
        || bullet.y > stage.size.height
}
