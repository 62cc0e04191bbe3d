//! Simulation entities
//!
//! Everything the orchestrator owns per run lives in these plain data types.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Player touched an enemy; terminal
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Dashed { left: bool },
    /// A new control point was generated at this x
    SpanGenerated { frontier: f32 },
    EnemySpawned { id: u32, pos: Vec2 },
    /// Run ended against this enemy after travelling `distance`
    GameOver { enemy_id: u32, distance: f32 },
}

/// Axis-aligned box, stored as min corner + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box placed at `origin + offset`
    pub fn at(origin: Vec2, offset: [f32; 2], size: [f32; 2]) -> Self {
        Self::new(origin + Vec2::from(offset), Vec2::from(size))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: f32,
    pub radius: f32,
    /// Hitbox offset from `pos`
    pub hitbox_offset: [f32; 2],
    pub hitbox_size: [f32; 2],
    /// Time until another jump is allowed
    pub jump_cooldown: Duration,
    /// Time until another dash is allowed
    pub dash_cooldown: Duration,
    /// Animation phase for the run cycle
    pub theta: f32,
}

impl PlayerState {
    pub fn new(pos: Vec2, mass: f32, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            mass,
            radius,
            hitbox_offset: PLAYER_HITBOX_OFFSET,
            hitbox_size: PLAYER_HITBOX_SIZE,
            jump_cooldown: Duration::ZERO,
            dash_cooldown: Duration::ZERO,
            theta: 0.0,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::at(self.pos, self.hitbox_offset, self.hitbox_size)
    }

    pub fn can_jump(&self) -> bool {
        self.jump_cooldown.is_zero()
    }

    pub fn can_dash(&self) -> bool {
        self.dash_cooldown.is_zero()
    }

    /// Count both cooldowns down by one step
    pub fn tick_cooldowns(&mut self, step: Duration) {
        self.jump_cooldown = self.jump_cooldown.saturating_sub(step);
        self.dash_cooldown = self.dash_cooldown.saturating_sub(step);
    }
}

/// A stationary obstacle resting on the terrain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
}

impl Enemy {
    pub fn hitbox(&self) -> Aabb {
        Aabb::at(self.pos, ENEMY_BOX_OFFSET, ENEMY_BOX_SIZE)
    }
}

/// Background decoration; never collides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_hitbox_bounds() {
        let player = PlayerState::new(Vec2::ZERO, PLAYER_MASS, PLAYER_RADIUS);
        let hitbox = player.hitbox();
        assert!((hitbox.min - Vec2::new(-0.02, -0.03)).length() < 1e-6);
        assert!((hitbox.max() - Vec2::new(0.04, 0.15)).length() < 1e-6);
    }

    #[test]
    fn test_enemy_hitbox_bounds() {
        let enemy = Enemy { id: 1, pos: Vec2::new(0.03, 0.05) };
        let hitbox = enemy.hitbox();
        assert!((hitbox.min - Vec2::new(-0.02, 0.0)).length() < 1e-6);
        assert!((hitbox.max() - Vec2::new(0.08, 0.25)).length() < 1e-6);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::ONE);
        let b = Aabb::new(Vec2::new(1.0, 0.0), Vec2::ONE);
        let c = Aabb::new(Vec2::new(0.5, 0.5), Vec2::ONE);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_cooldowns_saturate() {
        let mut player = PlayerState::new(Vec2::ZERO, PLAYER_MASS, PLAYER_RADIUS);
        player.jump_cooldown = STEP * 2;
        player.tick_cooldowns(STEP);
        assert!(!player.can_jump());
        player.tick_cooldowns(STEP);
        player.tick_cooldowns(STEP);
        assert!(player.can_jump());
        assert!(player.can_dash());
    }
}
