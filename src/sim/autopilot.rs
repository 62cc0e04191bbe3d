//! Demo-mode player
//!
//! Hops over the nearest enemy when it gets close and otherwise keeps the
//! runner moving with dash-jumps whenever it stalls in a valley. Reads the
//! simulation only; decisions reach it through the input queue like keys do.

use super::input::{InputAction, InputQueue, InputSource};
use super::state::{Enemy, PlayerState};
use super::tick::Simulation;

/// Jump once an enemy is this close ahead
const JUMP_RANGE: f32 = 0.35;
/// Below this forward speed the runner counts as stalled
const STALL_SPEED: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot {
    /// Total actions issued, for logging
    pub issued: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick this tick's actions from the player and the enemies around it
    pub fn decide<'a>(
        player: &PlayerState,
        enemies: impl IntoIterator<Item = &'a Enemy>,
    ) -> Vec<InputAction> {
        let threat = enemies
            .into_iter()
            .map(|e| e.pos.x - player.pos.x)
            .filter(|dx| *dx > 0.0)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut actions = Vec::new();
        match threat {
            Some(dx) if dx <= JUMP_RANGE => {
                if player.can_jump() {
                    actions.push(InputAction::Jump);
                }
            }
            _ => {
                if player.vel.x < STALL_SPEED && player.can_dash() && player.can_jump() {
                    actions.push(InputAction::DashRight);
                    actions.push(InputAction::Jump);
                }
            }
        }
        actions
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, sim: &Simulation, queue: &mut InputQueue) {
        if sim.is_game_over() {
            return;
        }
        for action in Self::decide(sim.player(), sim.enemies()) {
            log::trace!("Autopilot: {action:?} at tick {}", sim.time_ticks());
            queue.push(action);
            self.issued += 1;
        }
    }
}
