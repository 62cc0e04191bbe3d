//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A JSON file can override any subset
//! of fields; missing fields keep their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Time ===
    /// Wall-clock duration of one simulation step
    pub step: Duration,
    /// Cap on steps per rendered frame
    pub max_substeps: u32,
    /// Notional integration step per simulation step
    pub physics_dt: f32,

    // === Player ===
    pub mass: f32,
    pub radius: f32,
    pub start_x: f32,
    pub gravity: f32,
    pub thrust: f32,
    pub jump_impulse: f32,
    pub jump_nudge: f32,
    pub dash_impulse: [f32; 2],
    /// Steps between jumps (and between dashes)
    pub cooldown_steps: u32,

    // === Terrain ===
    pub vertical_scale: f32,
    pub lookahead: f32,
    pub retain_behind: f32,

    // === Spawning ===
    pub enemy_slots: u32,
    pub enemy_odds: u32,
    pub stars_per_span: u32,
    pub star_ceiling: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            step: STEP,
            max_substeps: MAX_SUBSTEPS,
            physics_dt: PHYSICS_DT,

            mass: PLAYER_MASS,
            radius: PLAYER_RADIUS,
            start_x: PLAYER_START_X,
            gravity: GRAVITY,
            thrust: THRUST,
            jump_impulse: JUMP_IMPULSE,
            jump_nudge: JUMP_NUDGE,
            dash_impulse: DASH_IMPULSE,
            cooldown_steps: COOLDOWN_STEPS,

            vertical_scale: TERRAIN_VERTICAL_SCALE,
            lookahead: FRONTIER_LOOKAHEAD,
            retain_behind: RETAIN_BEHIND,

            enemy_slots: ENEMY_SLOTS_PER_SPAN,
            enemy_odds: ENEMY_ODDS,
            stars_per_span: STARS_PER_SPAN,
            star_ceiling: STAR_CEILING,
        }
    }
}

impl Tuning {
    /// Cooldown applied after a jump or dash
    pub fn cooldown(&self) -> Duration {
        self.step * self.cooldown_steps
    }

    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would break the terrain or timing invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), TuningError> {
            Err(TuningError::Invalid {
                field,
                reason: reason.to_string(),
            })
        }

        if self.step.is_zero() {
            return invalid("step", "must be non-zero");
        }
        if self.max_substeps == 0 {
            return invalid("max_substeps", "must be at least 1");
        }
        if !(self.physics_dt > 0.0) {
            return invalid("physics_dt", "must be positive");
        }
        if !(self.mass > 0.0) {
            return invalid("mass", "must be positive");
        }
        // Contact window must stay inside the sampleable span
        if !(self.radius > 0.0 && self.radius < 0.5) {
            return invalid("radius", "must be in (0, 0.5)");
        }
        if !(self.start_x >= 2.0) {
            return invalid("start_x", "must be at least 2 to keep a segment behind the player");
        }
        if !(self.lookahead >= 3.0) {
            return invalid("lookahead", "must be at least 3 control points");
        }
        if !(self.retain_behind >= 2.0) {
            return invalid("retain_behind", "must keep at least 2 units behind the player");
        }
        if self.enemy_odds == 0 {
            return invalid("enemy_odds", "must be at least 1");
        }
        if !(self.star_ceiling > 0.0) {
            return invalid("star_ceiling", "must be positive");
        }
        Ok(())
    }
}
