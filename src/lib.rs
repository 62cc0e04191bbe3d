//! Spline Runner - a side-scrolling endless runner over procedural terrain
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain spline, physics, spawning, collisions)
//! - `renderer`: Renderer-facing snapshot types (no graphics API calls)
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use renderer::{RenderSnapshot, Renderer};
pub use sim::{InputAction, SimError, Simulation, SplineError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the compile-time defaults; [`Tuning`] can override most of them.
pub mod consts {
    use std::time::Duration;

    /// Wall-clock duration of one fixed simulation step (60 Hz)
    pub const STEP: Duration = Duration::from_nanos(1_000_000_000 / 60);
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Notional physics timestep applied once per simulation step
    pub const PHYSICS_DT: f32 = 0.001;

    /// Player body
    pub const PLAYER_MASS: f32 = 5.0;
    pub const PLAYER_RADIUS: f32 = 0.03;
    /// Hitbox relative to player position (offset, size)
    pub const PLAYER_HITBOX_OFFSET: [f32; 2] = [-0.02, -0.03];
    pub const PLAYER_HITBOX_SIZE: [f32; 2] = [0.06, 0.18];
    /// Player spawns this far above the terrain surface (in radii)
    pub const PLAYER_SPAWN_LIFT: f32 = 5.0;
    /// Horizontal start position on the terrain
    pub const PLAYER_START_X: f32 = 2.0;
    /// Distance covered per radian of run-cycle phase
    pub const STRIDE_LENGTH: f32 = 0.12;

    /// Forces
    pub const GRAVITY: f32 = 9.81;
    pub const THRUST: f32 = 2.0;

    /// Jump adds this vertical velocity and nudges the player up to clear the surface
    pub const JUMP_IMPULSE: f32 = 13.0;
    pub const JUMP_NUDGE: f32 = 0.05;
    /// Dash impulse magnitudes (x is mirrored by direction)
    pub const DASH_IMPULSE: [f32; 2] = [11.0, 2.0];
    /// Cooldown length in simulation steps
    pub const COOLDOWN_STEPS: u32 = 100;

    /// Terrain
    pub const TERRAIN_VERTICAL_SCALE: f32 = 0.7;
    /// Extend terrain when the player gets this close to the frontier
    pub const FRONTIER_LOOKAHEAD: f32 = 6.0;
    /// Entities further than this behind the player are evicted
    pub const RETAIN_BEHIND: f32 = 4.0;

    /// Spawning
    pub const ENEMY_SLOTS_PER_SPAN: u32 = 20;
    /// One enemy per slot with probability 1 / ENEMY_ODDS
    pub const ENEMY_ODDS: u32 = 30;
    pub const ENEMY_BOX_OFFSET: [f32; 2] = [-0.05, -0.05];
    pub const ENEMY_BOX_SIZE: [f32; 2] = [0.1, 0.2];
    /// Broad-phase horizontal distance for enemy checks
    pub const ENEMY_BROAD_PHASE: f32 = 0.2;
    pub const STARS_PER_SPAN: u32 = 3;
    pub const STAR_CEILING: f32 = 4.0;

    /// Spline sampling
    pub const SLOPE_EPSILON: f32 = 0.01;
    /// Samples in the circle-vs-spline window (radius / 8 spacing across the diameter)
    pub const CONTACT_SAMPLES: usize = 17;
    /// Polyline resolution handed to the renderer
    pub const CURVE_SEGMENTS: usize = 20;
}
