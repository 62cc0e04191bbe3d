//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Terrain, enemies and stars kept in x order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod error;
pub mod input;
pub mod physics;
pub mod skeleton;
pub mod spawn;
pub mod spline;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod time;

pub use autopilot::Autopilot;
pub use collision::{broad_phase, enemy_contact, spline_contact};
pub use error::{SimError, SplineError};
pub use input::{InputAction, InputQueue, InputSource};
pub use physics::StepReport;
pub use skeleton::{Bone, BoneKind, Skeleton};
pub use spline::{Curve, SplineSampler};
pub use state::{Aabb, Enemy, GameEvent, GamePhase, PlayerState, Star};
pub use terrain::{ControlPoint, ControlPointSequence};
pub use tick::Simulation;
pub use time::FixedTimestep;
