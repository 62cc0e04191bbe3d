//! Renderer boundary
//!
//! The simulation never draws. Each frame it hands a [`RenderSnapshot`] to
//! whatever implements [`Renderer`] (a GPU backend, a terminal printer, a test
//! recorder).

pub mod vertex;

use glam::{Affine2, Vec2};

pub use vertex::{SplineVertex, as_bytes, colors};

/// Everything visible in one frame, in world coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSnapshot {
    /// Terrain polyline over the sampleable range
    pub spline: Vec<SplineVertex>,
    /// World transform per skeleton bone, parents first
    pub bones: Vec<Affine2>,
    pub player_radius: f32,
    pub enemies: Vec<Affine2>,
    pub stars: Vec<Vec2>,
    /// Horizontal camera centre (follows the player)
    pub camera_x: f32,
    pub game_over: bool,
}

impl RenderSnapshot {
    pub fn clear_color(&self) -> [f32; 4] {
        if self.game_over {
            colors::GAME_OVER
        } else {
            colors::BACKGROUND
        }
    }
}

/// Something that can display a frame
pub trait Renderer {
    fn present(&mut self, snapshot: &RenderSnapshot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<RenderSnapshot>,
    }

    impl Renderer for Recorder {
        fn present(&mut self, snapshot: &RenderSnapshot) {
            self.frames.push(snapshot.clone());
        }
    }

    #[test]
    fn test_clear_color_switches_on_game_over() {
        let mut snap = RenderSnapshot::default();
        assert_eq!(snap.clear_color(), colors::BACKGROUND);
        snap.game_over = true;
        assert_eq!(snap.clear_color(), colors::GAME_OVER);
    }

    #[test]
    fn test_renderer_receives_simulation_frames() {
        let mut sim = crate::Simulation::new(17, crate::Tuning::default()).unwrap();
        let mut recorder = Recorder::default();
        for _ in 0..3 {
            sim.tick().unwrap();
            recorder.present(&sim.snapshot());
        }
        assert_eq!(recorder.frames.len(), 3);
        assert!(recorder.frames[2].camera_x >= recorder.frames[0].camera_x);
        assert_eq!(recorder.frames[0].bones.len(), 8);
    }
}
