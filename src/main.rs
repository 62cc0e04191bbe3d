//! Spline Runner entry point
//!
//! Headless native driver: runs a seeded game under the autopilot for a fixed
//! wall-clock budget and logs how far it got.
//!
//! Usage: `spline-runner [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;
    use std::time::Duration;

    use spline_runner::consts::STEP;
    use spline_runner::sim::{Autopilot, GameEvent};
    use spline_runner::{RenderSnapshot, Renderer, Simulation, Tuning};

    /// Two minutes of game time at 60 frames per second
    const FRAMES: u32 = 60 * 120;
    const DEFAULT_SEED: u64 = 12345;

    /// Logs a line every few seconds instead of drawing
    #[derive(Default)]
    struct LogRenderer {
        frames: u64,
    }

    impl Renderer for LogRenderer {
        fn present(&mut self, snapshot: &RenderSnapshot) {
            self.frames += 1;
            if self.frames % 300 == 0 {
                log::info!(
                    "frame {}: camera x {:.2}, {} enemies, {} stars, {} spline vertices",
                    self.frames,
                    snapshot.camera_x,
                    snapshot.enemies.len(),
                    snapshot.stars.len(),
                    snapshot.spline.len()
                );
            }
        }
    }

    fn load_tuning(path: Option<String>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Failed to load tuning from {path}: {e}; using defaults");
                Tuning::default()
            }
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        log::info!("Spline Runner (headless) starting...");

        let mut args = std::env::args().skip(1);
        let seed = match args.next().map(|s| s.parse::<u64>()) {
            None => DEFAULT_SEED,
            Some(Ok(seed)) => seed,
            Some(Err(e)) => {
                log::error!("Invalid seed: {e}");
                return ExitCode::FAILURE;
            }
        };
        let tuning = load_tuning(args.next());

        let mut sim = match Simulation::new(seed, tuning) {
            Ok(sim) => sim,
            Err(e) => {
                log::error!("Failed to start run: {e}");
                return ExitCode::FAILURE;
            }
        };
        let mut pilot = Autopilot::new();
        let mut renderer = LogRenderer::default();
        let frame: Duration = STEP;

        for _ in 0..FRAMES {
            sim.poll_input(&mut pilot);
            let events = match sim.advance(frame) {
                Ok(events) => events,
                Err(e) => {
                    log::error!("Simulation failed at tick {}: {e}", sim.time_ticks());
                    return ExitCode::FAILURE;
                }
            };
            renderer.present(&sim.snapshot());

            if let Some(GameEvent::GameOver { enemy_id, distance }) =
                events.iter().find(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                log::info!("Run over: enemy {enemy_id} stopped the runner after {distance:.2} units");
                break;
            }
        }

        log::info!(
            "Finished seed {seed}: {} ticks, x = {:.2}, {} autopilot actions, {}",
            sim.time_ticks(),
            sim.player().pos.x,
            pilot.issued,
            if sim.is_game_over() { "game over" } else { "still running" }
        );
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the product on wasm
}
