//! Simulation orchestrator
//!
//! [`Simulation`] owns every piece of mutable state. One [`Simulation::tick`]
//! runs, in order: queued input, cooldowns, physics, enemy check, terrain and
//! spawn extension, eviction of everything far behind the player.

use std::collections::VecDeque;
use std::time::Duration;

use glam::{Affine2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::enemy_contact;
use super::error::{SimError, SplineError};
use super::input::{InputAction, InputQueue, InputSource};
use super::physics;
use super::skeleton::Skeleton;
use super::spawn;
use super::state::{Enemy, GameEvent, GamePhase, PlayerState, Star};
use super::terrain::ControlPointSequence;
use super::time::FixedTimestep;
use crate::consts::{CURVE_SEGMENTS, PLAYER_SPAWN_LIFT, STRIDE_LENGTH};
use crate::renderer::{RenderSnapshot, SplineVertex};
use crate::tuning::Tuning;

/// Log and (in debug builds) abort on a broken terrain invariant
fn invariant<T>(result: Result<T, SplineError>, during: &str) -> Result<T, SplineError> {
    result.inspect_err(|err| {
        log::error!("Invariant violated during {during}: {err}");
        debug_assert!(false, "invariant violated during {during}: {err}");
    })
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct Simulation {
    seed: u64,
    tuning: Tuning,
    rng: Pcg32,
    terrain: ControlPointSequence,
    player: PlayerState,
    enemies: VecDeque<Enemy>,
    stars: VecDeque<Star>,
    phase: GamePhase,
    inputs: InputQueue,
    clock: FixedTimestep,
    skeleton: Skeleton,
    /// Simulation tick counter
    time_ticks: u64,
    next_enemy_id: u32,
}

impl Simulation {
    /// Create a run with the given seed
    ///
    /// The tuning is validated first; a run never starts on values that
    /// would break the terrain or timing invariants.
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, SimError> {
        tuning.validate()?;
        let mut sim = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            terrain: ControlPointSequence::new(tuning.vertical_scale),
            player: PlayerState::new(Vec2::ZERO, tuning.mass, tuning.radius),
            enemies: VecDeque::new(),
            stars: VecDeque::new(),
            phase: GamePhase::Running,
            inputs: InputQueue::new(),
            clock: FixedTimestep::new(tuning.step, tuning.max_substeps),
            skeleton: Skeleton::runner(),
            time_ticks: 0,
            next_enemy_id: 1,
            tuning,
        };
        sim.init()?;
        Ok(sim)
    }

    /// Start over with a new seed, keeping the tuning
    pub fn reset(&mut self, seed: u64) -> Result<(), SimError> {
        *self = Self::new(seed, self.tuning.clone())?;
        Ok(())
    }

    fn init(&mut self) -> Result<(), SplineError> {
        let start_x = self.tuning.start_x;

        // Opening stretch is enemy-free
        while self.terrain.len() < 4 || self.terrain.frontier() - start_x < self.tuning.lookahead {
            let point = self.terrain.extend(&mut self.rng);
            let stars = spawn::spawn_stars(point.x, &self.tuning, &mut self.rng);
            self.stars.extend(stars);
        }

        let ground = invariant(self.terrain.sampler().point_at_x(start_x), "spawn")?;
        self.player.pos = ground + Vec2::new(0.0, PLAYER_SPAWN_LIFT * self.player.radius);
        self.skeleton.pose(self.player.pos, self.player.theta);

        log::info!(
            "Simulation reset (seed {}, frontier {})",
            self.seed,
            self.terrain.frontier()
        );
        Ok(())
    }

    /// Queue an action for the start of the next tick
    pub fn queue(&mut self, action: InputAction) {
        if self.is_game_over() {
            log::debug!("Ignoring {action:?} after game over");
            return;
        }
        self.inputs.push(action);
    }

    /// Let an input source add actions for the next tick
    pub fn poll_input(&mut self, source: &mut impl InputSource) {
        let mut pending = InputQueue::new();
        source.poll(self, &mut pending);
        for action in pending.drain() {
            self.queue(action);
        }
    }

    /// Run as many fixed steps as `frame` wall-clock time allows
    pub fn advance(&mut self, frame: Duration) -> Result<Vec<GameEvent>, SplineError> {
        if self.is_game_over() {
            return Ok(Vec::new());
        }
        let steps = self.clock.accumulate(frame);
        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.tick()?);
        }
        Ok(events)
    }

    /// Advance the simulation by one fixed step
    ///
    /// After game over this is a no-op.
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, SplineError> {
        if self.is_game_over() {
            return Ok(Vec::new());
        }
        let mut events = Vec::new();

        for action in self.inputs.drain() {
            if physics::apply_action(&mut self.player, action, &self.tuning) {
                events.push(match action {
                    InputAction::Jump => GameEvent::Jumped,
                    InputAction::DashLeft => GameEvent::Dashed { left: true },
                    InputAction::DashRight => GameEvent::Dashed { left: false },
                });
            }
        }

        self.player.tick_cooldowns(self.tuning.step);

        let prev_x = self.player.pos.x;
        invariant(
            physics::step(&mut self.player, &self.terrain.sampler(), &self.tuning),
            "physics step",
        )?;
        self.player.theta += (self.player.pos.x - prev_x).abs() / STRIDE_LENGTH;
        self.skeleton.pose(self.player.pos, self.player.theta);
        self.time_ticks += 1;

        if let Some(enemy) = enemy_contact(&self.player, &self.enemies) {
            let distance = self.player.pos.x - self.tuning.start_x;
            log::info!(
                "Game over at tick {}: hit enemy {} after {:.2} units",
                self.time_ticks,
                enemy.id,
                distance
            );
            events.push(GameEvent::GameOver {
                enemy_id: enemy.id,
                distance,
            });
            self.phase = GamePhase::GameOver;
            return Ok(events);
        }

        self.extend_spans(&mut events)?;
        self.evict_behind();

        Ok(events)
    }

    /// Keep terrain, stars and enemies generated `lookahead` units ahead
    fn extend_spans(&mut self, events: &mut Vec<GameEvent>) -> Result<(), SplineError> {
        while self.terrain.frontier() - self.player.pos.x < self.tuning.lookahead {
            let frontier = self.terrain.extend(&mut self.rng).x;
            events.push(GameEvent::SpanGenerated { frontier });
            log::debug!("Extended terrain to x = {frontier}");

            let stars = spawn::spawn_stars(frontier, &self.tuning, &mut self.rng);
            self.stars.extend(stars);

            // Newest span with four control points around it
            let span_start = frontier - 2.0;
            let positions = invariant(
                spawn::spawn_enemies(&self.terrain.sampler(), span_start, &self.tuning, &mut self.rng),
                "enemy spawn",
            )?;
            for enemy in spawn::into_enemies(positions, &mut self.next_enemy_id) {
                log::debug!("Spawned enemy {} at {:?}", enemy.id, enemy.pos);
                events.push(GameEvent::EnemySpawned {
                    id: enemy.id,
                    pos: enemy.pos,
                });
                self.enemies.push_back(enemy);
            }
        }
        Ok(())
    }

    /// Drop entities more than `retain_behind` units behind the player
    fn evict_behind(&mut self) {
        let behind = self.player.pos.x - self.tuning.retain_behind;
        if behind <= 0.0 {
            return;
        }

        let points = self.terrain.evict_before(behind.floor() as usize);

        let mut enemies = 0;
        while self.enemies.front().is_some_and(|e| e.pos.x < behind) {
            self.enemies.pop_front();
            enemies += 1;
        }

        let before = self.stars.len();
        self.stars.retain(|s| s.pos.x >= behind);
        let stars = before - self.stars.len();

        if points + enemies + stars > 0 {
            log::debug!("Evicted {points} control points, {enemies} enemies, {stars} stars");
        }
    }

    /// Renderer-facing copy of everything visible
    pub fn snapshot(&self) -> RenderSnapshot {
        let spline = self
            .terrain
            .sampler()
            .curve(CURVE_SEGMENTS)
            .map(SplineVertex::from)
            .collect();

        RenderSnapshot {
            spline,
            bones: self.skeleton.world_transforms(),
            player_radius: self.player.radius,
            enemies: self
                .enemies
                .iter()
                .map(|e| Affine2::from_translation(e.pos))
                .collect(),
            stars: self.stars.iter().map(|s| s.pos).collect(),
            camera_x: self.player.pos.x,
            game_over: self.is_game_over(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn terrain(&self) -> &ControlPointSequence {
        &self.terrain
    }

    pub fn enemies(&self) -> impl ExactSizeIterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn stars(&self) -> impl ExactSizeIterator<Item = &Star> {
        self.stars.iter()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Interpolation alpha between the last two steps
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }
}
