//! Player rigid-body integration against the terrain spline
//!
//! One call to [`step`] advances the player by the notional `physics_dt`:
//! forces, contact response, surface lock, then position integration.

use glam::Vec2;

use super::collision::spline_contact;
use super::error::SplineError;
use super::input::InputAction;
use super::spline::SplineSampler;
use super::state::PlayerState;
use crate::tuning::Tuning;

/// What happened during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Spline point the player was touching, if any
    pub contact: Option<Vec2>,
    /// Whether the floor constraint had to move the player up
    pub locked: bool,
}

/// Sum of external forces (gravity + forward thrust)
#[inline]
pub fn net_force(mass: f32, tuning: &Tuning) -> Vec2 {
    let gravity = Vec2::new(0.0, -tuning.gravity * mass);
    let thrust = Vec2::new(tuning.thrust, 0.0);
    gravity + thrust
}

/// Drop the velocity component along the surface normal
///
/// Frictionless slide: whatever runs along the tangent survives, nothing bounces.
pub fn resolve_contact(velocity: Vec2, slope: f32) -> Vec2 {
    let normal = Vec2::new(-slope, 1.0).normalize();
    velocity - velocity.dot(normal) * normal
}

/// Keep the player circle on or above the terrain. Returns true if moved.
pub fn lock_to_surface(
    player: &mut PlayerState,
    sampler: &SplineSampler<'_>,
) -> Result<bool, SplineError> {
    let height = sampler.height_at(player.pos.x)?;
    if player.pos.y - player.radius < height {
        player.pos.y = height + player.radius;
        return Ok(true);
    }
    Ok(false)
}

/// Stop the player one unit inside the oldest sampleable span
///
/// Terrain behind the player is evicted, so backward motion needs a wall.
pub fn hold_back_wall(player: &mut PlayerState, sampler: &SplineSampler<'_>) -> bool {
    let Some((min, _)) = sampler.x_range() else {
        return false;
    };
    let wall = min + 1.0;
    if player.pos.x < wall {
        player.pos.x = wall;
        player.vel.x = player.vel.x.max(0.0);
        return true;
    }
    false
}

/// Advance the player by one physics step
pub fn step(
    player: &mut PlayerState,
    sampler: &SplineSampler<'_>,
    tuning: &Tuning,
) -> Result<StepReport, SplineError> {
    let dt = tuning.physics_dt;

    // Acceleration is scaled by mass rather than divided by it
    player.vel += dt * player.mass * net_force(player.mass, tuning);

    let contact = spline_contact(sampler, player.pos, player.radius)?;
    if let Some(point) = contact {
        let slope = sampler.slope_at(point.x)?;
        player.vel = resolve_contact(player.vel, slope);
    }

    let locked = lock_to_surface(player, sampler)?;

    player.pos += dt * player.vel;
    hold_back_wall(player, sampler);

    Ok(StepReport { contact, locked })
}

/// Apply one queued action. Returns false if it was on cooldown.
pub fn apply_action(player: &mut PlayerState, action: InputAction, tuning: &Tuning) -> bool {
    match action {
        InputAction::Jump => {
            if !player.can_jump() {
                return false;
            }
            player.vel.y += tuning.jump_impulse;
            player.pos.y += tuning.jump_nudge;
            player.jump_cooldown = tuning.cooldown();
        }
        InputAction::DashLeft | InputAction::DashRight => {
            if !player.can_dash() {
                return false;
            }
            let [dx, dy] = tuning.dash_impulse;
            let dx = if action == InputAction::DashLeft { -dx } else { dx };
            player.vel += Vec2::new(dx, dy);
            player.dash_cooldown = tuning.cooldown();
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::ControlPointSequence;

    fn flat() -> ControlPointSequence {
        ControlPointSequence::from_heights(&[0.0; 10])
    }

    fn player_at(tuning: &Tuning, pos: Vec2) -> PlayerState {
        PlayerState::new(pos, tuning.mass, tuning.radius)
    }

    #[test]
    fn test_contact_response_on_flat_ground() {
        let v = resolve_contact(Vec2::new(0.0, -5.0), 0.0);
        assert_eq!(v, Vec2::ZERO);

        let v = resolve_contact(Vec2::new(3.0, -5.0), 0.0);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_contact_response_on_slope_keeps_tangent() {
        // 45° slope: velocity along the surface survives unchanged
        let along = Vec2::new(1.0, 1.0);
        let v = resolve_contact(along, 1.0);
        assert!((v - along).length() < 1e-5);

        // Velocity straight into the surface is removed
        let into = Vec2::new(1.0, -1.0);
        assert!(resolve_contact(into, 1.0).length() < 1e-5);
    }

    #[test]
    fn test_surface_lock_is_idempotent_at_rest() {
        let seq = flat();
        let tuning = Tuning::default();
        let mut player = player_at(&tuning, Vec2::new(4.5, tuning.radius));
        let before = player.clone();

        assert!(!lock_to_surface(&mut player, &seq.sampler()).unwrap());
        assert_eq!(player.pos, before.pos);
        assert_eq!(player.vel, before.vel);
    }

    #[test]
    fn test_surface_lock_lifts_sunken_player() {
        let seq = flat();
        let tuning = Tuning::default();
        let mut player = player_at(&tuning, Vec2::new(4.5, -0.1));

        assert!(lock_to_surface(&mut player, &seq.sampler()).unwrap());
        assert!((player.pos.y - tuning.radius).abs() < 1e-6);
    }

    #[test]
    fn test_free_fall_integrates_forces() {
        let seq = flat();
        let tuning = Tuning::default();
        let mut player = player_at(&tuning, Vec2::new(4.0, 2.0));

        let report = step(&mut player, &seq.sampler(), &tuning).unwrap();
        assert!(report.contact.is_none());
        assert!(!report.locked);

        let dt = tuning.physics_dt;
        let m = tuning.mass;
        let expected_vel = Vec2::new(dt * m * tuning.thrust, -dt * m * tuning.gravity * m);
        assert!((player.vel - expected_vel).length() < 1e-6);
        assert!((player.pos - (Vec2::new(4.0, 2.0) + dt * expected_vel)).length() < 1e-6);
    }

    #[test]
    fn test_resting_player_slides_without_sinking() {
        let seq = flat();
        let tuning = Tuning::default();
        let mut player = player_at(&tuning, Vec2::new(4.0, tuning.radius * 0.5));
        player.vel = Vec2::new(1.0, -5.0);

        for _ in 0..50 {
            let report = step(&mut player, &seq.sampler(), &tuning).unwrap();
            assert!(player.vel.y.abs() < 1e-4 || report.contact.is_none());
            assert!(player.pos.y >= tuning.radius - 1e-3);
        }
        // Thrust keeps pushing forward along the ground
        assert!(player.vel.x > 1.0);
        assert!(player.pos.x > 4.0);
    }

    #[test]
    fn test_back_wall_stops_backward_motion() {
        let seq = flat();
        let tuning = Tuning::default();
        let mut player = player_at(&tuning, Vec2::new(2.01, 1.0));
        player.vel = Vec2::new(-20.0, 0.0);

        step(&mut player, &seq.sampler(), &tuning).unwrap();
        assert_eq!(player.pos.x, 2.0);
        assert_eq!(player.vel.x, 0.0);

        // Forward motion is untouched
        player.vel.x = 1.0;
        assert!(!hold_back_wall(&mut player, &seq.sampler()));
    }

    #[test]
    fn test_jump_respects_cooldown() {
        let tuning = Tuning::default();
        let mut player = player_at(&tuning, Vec2::new(3.0, 0.0));

        assert!(apply_action(&mut player, InputAction::Jump, &tuning));
        assert_eq!(player.vel.y, tuning.jump_impulse);
        assert!((player.pos.y - tuning.jump_nudge).abs() < 1e-6);
        assert_eq!(player.jump_cooldown, tuning.cooldown());

        assert!(!apply_action(&mut player, InputAction::Jump, &tuning));
        assert_eq!(player.vel.y, tuning.jump_impulse);

        for _ in 0..tuning.cooldown_steps {
            player.tick_cooldowns(tuning.step);
        }
        assert!(apply_action(&mut player, InputAction::Jump, &tuning));
    }

    #[test]
    fn test_dash_directions_share_cooldown() {
        let tuning = Tuning::default();
        let mut player = player_at(&tuning, Vec2::new(3.0, 0.0));

        assert!(apply_action(&mut player, InputAction::DashLeft, &tuning));
        assert_eq!(player.vel, Vec2::new(-11.0, 2.0));
        assert!(!apply_action(&mut player, InputAction::DashRight, &tuning));

        player.dash_cooldown = std::time::Duration::ZERO;
        assert!(apply_action(&mut player, InputAction::DashRight, &tuning));
        assert_eq!(player.vel, Vec2::new(0.0, 4.0));

        // Dashing leaves the jump available
        assert!(player.can_jump());
    }
}
