//! Collision detection against the terrain spline and enemies
//!
//! The terrain test approximates the spline with a short polyline under the
//! player circle. Enemy tests use a cheap horizontal distance filter before
//! the exact box overlap.

use glam::Vec2;

use super::error::SplineError;
use super::spline::SplineSampler;
use super::state::{Enemy, PlayerState};
use crate::consts::{CONTACT_SAMPLES, ENEMY_BROAD_PHASE};

/// First spline sample within `radius` of `center`, scanning left to right
///
/// Samples span `[x - radius, x + radius]` at `radius / 8` spacing.
pub fn spline_contact(
    sampler: &SplineSampler<'_>,
    center: Vec2,
    radius: f32,
) -> Result<Option<Vec2>, SplineError> {
    let spacing = 2.0 * radius / (CONTACT_SAMPLES - 1) as f32;
    for k in 0..CONTACT_SAMPLES {
        let x = center.x - radius + k as f32 * spacing;
        let point = sampler.point_at_x(x)?;
        if point.distance(center) <= radius {
            return Ok(Some(point));
        }
    }
    Ok(None)
}

/// Enemies close enough horizontally to be worth an exact test
pub fn broad_phase<'a>(
    enemies: impl IntoIterator<Item = &'a Enemy>,
    player_x: f32,
) -> impl Iterator<Item = &'a Enemy> {
    enemies
        .into_iter()
        .filter(move |e| (e.pos.x - player_x).abs() < ENEMY_BROAD_PHASE)
}

/// First enemy whose box overlaps the player hitbox
pub fn enemy_contact<'a>(
    player: &PlayerState,
    enemies: impl IntoIterator<Item = &'a Enemy>,
) -> Option<&'a Enemy> {
    let hitbox = player.hitbox();
    broad_phase(enemies, player.pos.x).find(|e| e.hitbox().overlaps(&hitbox))
}
