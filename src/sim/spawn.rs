//! Procedural placement of enemies and stars
//!
//! Spawning happens one span at a time, in lockstep with terrain extension.
//! Enemies always rest on the spline surface; stars float in the background.

use glam::Vec2;
use rand::Rng;

use super::error::SplineError;
use super::spline::SplineSampler;
use super::state::{Enemy, Star};
use crate::tuning::Tuning;

/// Scatter `stars_per_span` stars over `[frontier, frontier + 1)`
pub fn spawn_stars<R: Rng>(frontier: f32, tuning: &Tuning, rng: &mut R) -> Vec<Star> {
    (0..tuning.stars_per_span)
        .map(|_| Star {
            pos: Vec2::new(
                frontier + rng.random::<f32>(),
                rng.random_range(0.0..tuning.star_ceiling),
            ),
        })
        .collect()
}

/// Roll each enemy slot across the span starting at `span_start`
///
/// Each of the `enemy_slots` slots independently holds an enemy with
/// probability `1 / enemy_odds`. Returns the surface positions chosen.
pub fn spawn_enemies<R: Rng>(
    sampler: &SplineSampler<'_>,
    span_start: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Result<Vec<Vec2>, SplineError> {
    let mut placed = Vec::new();
    for slot in 0..tuning.enemy_slots {
        // Roll first so the RNG stream does not depend on terrain shape
        if rng.random_range(0..tuning.enemy_odds.max(1)) != 0 {
            continue;
        }
        let x = span_start + slot as f32 / tuning.enemy_slots as f32;
        placed.push(sampler.point_at_x(x)?);
    }
    Ok(placed)
}

/// Assigns ids to enemy positions
pub fn into_enemies(positions: Vec<Vec2>, next_id: &mut u32) -> Vec<Enemy> {
    positions
        .into_iter()
        .map(|pos| {
            let id = *next_id;
            *next_id += 1;
            Enemy { id, pos }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::ControlPointSequence;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn terrain(seed: u64) -> ControlPointSequence {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut seq = ControlPointSequence::new(0.7);
        seq.ensure_coverage(12.0, &mut rng).unwrap();
        seq
    }

    #[test]
    fn test_enemy_spawn_is_deterministic() {
        let seq = terrain(3);
        let tuning = Tuning::default();

        let run = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            (0..8)
                .map(|span| spawn_enemies(&seq.sampler(), 2.0 + span as f32, &tuning, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_enemies_rest_on_surface_inside_span() {
        let seq = terrain(9);
        let tuning = Tuning {
            enemy_odds: 1,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(0);

        let placed = spawn_enemies(&seq.sampler(), 5.0, &tuning, &mut rng).unwrap();
        assert_eq!(placed.len(), tuning.enemy_slots as usize);
        for pos in &placed {
            assert!(pos.x >= 5.0 - 1e-5 && pos.x < 6.0);
            let surface = seq.sampler().height_at(pos.x).unwrap();
            assert!((pos.y - surface).abs() < 1e-4);
        }
        // One per slot, no duplicates
        assert!(placed.windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn test_enemy_rate_matches_odds() {
        let seq = terrain(5);
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1234);

        let spans = 3000;
        let total: usize = (0..spans)
            .map(|_| spawn_enemies(&seq.sampler(), 4.0, &tuning, &mut rng).unwrap().len())
            .sum();
        let mean = total as f32 / spans as f32;
        // Expected 20 / 30 per span
        assert!((mean - 0.667).abs() < 0.08, "mean enemies per span = {mean}");
    }

    #[test]
    fn test_enemy_span_must_be_sampleable() {
        let seq = terrain(1);
        let tuning = Tuning {
            enemy_odds: 1,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(0);
        let beyond = seq.frontier();
        assert!(matches!(
            spawn_enemies(&seq.sampler(), beyond, &tuning, &mut rng),
            Err(SplineError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_stars_ahead_of_frontier() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(77);
        let stars = spawn_stars(10.0, &tuning, &mut rng);
        assert_eq!(stars.len(), tuning.stars_per_span as usize);
        for star in stars {
            assert!(star.pos.x >= 10.0 && star.pos.x < 11.0);
            assert!(star.pos.y >= 0.0 && star.pos.y < tuning.star_ceiling);
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut next_id = 7;
        let enemies = into_enemies(vec![Vec2::ZERO, Vec2::ONE], &mut next_id);
        assert_eq!(enemies.iter().map(|e| e.id).collect::<Vec<_>>(), vec![7, 8]);
        assert_eq!(next_id, 9);
    }
}
