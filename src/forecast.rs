//! Synthetic forward risk projection.
//!
//! Not a meteorological model: the projection perturbs the current pressure
//! with a bounded random walk and reclassifies at each step. It exists to
//! show how risk would evolve if pressure drifted within the observed range,
//! not to predict weather.
//!
//! # RNG injection
//! The walk takes any `rand::Rng` so tests can pass a seeded `StdRng` and
//! assert exact output. Production callers use `simulate`, which draws from
//! the thread RNG — two production runs will not replay the same trace.

use rand::Rng;

use crate::model::ForecastPoint;
use crate::risk::rules::classify_pressure;

/// Default projection length: 16 steps of 3 hours = 48-hour horizon.
pub const DEFAULT_HORIZON_STEPS: u32 = 16;

/// Default step width in hours.
pub const DEFAULT_STEP_HOURS: u32 = 3;

/// Largest per-step pressure change, in hPa. Deltas are drawn uniformly
/// from the integers [-MAX_STEP_DELTA_HPA, +MAX_STEP_DELTA_HPA].
pub const MAX_STEP_DELTA_HPA: i32 = 5;

/// Projects risk forward from `initial_pressure` using the supplied RNG.
///
/// Each step accumulates one bounded delta and classifies the result
/// through the rule table — always the rule table, never the trained
/// model, since the walk perturbs pressure only and models no coordinate
/// drift. The first emitted point (offset 0) is already perturbed once.
///
/// No clamping is applied to the accumulated pressure; classification
/// saturates at SEVERE and NORMAL on its own.
pub fn simulate_with<R: Rng>(
    initial_pressure: f64,
    horizon_steps: u32,
    step_hours: u32,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    let mut pressure = initial_pressure;
    let mut points = Vec::with_capacity(horizon_steps as usize);
    for i in 0..horizon_steps {
        pressure += rng.gen_range(-MAX_STEP_DELTA_HPA..=MAX_STEP_DELTA_HPA) as f64;
        points.push(ForecastPoint {
            offset_hours: i * step_hours,
            risk: classify_pressure(pressure),
        });
    }
    points
}

/// Default 48-hour projection with a thread-local RNG.
pub fn simulate(initial_pressure: f64) -> Vec<ForecastPoint> {
    simulate_with(
        initial_pressure,
        DEFAULT_HORIZON_STEPS,
        DEFAULT_STEP_HOURS,
        &mut rand::thread_rng(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_horizon_shape() {
        let points = simulate(960.0);
        assert_eq!(points.len(), 16, "default projection should have 16 points");
        let offsets: Vec<u32> = points.iter().map(|p| p.offset_hours).collect();
        let expected: Vec<u32> = (0..16).map(|i| i * 3).collect();
        assert_eq!(offsets, expected, "offsets should be 0,3,...,45");
    }

    #[test]
    fn test_seeded_walk_is_deterministic() {
        let a = simulate_with(960.0, 16, 3, &mut StdRng::seed_from_u64(42));
        let b = simulate_with(960.0, 16, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b, "same seed must replay the same projection");
    }

    #[test]
    fn test_seeded_risks_match_rule_table_on_accumulated_trace() {
        // Round-trip determinism: recompute the pressure trace from the
        // same seed and check every point classifies identically.
        let points = simulate_with(960.0, 16, 3, &mut StdRng::seed_from_u64(7));

        let mut rng = StdRng::seed_from_u64(7);
        let mut pressure = 960.0;
        for (i, point) in points.iter().enumerate() {
            pressure += rng.gen_range(-MAX_STEP_DELTA_HPA..=MAX_STEP_DELTA_HPA) as f64;
            assert_eq!(
                point.risk,
                classify_pressure(pressure),
                "point {} risk does not match rule table on replayed trace",
                i
            );
            assert_eq!(point.offset_hours, i as u32 * 3);
        }
    }

    #[test]
    fn test_walk_stays_within_step_bounds() {
        // With |delta| <= 5, after k steps the pressure can have moved at
        // most 5k from the start. From 1050 hPa, 16 steps can reach at
        // worst 970 — never below 920, so SEVERE must be impossible.
        let points = simulate_with(1050.0, 16, 3, &mut StdRng::seed_from_u64(99));
        for point in &points {
            assert_ne!(
                point.risk,
                crate::model::RiskLevel::Severe,
                "bounded walk from 1050 hPa cannot reach the severe bucket in 16 steps"
            );
        }
    }

    #[test]
    fn test_extreme_start_saturates_severe() {
        // Starting far below every threshold, all 16 points stay SEVERE:
        // the walk cannot climb 5 hPa/step fast enough to escape.
        let points = simulate_with(700.0, 16, 3, &mut StdRng::seed_from_u64(3));
        for point in &points {
            assert_eq!(point.risk, crate::model::RiskLevel::Severe);
        }
    }

    #[test]
    fn test_custom_step_hours() {
        let points = simulate_with(1000.0, 4, 6, &mut StdRng::seed_from_u64(1));
        let offsets: Vec<u32> = points.iter().map(|p| p.offset_hours).collect();
        assert_eq!(offsets, vec![0, 6, 12, 18]);
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let points = simulate_with(1000.0, 0, 3, &mut StdRng::seed_from_u64(1));
        assert!(points.is_empty());
    }
}
