//! Tests for per-tick interpolation.

#[cfg(test)]
mod tests {
    use bevy::color::LinearRgba;

    use crate::components::{Trackable, TargetState, TrackableState};
    use crate::proximity::ProximityConfig;

    const TICK: f32 = 1.0 / 60.0;

    fn channels(color: LinearRgba) -> [f32; 4] {
        [color.red, color.green, color.blue, color.alpha]
    }

    #[test]
    fn test_color_converges_monotonically_without_overshoot() {
        let trackable = Trackable::new(LinearRgba::rgb(1.0, 0.5, 0.0), LinearRgba::rgb(0.0, 0.0, 1.0));
        let mut state = TrackableState::new(trackable.default_color);
        state.set_activation_state(true);

        let target = channels(trackable.color_for(TargetState::Activated));
        let blend = ProximityConfig::default().color_blend_for(TICK);

        let mut previous_gap = f32::INFINITY;
        let mut converged_at = None;
        for tick in 0..1000 {
            let current = channels(state.interpolate(trackable.color_for(state.target()), blend));

            let gap: f32 = current
                .iter()
                .zip(target.iter())
                .map(|(c, t)| (t - c).abs())
                .sum();
            // 1e-6 — float rounding у самого target
            assert!(gap <= previous_gap + 1e-6, "tick {}: gap grew {} → {}", tick, previous_gap, gap);
            previous_gap = gap;

            // Не перелетаем target: канал остаётся по ту же сторону
            assert!(current[0] <= target[0] + 1e-6);
            assert!(current[2] >= target[2] - 1e-6);

            if converged_at.is_none() && gap < 1e-3 {
                converged_at = Some(tick);
            }
        }

        // 0.985^n * 2.5 < 1e-3 → n ≈ 518
        let converged_at = converged_at.expect("converges within 1000 ticks");
        assert!(converged_at > 100, "too fast: {}", converged_at); // asymptotic, не snap
    }

    #[test]
    fn test_first_tick_moves_by_blend_fraction() {
        let mut state = TrackableState::new(LinearRgba::BLACK);
        let blend = ProximityConfig::default().color_blend_for(TICK);

        let current = state.interpolate(LinearRgba::WHITE, blend);
        assert!((current.red - 0.015).abs() < 1e-4, "red = {}", current.red);
    }

    #[test]
    fn test_deactivation_tweens_back() {
        let trackable = Trackable::new(LinearRgba::WHITE, LinearRgba::BLACK);
        let mut state = TrackableState::new(trackable.default_color);
        let blend = ProximityConfig::default().color_blend_for(TICK);

        state.set_activation_state(true);
        for _ in 0..200 {
            state.interpolate(trackable.color_for(state.target()), blend);
        }
        let peak = state.current().red;
        assert!(peak > 0.9);

        state.set_activation_state(false);
        let after = state.interpolate(trackable.color_for(state.target()), blend);
        assert!(after.red < peak);
        assert!(after.red > 0.0); // плавно, без snap
    }
}
