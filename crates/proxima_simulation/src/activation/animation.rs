//! Per-tick анимация: tween цвета и вращение Spinner
//!
//! Работает каждый тик безусловно, независимо от того, был ли переход.

use bevy::prelude::*;

use crate::components::{Spinner, Trackable, TrackableState, VisualSurface};
use crate::proximity::ProximityConfig;

/// System: current цвет → target цвет (exponential smoothing)
///
/// Blend выводится из fixed timestep, не из числа кадров.
/// Без VisualSurface состояние всё равно интерполируется.
pub fn tween_trackable_colors(
    config: Res<ProximityConfig>,
    time: Res<Time<Fixed>>,
    mut trackables: Query<(&Trackable, &mut TrackableState, Option<&mut VisualSurface>)>,
) {
    let blend = config.color_blend_for(time.timestep().as_secs_f32());

    for (trackable, mut state, surface) in trackables.iter_mut() {
        let target_color = trackable.color_for(state.target());
        let current = state.interpolate(target_color, blend);
        if let Some(mut surface) = surface {
            surface.color = current;
        }
    }
}

/// System: Spinner скорость → rest_speed, pivot вращается вокруг local Z
pub fn spin_trackables(
    config: Res<ProximityConfig>,
    time: Res<Time<Fixed>>,
    mut spinners: Query<&mut Spinner>,
    mut pivots: Query<&mut Transform>,
) {
    let delta = time.timestep().as_secs_f32();
    let ease = config.spin_ease_for(delta);

    for mut spinner in spinners.iter_mut() {
        spinner.ease(ease);

        let Some(pivot) = spinner.pivot else {
            continue;
        };
        if let Ok(mut transform) = pivots.get_mut(pivot) {
            transform.rotate_local_z((spinner.current_speed * delta).to_radians());
        }
    }
}
