//! Pilot locomotion + gait

use bevy::prelude::*;

use crate::components::{MotionSignal, Pilot, PilotGait, PilotInput, ProximityListener};

/// System: PilotInput → скорость, позиция, поворот, gait
///
/// Locked pilot (после спавна) только отсчитывает lock.
/// Движение горизонтальное: гравитация/коллизии — забота движка.
pub fn drive_pilots(
    time: Res<Time<Fixed>>,
    mut pilots: Query<(&mut Pilot, &PilotInput, &mut PilotGait, &mut Transform)>,
) {
    let delta = time.timestep().as_secs_f32();

    for (mut pilot, input, mut gait, mut transform) in pilots.iter_mut() {
        if pilot.is_locked() {
            pilot.movement_lock = (pilot.movement_lock - delta).max(0.0);
            continue;
        }

        pilot.apply_throttle(input.throttle);

        let forward = transform.forward().as_vec3();
        transform.translation += forward * pilot.speed * delta;

        if input.turn != 0.0 {
            transform.rotate_y((input.turn * pilot.rotation_speed * delta).to_radians());
        }

        // Проверяем что gait изменился — иначе Changed<PilotGait> спамит
        let next = PilotGait::from_motion(pilot.speed, input.throttle);
        if *gait != next {
            *gait = next;
        }
    }
}

/// Spawn pilot entity (reference point координатора)
///
/// # Компоненты
/// - Pilot (+ PilotInput, PilotGait через Required Components)
/// - ProximityListener — pilot и есть reference point
/// - MotionSignal — движение pilot'а запускает пересчёт
pub fn spawn_pilot(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Pilot::default(),
            ProximityListener,
            MotionSignal::default(),
        ))
        .id()
}
