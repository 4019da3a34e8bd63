//! Pilot spawn control

use bevy::prelude::*;

use crate::components::{Pilot, PilotInput};
use crate::logger;
use crate::pilot::templates::{spawn_trackable, SpawnTemplates};
use crate::proximity::FeedbackCue;
use crate::spatial::SpatialProbe;

/// Дистанция спавна перед pilot'ом (m)
pub const SPAWN_DISTANCE: f32 = 2.0;
/// Подъём точки спавна над pilot'ом (m)
pub const SPAWN_HEIGHT: f32 = 1.0;
/// Радиус свободного пространства для спавна (m)
pub const SPAWN_CLEARANCE_RADIUS: f32 = 1.0;
/// Пауза управления после спавна (sec), чтобы не врезаться в объект
pub const SPAWN_MOVEMENT_LOCK: f32 = 0.25;

/// Точка спавна перед pilot'ом
pub fn spawn_point(transform: &Transform) -> Vec3 {
    transform.translation + Vec3::Y * SPAWN_HEIGHT + transform.forward().as_vec3() * SPAWN_DISTANCE
}

/// System: PilotInput.spawn → новый trackable
///
/// 1. Запрос потребляется в любом случае (one-shot, как key down)
/// 2. Шаблон не задан → пропуск
/// 3. Место занято (overlap sphere) → пропуск
/// 4. Стоп pilot'а + lock, spawn по шаблону, FeedbackCue
pub fn handle_spawn_requests(
    mut commands: Commands,
    templates: Option<Res<SpawnTemplates>>,
    probe: SpatialProbe,
    mut pilots: Query<(&mut Pilot, &mut PilotInput, &Transform)>,
    mut feedback: EventWriter<FeedbackCue>,
) {
    for (mut pilot, mut input, transform) in pilots.iter_mut() {
        let Some(kind) = input.spawn.take() else {
            continue;
        };

        let Some(template) = templates.as_ref().and_then(|t| t.get(kind)) else {
            logger::log(&format!("Spawn {:?} skipped: no template", kind));
            continue;
        };

        let position = spawn_point(transform);
        if probe.is_obstructed(position, SPAWN_CLEARANCE_RADIUS) {
            logger::log(&format!("Spawn {:?} skipped: {:?} is obstructed", kind, position));
            continue;
        }

        pilot.speed = 0.0;
        pilot.movement_lock = SPAWN_MOVEMENT_LOCK;

        let entity = spawn_trackable(&mut commands, template, position);
        logger::log_info(&format!("Spawned {:?} {:?} at {:?}", kind, entity, position));

        if let Some(clip) = &pilot.spawn_clip {
            feedback.write(FeedbackCue {
                clip: clip.clone(),
                position: transform.translation,
            });
        }
    }
}
