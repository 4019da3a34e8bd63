//! Proximity systems: lifecycle listener'а, протокол регистрации, motion relay
//!
//! Все системы — в FixedUpdate, chained (ProximityPlugin).
//! Registry и переходы меняются только здесь, одним потоком расписания.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{MotionSignal, ProximityListener, Trackable, TrackableState, VisualSurface};
use crate::logger;
use crate::proximity::{
    ActivationSignal, CoordinatorGeneration, MotionDetected, ProximityCoordinator, ProximityScene,
    TrackableActivated,
};

/// ProximityScene поверх ECS queries
///
/// send_state пишет в TrackableState и поднимает TrackableActivated
/// при переходе в Activated (activation hook).
#[derive(SystemParam)]
pub struct TrackedScene<'w, 's> {
    transforms: Query<'w, 's, &'static Transform>,
    states: Query<'w, 's, &'static mut TrackableState>,
    signals: EventWriter<'w, ActivationSignal>,
    activations: EventWriter<'w, TrackableActivated>,
}

impl TrackedScene<'_, '_> {
    fn needs_registration(&self, entity: Entity, generation: CoordinatorGeneration) -> bool {
        self.states
            .get(entity)
            .is_ok_and(|state| state.registration() != Some(generation))
    }

    fn mark_registered(&mut self, entity: Entity, generation: CoordinatorGeneration) {
        if let Ok(mut state) = self.states.get_mut(entity) {
            state.mark_registered(generation);
        }
    }

    fn clear_registration(&mut self, entity: Entity) {
        if let Ok(mut state) = self.states.get_mut(entity) {
            state.clear_registration();
        }
    }
}

impl ProximityScene for TrackedScene<'_, '_> {
    fn reference_position(&self, listener: Entity) -> Option<Vec3> {
        self.transforms.get(listener).ok().map(|t| t.translation)
    }

    fn position_of(&self, entity: Entity) -> Option<Vec3> {
        self.transforms.get(entity).ok().map(|t| t.translation)
    }

    fn send_state(&mut self, entity: Entity, is_activated: bool) {
        self.signals.write(ActivationSignal {
            entity,
            is_activated,
        });

        // Entity мог быть despawned (unregister после удаления) — тогда только signal
        let Ok(mut state) = self.states.get_mut(entity) else {
            return;
        };
        if state.set_activation_state(is_activated) {
            let position = self
                .transforms
                .get(entity)
                .map(|t| t.translation)
                .unwrap_or_default();
            self.activations.write(TrackableActivated { entity, position });
        }
    }
}

/// System: снять binding когда listener удалён/despawned
pub fn unbind_listeners(
    mut removed: RemovedComponents<ProximityListener>,
    mut coordinator: ResMut<ProximityCoordinator>,
    mut scene: TrackedScene,
) {
    for listener in removed.read() {
        coordinator.unbind(listener, &mut scene);
    }
}

/// System: bind нового listener'а, дубликат отклоняется и отключается
pub fn bind_listeners(
    mut commands: Commands,
    mut coordinator: ResMut<ProximityCoordinator>,
    listeners: Query<Entity, Added<ProximityListener>>,
) {
    for listener in listeners.iter() {
        if let Err(err) = coordinator.bind(listener) {
            logger::log_warning(&format!("{}. Only one listener may exist, disabling the new one.", err));
            commands.entity(listener).remove::<ProximityListener>();
        }
    }
}

/// System: trackable стал non-live → unregister (безусловно)
///
/// Вызывается даже если entity так и не успел зарегистрироваться.
pub fn release_trackables(
    mut removed: RemovedComponents<Trackable>,
    mut coordinator: ResMut<ProximityCoordinator>,
    mut scene: TrackedScene,
) {
    for entity in removed.read() {
        scene.clear_registration(entity);
        coordinator.unregister(entity, &mut scene);
    }
}

/// System: trackable стал live → default цвет, цикл регистрации с нуля
pub fn begin_registration(
    mut trackables: Query<
        (&Trackable, &mut TrackableState, Option<&mut VisualSurface>),
        Added<Trackable>,
    >,
) {
    for (trackable, mut state, surface) in trackables.iter_mut() {
        state.reset(trackable.default_color);
        if let Some(mut surface) = surface {
            surface.color = trackable.default_color;
        }
    }
}

/// System: одна попытка регистрации за тик для каждого незарегистрированного
///
/// Без экземпляра координатора — ждём следующего тика (retry).
/// После rebind (новое поколение) trackables перерегистрируются сами.
pub fn attempt_registration(
    mut coordinator: ResMut<ProximityCoordinator>,
    mut scene: TrackedScene,
    trackables: Query<Entity, With<Trackable>>,
) {
    let Some(generation) = coordinator.generation() else {
        return;
    };

    let pending: Vec<Entity> = trackables
        .iter()
        .filter(|&entity| scene.needs_registration(entity, generation))
        .collect();

    for entity in pending {
        if coordinator.register(entity, &mut scene) {
            scene.mark_registered(entity, generation);
        }
    }
}

/// System: MotionSignal → MotionDetected (один раз за изменение)
pub fn detect_motion(
    mut signals: Query<(Entity, &Transform, &mut MotionSignal)>,
    mut motion_events: EventWriter<MotionDetected>,
) {
    for (entity, transform, mut signal) in signals.iter_mut() {
        if signal.observe(transform) {
            motion_events.write(MotionDetected { source: entity });
        }
    }
}

/// System: MotionDetected → report_motion
///
/// Все события тика схлопываются в один пересчёт (результат тот же).
pub fn relay_motion(
    mut motion_events: EventReader<MotionDetected>,
    mut coordinator: ResMut<ProximityCoordinator>,
    mut scene: TrackedScene,
) {
    if motion_events.read().count() == 0 {
        return;
    }
    coordinator.report_motion(&mut scene);
}
