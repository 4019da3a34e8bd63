//! Proximity-activation module
//!
//! ECS ответственность:
//! - ProximityCoordinator: registry + единственный active trackable
//! - Протокол регистрации (retry каждый тик до успеха)
//! - MotionSignal → пересчёт nearest
//!
//! Хост ответственность:
//! - Transform'ы (движение pilot'а, физика)
//! - Отрисовка VisualSurface, проигрывание FeedbackCue

use bevy::prelude::*;

pub mod config;
pub mod coordinator;
pub mod events;
pub mod systems;


// Re-export основных типов
pub use config::{scale_blend, ProximityConfig};
pub use coordinator::{
    nearest_entity, CoordinatorError, CoordinatorGeneration, ProximityCoordinator, ProximityScene,
};
pub use events::{ActivationSignal, FeedbackCue, MotionDetected, TrackableActivated};
pub use systems::TrackedScene;

/// Set всех систем координатора (для ordering из других plugins)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProximitySystems;

/// Proximity Plugin
///
/// Регистрирует системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. unbind_listeners — listener удалён → экземпляр координатора снят
/// 2. bind_listeners — новый listener → bind (дубликат отключается)
/// 3. release_trackables — удалённые trackables → unregister + пересчёт
/// 4. begin_registration — новые trackables → сброс состояния
/// 5. attempt_registration — попытка регистрации (retry до успеха)
/// 6. detect_motion — MotionSignal → MotionDetected
/// 7. relay_motion — MotionDetected → пересчёт nearest
pub struct ProximityPlugin;

impl Plugin for ProximityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProximityCoordinator>()
            .init_resource::<ProximityConfig>();

        // Регистрация событий
        app.add_event::<MotionDetected>()
            .add_event::<ActivationSignal>()
            .add_event::<TrackableActivated>()
            .add_event::<FeedbackCue>();

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: lifecycle координатора
                systems::unbind_listeners,
                systems::bind_listeners,
                // Фаза 2: lifecycle trackables
                systems::release_trackables,
                systems::begin_registration,
                systems::attempt_registration,
                // Фаза 3: движение
                systems::detect_motion,
                systems::relay_motion,
            )
                .chain()
                .in_set(ProximitySystems),
        );
    }
}
