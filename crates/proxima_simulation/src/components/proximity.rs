//! Proximity компоненты: listener (reference point) и motion signal

use bevy::prelude::*;

/// Reference point координатора (обычно на Pilot)
///
/// Добавление → ProximityCoordinator::bind, удаление/despawn → unbind.
/// Второй listener при живом первом отклоняется: компонент снимается.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct ProximityListener;

/// Детектор изменения pose
///
/// Сравнивает Transform с последним наблюдённым значением.
/// Первое наблюдение тоже считается движением (entity появился в мире).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct MotionSignal {
    last_pose: Option<Transform>,
}

impl MotionSignal {
    /// true если pose изменился с прошлой проверки (dirty → clean)
    pub fn observe(&mut self, pose: &Transform) -> bool {
        if self.last_pose.as_ref() == Some(pose) {
            return false;
        }
        self.last_pose = Some(*pose);
        true
    }
}
