//! Pilot компоненты: observer, которым управляет игрок
//!
//! Input device abstraction — вне симуляции: хост заполняет PilotInput
//! (для headless тестов — mock input напрямую).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Player-controlled observer
///
/// Движение: forward/backward + yaw поворот (tank controls).
/// Автоматически добавляет PilotInput, PilotGait, Transform.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(PilotInput, PilotGait, Transform)]
pub struct Pilot {
    /// Прирост скорости за тик при нажатом throttle
    pub acceleration: f32,
    /// Максимальная скорость вперёд (m/s), назад — половина
    pub max_speed: f32,
    /// Скорость поворота (градусы/сек)
    pub rotation_speed: f32,
    /// Текущая скорость (m/s), отрицательная — назад
    pub speed: f32,
    /// Секунды до возврата управления (после спавна)
    pub movement_lock: f32,
    /// Cue при успешном спавне
    pub spawn_clip: Option<String>,
}

impl Default for Pilot {
    fn default() -> Self {
        Self {
            acceleration: 2.0,
            max_speed: 4.0,
            rotation_speed: 90.0,
            speed: 0.0,
            movement_lock: 0.0,
            spawn_clip: None,
        }
    }
}

impl Pilot {
    pub fn is_locked(&self) -> bool {
        self.movement_lock > 0.0
    }

    /// Обновить скорость по throttle input
    ///
    /// Без input — быстрое торможение (половина скорости за тик),
    /// с input — разгон с clamp в [-max/2, max].
    pub fn apply_throttle(&mut self, throttle: f32) {
        if throttle == 0.0 {
            self.speed += (0.0 - self.speed) * 0.5;
        } else {
            self.speed =
                (self.speed + throttle * self.acceleration).clamp(-self.max_speed / 2.0, self.max_speed);
        }
    }
}

/// Input для Pilot (заполняется хостом каждый тик)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PilotInput {
    /// -1..1, вперёд/назад
    pub throttle: f32,
    /// -1..1, поворот (положительный — налево, против часовой вокруг Y)
    pub turn: f32,
    /// Запрос спавна (потребляется системой спавна)
    pub spawn: Option<SpawnKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum SpawnKind {
    Spinner,
    Hopper,
}

/// Gait для анимации (animation parameters для движка)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum PilotGait {
    #[default]
    Idle,
    /// Назад
    Walk,
    /// Вперёд
    Run,
}

impl PilotGait {
    pub fn from_motion(speed: f32, throttle: f32) -> Self {
        if throttle == 0.0 {
            PilotGait::Idle
        } else if speed > 0.0 {
            PilotGait::Run
        } else if speed < 0.0 {
            PilotGait::Walk
        } else {
            PilotGait::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_clamps_speed() {
        let mut pilot = Pilot::default();

        for _ in 0..10 {
            pilot.apply_throttle(1.0);
        }
        assert_eq!(pilot.speed, 4.0);

        for _ in 0..10 {
            pilot.apply_throttle(-1.0);
        }
        assert_eq!(pilot.speed, -2.0); // назад — половина max
    }

    #[test]
    fn test_release_throttle_halves_speed() {
        let mut pilot = Pilot {
            speed: 4.0,
            ..default()
        };

        pilot.apply_throttle(0.0);
        assert_eq!(pilot.speed, 2.0);
        pilot.apply_throttle(0.0);
        assert_eq!(pilot.speed, 1.0);
    }

    #[test]
    fn test_gait_mapping() {
        assert_eq!(PilotGait::from_motion(3.0, 1.0), PilotGait::Run);
        assert_eq!(PilotGait::from_motion(-1.0, -1.0), PilotGait::Walk);
        assert_eq!(PilotGait::from_motion(3.0, 0.0), PilotGait::Idle); // тормозим без input
        assert_eq!(PilotGait::from_motion(0.0, 1.0), PilotGait::Idle);
    }
}
