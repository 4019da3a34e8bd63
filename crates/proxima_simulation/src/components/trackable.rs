//! Trackable компоненты: палитра, состояние активации, визуальная поверхность

use bevy::color::{LinearRgba, Mix};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::proximity::CoordinatorGeneration;

/// Proximity-reactive объект
///
/// Live пока компонент присутствует:
/// - Added<Trackable> → сброс состояния + цикл регистрации
/// - remove / despawn → unregister
///
/// Автоматически добавляет TrackableState и Transform через Required Components.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(TrackableState, Transform)]
pub struct Trackable {
    pub activated_color: LinearRgba,
    pub default_color: LinearRgba,
}

impl Default for Trackable {
    fn default() -> Self {
        Self {
            activated_color: LinearRgba::rgb(1.0, 0.55, 0.0),
            default_color: LinearRgba::rgb(0.35, 0.35, 0.4),
        }
    }
}

impl Trackable {
    pub fn new(activated_color: LinearRgba, default_color: LinearRgba) -> Self {
        Self {
            activated_color,
            default_color,
        }
    }

    pub fn color_for(&self, target: TargetState) -> LinearRgba {
        match target {
            TargetState::Activated => self.activated_color,
            TargetState::Default => self.default_color,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum TargetState {
    Activated,
    #[default]
    Default,
}

/// Состояние trackable
///
/// Инвариант: координатор меняет только `target` (через set_activation_state),
/// `current` двигается исключительно interpolate().
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct TrackableState {
    target: TargetState,
    current: LinearRgba,
    /// Поколение координатора, в котором entity зарегистрирован
    registration: Option<CoordinatorGeneration>,
}

impl TrackableState {
    pub fn new(default_color: LinearRgba) -> Self {
        Self {
            target: TargetState::Default,
            current: default_color,
            registration: None,
        }
    }

    pub fn target(&self) -> TargetState {
        self.target
    }

    pub fn is_activated(&self) -> bool {
        self.target == TargetState::Activated
    }

    pub fn current(&self) -> LinearRgba {
        self.current
    }

    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    pub fn registration(&self) -> Option<CoordinatorGeneration> {
        self.registration
    }

    pub fn mark_registered(&mut self, generation: CoordinatorGeneration) {
        self.registration = Some(generation);
    }

    pub fn clear_registration(&mut self) {
        self.registration = None;
    }

    /// Fresh lifecycle: default цвет сразу, без tween
    pub fn reset(&mut self, default_color: LinearRgba) {
        *self = Self::new(default_color);
    }

    /// SetActivationState
    ///
    /// Возвращает true если произошёл переход в Activated —
    /// вызывающий запускает activation hook. Повтор с тем же состоянием — no-op.
    pub fn set_activation_state(&mut self, is_activated: bool) -> bool {
        match (is_activated, self.target) {
            (true, TargetState::Default) => {
                self.target = TargetState::Activated;
                true
            }
            (false, TargetState::Activated) => {
                self.target = TargetState::Default;
                false
            }
            _ => false,
        }
    }

    /// Один тик tween'а: current += (target - current) * blend
    pub fn interpolate(&mut self, target_color: LinearRgba, blend: f32) -> LinearRgba {
        self.current = self.current.mix(&target_color, blend.clamp(0.0, 1.0));
        self.current
    }
}

/// Визуальная поверхность (material color), которую читает движок
///
/// Опциональна: trackable без неё продолжает интерполировать TrackableState.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct VisualSurface {
    pub color: LinearRgba,
}

/// One-shot cue базового activation hook'а (путь к клипу)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ActivationCue {
    pub clip: String,
}

impl ActivationCue {
    pub fn new(clip: impl Into<String>) -> Self {
        Self { clip: clip.into() }
    }
}
