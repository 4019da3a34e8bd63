//! Activation варианты: дополнительные эффекты поверх базового hook'а
//!
//! Composition вместо наследования: вариант — отдельный компонент рядом с
//! Trackable, его система реагирует на тот же TrackableActivated.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Spinner: вращение pivot'а с разгоном при активации
///
/// - Активация: current_speed = boost_speed (one-time)
/// - Каждый тик: current_speed плавно возвращается к rest_speed
/// - pivot: дочерний визуал для вращения (None → вращения нет, скорость всё равно считается)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Spinner {
    /// Скорость покоя (градусы/сек)
    pub rest_speed: f32,
    /// Скорость сразу после активации (градусы/сек)
    pub boost_speed: f32,
    pub current_speed: f32,
    pub pivot: Option<Entity>,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(SpinnerSettings::default())
    }
}

impl Spinner {
    pub fn new(settings: SpinnerSettings) -> Self {
        Self {
            rest_speed: settings.rest_speed,
            boost_speed: settings.boost_speed,
            current_speed: 0.0, // разгоняется до rest_speed сам
            pivot: None,
        }
    }

    pub fn with_pivot(mut self, pivot: Entity) -> Self {
        self.pivot = Some(pivot);
        self
    }

    pub fn boost(&mut self) {
        self.current_speed = self.boost_speed;
    }

    pub fn ease(&mut self, blend: f32) {
        self.current_speed += (self.rest_speed - self.current_speed) * blend.clamp(0.0, 1.0);
    }
}

/// Параметры Spinner для шаблонов спавна
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct SpinnerSettings {
    pub rest_speed: f32,
    pub boost_speed: f32,
}

impl Default for SpinnerSettings {
    fn default() -> Self {
        Self {
            rest_speed: 60.0,   // 1°/тик при 60Hz
            boost_speed: 720.0, // 2 оборота/сек сразу после активации
        }
    }
}

/// Hopper: прыжок на месте при активации (только если стоит на поверхности)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hopper {
    /// Вертикальный импульс (N·s)
    pub impulse: f32,
    /// Дистанция ray вниз для проверки опоры
    pub probe_distance: f32,
}

impl Default for Hopper {
    fn default() -> Self {
        Self::new(HopperSettings::default())
    }
}

impl Hopper {
    pub fn new(settings: HopperSettings) -> Self {
        Self {
            impulse: settings.impulse,
            probe_distance: settings.probe_distance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct HopperSettings {
    pub impulse: f32,
    pub probe_distance: f32,
}

impl Default for HopperSettings {
    fn default() -> Self {
        Self {
            impulse: 20.0, // ~1000N force в течение одного 50Hz physics step
            probe_distance: 0.5,
        }
    }
}
