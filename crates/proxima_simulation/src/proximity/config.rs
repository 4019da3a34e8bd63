//! Proximity конфигурация: blend коэффициенты, независимые от tick rate

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Resource: параметры сглаживания
///
/// Коэффициенты заданы "за один тик при reference_hz". Реальный blend
/// пересчитывается из длительности тика: 1 - (1 - k)^(dt * reference_hz).
/// При 60Hz это ровно k, при других частотах визуально то же самое.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct ProximityConfig {
    /// Доля оставшегося расстояния цвета за reference тик
    pub color_blend: f32,
    /// Доля возврата скорости Spinner к rest_speed за reference тик
    pub spin_ease: f32,
    /// Частота, для которой заданы коэффициенты
    pub reference_hz: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            color_blend: 0.015,
            spin_ease: 0.001,
            reference_hz: 60.0,
        }
    }
}

impl ProximityConfig {
    pub fn color_blend_for(&self, delta_secs: f32) -> f32 {
        scale_blend(self.color_blend, delta_secs, self.reference_hz)
    }

    pub fn spin_ease_for(&self, delta_secs: f32) -> f32 {
        scale_blend(self.spin_ease, delta_secs, self.reference_hz)
    }
}

/// Exponential smoothing коэффициент для произвольного dt
pub fn scale_blend(per_reference_tick: f32, delta_secs: f32, reference_hz: f32) -> f32 {
    let per_tick = per_reference_tick.clamp(0.0, 1.0);
    if delta_secs <= 0.0 || reference_hz <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - per_tick).powf(delta_secs * reference_hz)
}
