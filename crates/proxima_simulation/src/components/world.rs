//! World компоненты: headless spatial volumes

use bevy::prelude::*;

/// Сферический объём, занимающий место в мире
///
/// Используется headless fallback'ом SpatialProbe (когда rapier context
/// отсутствует) для overlap проверок перед спавном.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Blocker {
    pub radius: f32,
}

impl Default for Blocker {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

impl Blocker {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Пересекается ли сфера (center, radius) с этим объёмом
    pub fn overlaps(&self, own_position: Vec3, center: Vec3, radius: f32) -> bool {
        own_position.distance_squared(center) < (self.radius + radius).powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocker_overlap() {
        let blocker = Blocker::new(0.5);

        assert!(blocker.overlaps(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 1.0));
        assert!(!blocker.overlaps(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0));
    }
}
