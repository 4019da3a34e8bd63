//! Spatial queries: overlap-sphere и ray вниз
//!
//! Rapier context есть (RapierPhysicsPlugin добавлен хостом) → запросы в
//! rapier query pipeline. Нет → headless fallback: Blocker сферы + GroundPlane
//! (пол на фиксированной высоте, как ground stub kinematic контроллера).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, QueryFilter, ReadRapierContext};
use serde::{Deserialize, Serialize};

use crate::components::Blocker;

/// Resource: высота пола для headless fallback
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct GroundPlane {
    pub height: f32,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self { height: 0.0 }
    }
}

impl GroundPlane {
    /// Ray вниз из origin длиной max_distance пересекает пол
    pub fn is_within(&self, origin: Vec3, max_distance: f32) -> bool {
        let drop = origin.y - self.height;
        (0.0..=max_distance).contains(&drop)
    }
}

#[derive(SystemParam)]
pub struct SpatialProbe<'w, 's> {
    rapier: ReadRapierContext<'w, 's>,
    ground: Option<Res<'w, GroundPlane>>,
    blockers: Query<'w, 's, (&'static Transform, &'static Blocker)>,
}

impl SpatialProbe<'_, '_> {
    /// Есть ли что-то в сфере (center, radius)
    pub fn is_obstructed(&self, center: Vec3, radius: f32) -> bool {
        if let Ok(context) = self.rapier.single() {
            return context
                .intersection_with_shape(center, Quat::IDENTITY, &Collider::ball(radius), QueryFilter::default())
                .is_some();
        }

        self.blockers
            .iter()
            .any(|(transform, blocker)| blocker.overlaps(transform.translation, center, radius))
    }

    /// Есть ли поверхность прямо под origin в пределах max_distance
    ///
    /// `ignore` — собственный collider/body того, кто проверяет опору.
    pub fn has_surface_below(&self, origin: Vec3, max_distance: f32, ignore: Entity) -> bool {
        if let Ok(context) = self.rapier.single() {
            let filter = QueryFilter::default()
                .exclude_collider(ignore)
                .exclude_rigid_body(ignore);
            return context
                .cast_ray(origin, Vec3::NEG_Y, max_distance, true, filter)
                .is_some();
        }

        self.ground
            .as_ref()
            .is_some_and(|ground| ground.is_within(origin, max_distance))
    }
}
