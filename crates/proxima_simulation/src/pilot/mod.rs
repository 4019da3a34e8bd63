//! Pilot domain — observer, которым управляет игрок
//!
//! Содержит:
//! - drive_pilots (locomotion + gait)
//! - handle_spawn_requests (spawn control)
//! - SpawnTemplates, spawn_trackable (entity-creation service)

use bevy::prelude::*;

use crate::proximity::ProximitySystems;

pub mod locomotion;
pub mod spawn;
pub mod templates;

pub use locomotion::{drive_pilots, spawn_pilot};
pub use spawn::{
    handle_spawn_requests, spawn_point, SPAWN_CLEARANCE_RADIUS, SPAWN_DISTANCE, SPAWN_HEIGHT,
    SPAWN_MOVEMENT_LOCK,
};
pub use templates::{spawn_trackable, SpawnTemplates, TemplateVariant, TrackableTemplate};

/// Pilot Plugin
///
/// Системы pilot'а идут ДО ProximitySystems: движение этого тика
/// сразу попадает в MotionSignal.
pub struct PilotPlugin;

impl Plugin for PilotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnTemplates>();

        app.add_systems(
            FixedUpdate,
            (drive_pilots, handle_spawn_requests)
                .chain()
                .before(ProximitySystems),
        );
    }
}
