//! Spawn templates — blueprint'ы trackable объектов
//!
//! **TrackableTemplate** — статический blueprint (палитра, cue, вариант):
//! - Хранится в `SpawnTemplates` resource (lookup по SpawnKind)
//! - Создаются hardcoded в `SpawnTemplates::default()`, хост может заменить
//!
//! **spawn_trackable** — entity-creation service: template + позиция → live trackable

use bevy::color::LinearRgba;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, ExternalImpulse, RigidBody, Velocity};
use serde::{Deserialize, Serialize};

use crate::components::{
    ActivationCue, Blocker, Hopper, HopperSettings, MotionSignal, SpawnKind, Spinner, SpinnerSettings,
    Trackable, VisualSurface,
};

/// Вариант activation hook'а в шаблоне
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TemplateVariant {
    /// Только базовый hook (cue)
    Plain,
    Spinner(SpinnerSettings),
    Hopper(HopperSettings),
}

/// Blueprint trackable объекта
///
/// Цвета — linear RGBA массивы (serde без bevy_color/serialize).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackableTemplate {
    pub activated_color: [f32; 4],
    pub default_color: [f32; 4],
    /// Cue базового hook'а (None → без звука)
    pub activation_clip: Option<String>,
    pub variant: TemplateVariant,
    /// Радиус занимаемого объёма (Blocker / rapier Collider)
    pub radius: f32,
    /// Добавлять MotionSignal (объект сам двигается, например Hopper)
    pub reports_motion: bool,
}

impl TrackableTemplate {
    pub fn trackable(&self) -> Trackable {
        Trackable::new(to_linear(self.activated_color), to_linear(self.default_color))
    }
}

fn to_linear(color: [f32; 4]) -> LinearRgba {
    LinearRgba::new(color[0], color[1], color[2], color[3])
}

/// Resource: шаблоны для pilot спавна
///
/// None — шаблон не задан, спавн этого типа пропускается.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTemplates {
    pub spinner: Option<TrackableTemplate>,
    pub hopper: Option<TrackableTemplate>,
}

impl Default for SpawnTemplates {
    fn default() -> Self {
        Self {
            spinner: Some(TrackableTemplate {
                activated_color: [1.0, 0.85, 0.1, 1.0],
                default_color: [0.3, 0.3, 0.35, 1.0],
                activation_clip: Some("audio/item_activate.ogg".to_string()),
                variant: TemplateVariant::Spinner(SpinnerSettings::default()),
                radius: 0.5,
                reports_motion: false,
            }),
            hopper: Some(TrackableTemplate {
                activated_color: [0.1, 0.9, 0.4, 1.0],
                default_color: [0.3, 0.3, 0.35, 1.0],
                activation_clip: Some("audio/bot_activate.ogg".to_string()),
                variant: TemplateVariant::Hopper(HopperSettings::default()),
                radius: 0.5,
                reports_motion: true, // прыгает сам → пересчёт nearest
            }),
        }
    }
}

impl SpawnTemplates {
    pub fn get(&self, kind: SpawnKind) -> Option<&TrackableTemplate> {
        match kind {
            SpawnKind::Spinner => self.spinner.as_ref(),
            SpawnKind::Hopper => self.hopper.as_ref(),
        }
    }
}

/// Spawn trackable по шаблону (identity rotation)
///
/// # Компоненты
/// - Trackable + VisualSurface (default цвет), Blocker
/// - ActivationCue — если задан clip
/// - MotionSignal — если reports_motion
/// - Spinner + дочерний pivot entity
/// - Hopper + rapier body (RigidBody::Dynamic, Collider, Velocity, ExternalImpulse)
pub fn spawn_trackable(commands: &mut Commands, template: &TrackableTemplate, position: Vec3) -> Entity {
    let trackable = template.trackable();
    let default_color = trackable.default_color;

    let mut entity = commands.spawn((
        Transform::from_translation(position),
        trackable,
        VisualSurface {
            color: default_color,
        },
        Blocker::new(template.radius),
    ));

    if let Some(clip) = &template.activation_clip {
        entity.insert(ActivationCue::new(clip.clone()));
    }
    if template.reports_motion {
        entity.insert(MotionSignal::default());
    }

    let id = entity.id();

    match template.variant {
        TemplateVariant::Plain => {}
        TemplateVariant::Spinner(settings) => {
            let pivot = commands.spawn(Transform::default()).id();
            commands
                .entity(id)
                .insert(Spinner::new(settings).with_pivot(pivot))
                .add_child(pivot);
        }
        TemplateVariant::Hopper(settings) => {
            commands.entity(id).insert((
                Hopper::new(settings),
                RigidBody::Dynamic,
                Collider::ball(template.radius),
                Velocity::default(),
                ExternalImpulse::default(),
            ));
        }
    }

    id
}
