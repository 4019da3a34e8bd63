//! Activation hooks
//!
//! TrackableActivated поднимается ровно один раз на переход в Activated.
//! Базовый hook (cue) выполняется первым, варианты — после него.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, Velocity};

use crate::components::{ActivationCue, Hopper, Spinner};
use crate::logger;
use crate::proximity::{FeedbackCue, TrackableActivated};
use crate::spatial::SpatialProbe;

/// System: базовый hook — one-shot cue в позиции trackable
///
/// Trackable без ActivationCue — эффект пропускается.
pub fn play_activation_cue(
    mut activations: EventReader<TrackableActivated>,
    cues: Query<&ActivationCue>,
    mut feedback: EventWriter<FeedbackCue>,
) {
    for activation in activations.read() {
        logger::log(&format!("Trackable {:?} activated", activation.entity));

        let Ok(cue) = cues.get(activation.entity) else {
            continue;
        };
        feedback.write(FeedbackCue {
            clip: cue.clip.clone(),
            position: activation.position,
        });
    }
}

/// System: Spinner — разгон вращения при активации
pub fn boost_spinners(
    mut activations: EventReader<TrackableActivated>,
    mut spinners: Query<&mut Spinner>,
) {
    for activation in activations.read() {
        if let Ok(mut spinner) = spinners.get_mut(activation.entity) {
            spinner.boost();
        }
    }
}

/// System: Hopper — прыжок на месте при активации
///
/// 1. Сбрасываем velocity (если rapier body есть)
/// 2. Ray вниз на probe_distance: опоры нет → не прыгаем
/// 3. Вертикальный impulse через ExternalImpulse
pub fn hop_on_activation(
    mut activations: EventReader<TrackableActivated>,
    mut hoppers: Query<(&Hopper, &Transform, Option<&mut Velocity>, Option<&mut ExternalImpulse>)>,
    probe: SpatialProbe,
) {
    for activation in activations.read() {
        let Ok((hopper, transform, velocity, impulse)) = hoppers.get_mut(activation.entity) else {
            continue;
        };

        // Без physics body прыгать нечем
        let Some(mut velocity) = velocity else {
            continue;
        };
        velocity.linvel = Vec3::ZERO;
        velocity.angvel = Vec3::ZERO;

        if !probe.has_surface_below(transform.translation, hopper.probe_distance, activation.entity) {
            logger::log(&format!("Hopper {:?} airborne, hop skipped", activation.entity));
            continue;
        }

        if let Some(mut impulse) = impulse {
            impulse.impulse += Vec3::Y * hopper.impulse;
        }
    }
}
