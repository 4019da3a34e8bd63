//! Activation module: реакция trackable на переход + per-tick анимация
//!
//! Hook = composition:
//! - play_activation_cue — базовое поведение (FeedbackCue)
//! - boost_spinners — Spinner вариант
//! - hop_on_activation — Hopper вариант
//!
//! Все читают один и тот же TrackableActivated, базовый hook первым.

use bevy::prelude::*;

use crate::proximity::ProximitySystems;

pub mod animation;
pub mod hooks;

#[cfg(test)]
mod animation_tests;

pub use animation::{spin_trackables, tween_trackable_colors};
pub use hooks::{boost_spinners, hop_on_activation, play_activation_cue};

/// Set activation систем (hooks + анимация)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivationSystems;

/// Activation Plugin
///
/// Порядок выполнения (после ProximitySystems):
/// 1. play_activation_cue — базовый hook
/// 2. boost_spinners, hop_on_activation — варианты
/// 3. tween_trackable_colors — tween цвета (каждый тик)
/// 4. spin_trackables — вращение Spinner (каждый тик)
pub struct ActivationPlugin;

impl Plugin for ActivationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: hooks (только на тиках с переходами)
                hooks::play_activation_cue,
                hooks::boost_spinners,
                hooks::hop_on_activation,
                // Фаза 2: анимация (каждый тик)
                animation::tween_trackable_colors,
                animation::spin_trackables,
            )
                .chain()
                .in_set(ActivationSystems)
                .after(ProximitySystems),
        );
    }
}
