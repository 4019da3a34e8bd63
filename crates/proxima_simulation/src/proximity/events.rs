//! Proximity events

use bevy::prelude::*;

/// Event: MotionSignal зафиксировал изменение pose
///
/// Генерируется: detect_motion (один раз за тик на signal).
/// Обрабатывается: relay_motion → ProximityCoordinator::report_motion.
#[derive(Event, Debug, Clone)]
pub struct MotionDetected {
    pub source: Entity,
}

/// Event: координатор отправил SetActivationState
///
/// Отправляется на КАЖДЫЙ вызов (включая no-op повторы),
/// для диагностики и тестов.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ActivationSignal {
    pub entity: Entity,
    pub is_activated: bool,
}

/// Event: trackable перешёл в Activated — activation hook
///
/// Ровно один раз на переход (не каждый тик).
/// Обрабатывается базовым hook'ом (FeedbackCue) и вариантами (Spinner, Hopper).
#[derive(Event, Debug, Clone)]
pub struct TrackableActivated {
    pub entity: Entity,
    pub position: Vec3,
}

/// Event: one-shot feedback cue (звук, эффект) в точке мира
///
/// Fire-and-forget: симуляция не ждёт и не наблюдает результат.
/// Проигрывание — забота движка.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct FeedbackCue {
    pub clip: String,
    pub position: Vec3,
}
