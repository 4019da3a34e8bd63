//! ECS Components для proximity симуляции
//!
//! Организация по доменам:
//! - trackable: proximity-reactive объекты (Trackable, TrackableState, VisualSurface, ActivationCue)
//! - proximity: reference point и детектор движения (ProximityListener, MotionSignal)
//! - variants: дополнительные activation эффекты (Spinner, Hopper)
//! - pilot: player-controlled observer (Pilot, PilotInput, PilotGait)
//! - world: headless spatial volumes (Blocker)

pub mod trackable;
pub mod proximity;
pub mod variants;
pub mod pilot;
pub mod world;

// Re-exports для удобного импорта
pub use trackable::*;
pub use proximity::*;
pub use variants::*;
pub use pilot::*;
pub use world::*;
