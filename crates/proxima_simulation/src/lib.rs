//! PROXIMA Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: proximity-activation координатор.
//! Ровно один ближайший к pilot'у trackable активен, остальные — нет.
//!
//! Архитектура:
//! - ECS = registry, переходы активации, tween состояния, pilot/spawn логика
//! - Хост (движок) = рендер VisualSurface, звук FeedbackCue, физика rapier, input

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod activation;
pub mod components;
pub mod logger;
pub mod pilot;
pub mod proximity;
pub mod spatial;

// Re-export базовых типов для удобства
pub use activation::{ActivationPlugin, ActivationSystems};
pub use components::*;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter,
    LOGGER_LEVEL,
};
pub use pilot::{spawn_pilot, spawn_trackable, PilotPlugin, SpawnTemplates, TemplateVariant, TrackableTemplate};
pub use proximity::{
    ActivationSignal, CoordinatorError, CoordinatorGeneration, FeedbackCue, MotionDetected, ProximityConfig,
    ProximityCoordinator, ProximityPlugin, ProximitySystems, TrackableActivated,
};
pub use spatial::{GroundPlane, SpatialProbe};

/// Частота simulation tick
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed из create_headless_app не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // Пол для headless SpatialProbe (общий для pilot и activation)
            .init_resource::<GroundPlane>()
            // Подсистемы: pilot → proximity → activation
            .add_plugins((PilotPlugin, ProximityPlugin, ActivationPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

    app
}

/// Один simulation tick: FixedUpdate напрямую, без накопления real time
///
/// Headless хосты и тесты шагают детерминированно, независимо от wall clock.
pub fn step_simulation(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
