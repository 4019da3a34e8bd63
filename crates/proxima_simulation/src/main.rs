//! Headless симуляция PROXIMA
//!
//! Pilot бродит по сцене со случайным (seeded) input, периодически спавнит
//! trackables. Лог показывает смену активного объекта.

use bevy::prelude::*;
use rand::Rng;
use proxima_simulation::{
    create_headless_app, log_info, spawn_pilot, step_simulation, DeterministicRng, PilotInput,
    ProximityCoordinator, SimulationPlugin, SpawnKind,
};

const TICKS: usize = 3600; // 60 sec при 60Hz

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    log_info(&format!("Starting PROXIMA headless simulation (seed: {})", seed));

    let pilot = spawn_pilot(&mut app.world_mut().commands(), Vec3::ZERO);
    app.world_mut().flush();

    let mut last_active = None;
    for tick in 0..TICKS {
        // Каждые 30 тиков — новый input
        if tick % 30 == 0 {
            let input = scripted_input(app.world_mut(), tick);
            if let Some(mut pilot_input) = app.world_mut().get_mut::<PilotInput>(pilot) {
                *pilot_input = input;
            }
        }

        step_simulation(&mut app);

        let coordinator = app.world().resource::<ProximityCoordinator>();
        let active = coordinator.active();
        if active != last_active {
            log_info(&format!(
                "Tick {}: active {:?} (registered: {})",
                tick,
                active,
                coordinator.registered().len()
            ));
            last_active = active;
        }
    }

    log_info("Simulation complete!");
}

/// Случайный input из DeterministicRng (воспроизводим по seed)
fn scripted_input(world: &mut World, tick: usize) -> PilotInput {
    let mut rng = world.resource_mut::<DeterministicRng>();

    let spawn = match tick % 240 {
        0 => Some(SpawnKind::Spinner),
        120 => Some(SpawnKind::Hopper),
        _ => None,
    };

    PilotInput {
        throttle: rng.rng.gen_range(-1..=1) as f32,
        turn: rng.rng.gen_range(-1.0..1.0),
        spawn,
    }
}
