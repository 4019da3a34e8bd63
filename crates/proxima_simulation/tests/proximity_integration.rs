//! Proximity integration test
//!
//! Полный App (SimulationPlugin) headless, тики через step_simulation.
//!
//! Проверяем:
//! - Протокол регистрации (координатор появляется позже trackables)
//! - Nearest-wins + единственный active
//! - Hook ровно один раз на переход
//! - Lifecycle listener'а и trackables (remove / despawn / re-enable)

use bevy::color::LinearRgba;
use bevy::prelude::*;
use proxima_simulation::*;

/// Собранные за прогон события
#[derive(Resource, Default)]
struct Recorded {
    signals: Vec<ActivationSignal>,
    activated: Vec<Entity>,
    cues: Vec<FeedbackCue>,
}

impl Recorded {
    fn hook_count(&self, entity: Entity) -> usize {
        self.activated.iter().filter(|e| **e == entity).count()
    }

    fn signal_count(&self, entity: Entity, is_activated: bool) -> usize {
        self.signals
            .iter()
            .filter(|s| s.entity == entity && s.is_activated == is_activated)
            .count()
    }
}

fn record_events(
    mut recorded: ResMut<Recorded>,
    mut signals: EventReader<ActivationSignal>,
    mut activations: EventReader<TrackableActivated>,
    mut cues: EventReader<FeedbackCue>,
) {
    recorded.signals.extend(signals.read().cloned());
    recorded.activated.extend(activations.read().map(|a| a.entity));
    recorded.cues.extend(cues.read().cloned());
}

/// Helper: полный App + recorder после всех систем
fn create_proximity_app() -> App {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);
    app.init_resource::<Recorded>();
    app.add_systems(FixedUpdate, record_events.after(ActivationSystems));
    app
}

fn tick(app: &mut App, count: usize) {
    for _ in 0..count {
        step_simulation(app);
    }
}

/// Helper: listener с MotionSignal (как pilot, но без locomotion)
fn spawn_listener(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            ProximityListener,
            MotionSignal::default(),
        ))
        .id()
}

fn spawn_tracked(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            Trackable::new(LinearRgba::WHITE, LinearRgba::BLACK),
            VisualSurface::default(),
            ActivationCue::new("audio/ping.ogg"),
        ))
        .id()
}

fn move_to(app: &mut App, entity: Entity, position: Vec3) {
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(entity) {
        transform.translation = position;
    }
}

fn state(app: &App, entity: Entity) -> &TrackableState {
    app.world()
        .get::<TrackableState>(entity)
        .expect("trackable has state")
}

fn coordinator(app: &App) -> &ProximityCoordinator {
    app.world().resource::<ProximityCoordinator>()
}

/// Инвариант: максимум один activated, и он == coordinator.active()
fn check_single_active(app: &mut App, tick: usize) {
    let active = coordinator(app).active();
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &TrackableState)>();
    let activated: Vec<Entity> = query
        .iter(world)
        .filter(|(_, state)| state.is_activated())
        .map(|(entity, _)| entity)
        .collect();

    assert!(activated.len() <= 1, "Tick {}: activated = {:?}", tick, activated);
    assert_eq!(activated.first().copied(), active, "Tick {}: active out of sync", tick);
}

#[test]
fn test_registration_waits_for_coordinator() {
    let mut app = create_proximity_app();

    let far = spawn_tracked(&mut app, Vec3::new(3.0, 0.0, 0.0));
    let near = spawn_tracked(&mut app, Vec3::new(1.0, 0.0, 0.0));

    // Координатора нет — попытки регистрации проваливаются, без паники
    tick(&mut app, 10);
    assert!(!coordinator(&app).is_live());
    assert!(!state(&app, far).is_registered());
    assert!(!state(&app, near).is_registered());

    // Listener появился → регистрация на следующем тике сама
    spawn_listener(&mut app, Vec3::ZERO);
    tick(&mut app, 1);

    assert!(state(&app, far).is_registered());
    assert!(state(&app, near).is_registered());
    assert_eq!(coordinator(&app).active(), Some(near));
    assert!(state(&app, near).is_activated());
    assert!(!state(&app, far).is_activated());
}

#[test]
fn test_end_to_end_activation() {
    let mut app = create_proximity_app();
    let listener = spawn_listener(&mut app, Vec3::ZERO);

    let b = spawn_tracked(&mut app, Vec3::new(-5.0, 0.0, 0.0));
    tick(&mut app, 1);
    let a = spawn_tracked(&mut app, Vec3::new(10.0, 0.0, 0.0));
    tick(&mut app, 1);

    assert_eq!(coordinator(&app).active(), Some(b));
    {
        let recorded = app.world().resource::<Recorded>();
        assert_eq!(recorded.hook_count(b), 1);
        assert_eq!(recorded.hook_count(a), 0);
    }

    // Listener рядом с A (дистанция 2)
    move_to(&mut app, listener, Vec3::new(8.0, 0.0, 0.0));
    tick(&mut app, 1);

    assert_eq!(coordinator(&app).active(), Some(a));
    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.hook_count(a), 1);
    assert_eq!(recorded.hook_count(b), 1);
    assert_eq!(recorded.signal_count(b, false), 1);

    // Базовый hook: cue в позиции trackable на каждую активацию
    assert_eq!(recorded.cues.len(), 2);
    assert_eq!(recorded.cues[1].position, Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn test_stationary_listener_does_not_refire() {
    let mut app = create_proximity_app();
    spawn_listener(&mut app, Vec3::ZERO);
    let a = spawn_tracked(&mut app, Vec3::X);

    tick(&mut app, 100);

    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.hook_count(a), 1);
    assert_eq!(recorded.signal_count(a, true), 1);
}

#[test]
fn test_single_active_while_listener_wanders() {
    let mut app = create_proximity_app();
    let listener = spawn_listener(&mut app, Vec3::ZERO);

    for i in 0..8 {
        let angle = i as f32 * std::f32::consts::TAU / 8.0;
        spawn_tracked(&mut app, Vec3::new(angle.cos() * 5.0, 0.0, angle.sin() * 5.0));
    }

    for step in 0..400 {
        let angle = step as f32 * 0.05;
        move_to(&mut app, listener, Vec3::new(angle.cos() * 6.0, 0.0, angle.sin() * 6.0));
        tick(&mut app, 1);
        check_single_active(&mut app, step);
    }

    // Полный круг → каждый побывал active
    let recorded = app.world().resource::<Recorded>();
    assert!(recorded.activated.len() >= 8);
}

#[test]
fn test_duplicate_listener_rejected() {
    let mut app = create_proximity_app();
    let first = spawn_listener(&mut app, Vec3::ZERO);
    tick(&mut app, 1);

    let second = spawn_listener(&mut app, Vec3::new(50.0, 0.0, 0.0));
    tick(&mut app, 1);

    // Второй отключён, первый остался
    assert_eq!(coordinator(&app).listener(), Some(first));
    assert!(app.world().get::<ProximityListener>(second).is_none());

    let a = spawn_tracked(&mut app, Vec3::X);
    tick(&mut app, 2);
    assert_eq!(coordinator(&app).active(), Some(a));

    // Первый ушёл → экземпляра нет
    app.world_mut().despawn(first);
    tick(&mut app, 1);
    assert!(!coordinator(&app).is_live());

    // Второй включён заново → новое поколение, trackable перерегистрировался
    app.world_mut().entity_mut(second).insert(ProximityListener);
    tick(&mut app, 1);
    assert_eq!(coordinator(&app).listener(), Some(second));
    assert_eq!(state(&app, a).registration(), coordinator(&app).generation());
    assert!(coordinator(&app).contains(a));
}

#[test]
fn test_listener_replacement_keeps_single_active() {
    let mut app = create_proximity_app();
    let b = spawn_tracked(&mut app, Vec3::new(10.0, 0.0, 0.0));
    let a = spawn_tracked(&mut app, Vec3::X);
    let first = spawn_listener(&mut app, Vec3::ZERO);
    tick(&mut app, 2);
    assert_eq!(coordinator(&app).active(), Some(a));

    // Listener ушёл → active trackable гаснет вместе с экземпляром
    app.world_mut().despawn(first);
    tick(&mut app, 1);
    assert!(!coordinator(&app).is_live());
    assert!(!state(&app, a).is_activated());
    check_single_active(&mut app, 0);

    // Новый listener рядом с B: B перерегистрируется первым и побеждает
    spawn_listener(&mut app, Vec3::new(10.0, 0.0, 0.0));
    tick(&mut app, 1);

    assert_eq!(coordinator(&app).active(), Some(b));
    assert!(state(&app, b).is_activated());
    assert!(!state(&app, a).is_activated());
    check_single_active(&mut app, 1);
}

#[test]
fn test_removing_active_trackable_activates_next() {
    let mut app = create_proximity_app();
    spawn_listener(&mut app, Vec3::ZERO);
    let near = spawn_tracked(&mut app, Vec3::X);
    let far = spawn_tracked(&mut app, Vec3::X * 4.0);
    tick(&mut app, 1);
    assert_eq!(coordinator(&app).active(), Some(near));

    app.world_mut().entity_mut(near).remove::<Trackable>();
    tick(&mut app, 1);

    assert_eq!(coordinator(&app).active(), Some(far));
    assert!(!state(&app, near).is_registered());
    assert!(!state(&app, near).is_activated());
    check_single_active(&mut app, 0);
}

#[test]
fn test_despawned_trackable_is_released() {
    let mut app = create_proximity_app();
    spawn_listener(&mut app, Vec3::ZERO);
    let near = spawn_tracked(&mut app, Vec3::X);
    let far = spawn_tracked(&mut app, Vec3::X * 4.0);
    tick(&mut app, 1);

    app.world_mut().despawn(near);
    tick(&mut app, 1);

    assert!(!coordinator(&app).contains(near));
    assert_eq!(coordinator(&app).active(), Some(far));

    app.world_mut().despawn(far);
    tick(&mut app, 1);
    assert_eq!(coordinator(&app).active(), None);
    assert!(coordinator(&app).registered().is_empty());
}

#[test]
fn test_reenabled_trackable_runs_fresh_cycle() {
    let mut app = create_proximity_app();
    spawn_listener(&mut app, Vec3::ZERO);
    let a = spawn_tracked(&mut app, Vec3::X);
    tick(&mut app, 60);

    // Цвет успел уйти от default
    assert!(state(&app, a).current().red > 0.1);

    app.world_mut().entity_mut(a).remove::<Trackable>();
    tick(&mut app, 1);
    assert!(!coordinator(&app).contains(a));

    app.world_mut()
        .entity_mut(a)
        .insert(Trackable::new(LinearRgba::WHITE, LinearRgba::BLACK));
    tick(&mut app, 1);

    assert!(state(&app, a).is_registered());
    assert!(state(&app, a).is_activated());
    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.hook_count(a), 2);
}

#[test]
fn test_visual_surface_follows_state() {
    let mut app = create_proximity_app();
    spawn_listener(&mut app, Vec3::ZERO);
    let a = spawn_tracked(&mut app, Vec3::X);

    let mut previous = 0.0;
    for _ in 0..300 {
        tick(&mut app, 1);
        let surface = app.world().get::<VisualSurface>(a).expect("surface");
        assert_eq!(surface.color, state(&app, a).current());
        assert!(surface.color.red >= previous);
        previous = surface.color.red;
    }
    assert!(previous > 0.95);
}

#[test]
fn test_trackable_without_surface_still_interpolates() {
    let mut app = create_proximity_app();
    spawn_listener(&mut app, Vec3::ZERO);
    let bare = app
        .world_mut()
        .spawn((
            Transform::from_translation(Vec3::X),
            Trackable::new(LinearRgba::WHITE, LinearRgba::BLACK),
        ))
        .id();

    tick(&mut app, 30);

    assert!(state(&app, bare).is_activated());
    assert!(state(&app, bare).current().red > 0.0);
    // Без ActivationCue — cue не отправляется
    assert!(app.world().resource::<Recorded>().cues.is_empty());
}
