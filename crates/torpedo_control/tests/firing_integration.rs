//! Firing integration test
//!
//! Headless App: FireTorpedoCommand → process_fire_commands → TorpedoVolley
//!
//! Проверяем:
//! - Одна команда = один volley, порядок сохраняется
//! - Чередование bays и failover через ECS слой
//! - Команды на несуществующий корабль отбрасываются

use bevy::prelude::*;
use torpedo_control::*;

/// Собирает все TorpedoVolley для проверок
#[derive(Resource, Default)]
struct VolleyLog(Vec<TorpedoVolley>);

fn collect_volleys(mut volleys: EventReader<TorpedoVolley>, mut log: ResMut<VolleyLog>) {
    log.0.extend(volleys.read().copied());
}

/// Helper: App с ArsenalPlugin + сборщиком volleys
fn create_arsenal_app(config: ArsenalConfig) -> App {
    let mut app = create_headless_app(config.seed);
    app.insert_resource(config)
        .init_resource::<VolleyLog>()
        .add_plugins(ArsenalPlugin)
        .add_systems(Update, collect_volleys.after(process_fire_commands));

    app
}

/// Helper: spawn корабля через Commands (как в игре) + update для применения
fn spawn_ship(app: &mut App) -> Entity {
    let config = app.world().resource::<ArsenalConfig>().clone();
    let ship = spawn_starship(&mut app.world_mut().commands(), &config);
    app.update();
    ship
}

fn fire(app: &mut App, ship: Entity, mode: FiringMode) {
    app.world_mut().send_event(FireTorpedoCommand { ship, mode });
    app.update();
}

fn volleys(app: &App) -> &[TorpedoVolley] {
    &app.world().resource::<VolleyLog>().0
}

#[test]
fn test_single_commands_alternate_bays() {
    let mut app = create_arsenal_app(ArsenalConfig::default());
    let ship = spawn_ship(&mut app);

    for _ in 0..4 {
        fire(&mut app, ship, FiringMode::Single);
    }

    let log = volleys(&app);
    assert_eq!(log.len(), 4);
    assert!(log.iter().all(|volley| volley.report.success() && volley.ship == ship));

    let bays: Vec<_> = log
        .iter()
        .map(|volley| {
            if volley.report.primary == Some(BayOutcome::Fired) {
                Bay::Primary
            } else {
                Bay::Secondary
            }
        })
        .collect();
    assert_eq!(bays, vec![Bay::Primary, Bay::Secondary, Bay::Primary, Bay::Secondary]);

    let starship = app.world().get::<Starship>(ship).expect("ship exists");
    assert_eq!(starship.torpedoes_left(), (8, 8));
}

#[test]
fn test_commands_in_one_frame_keep_order() {
    let mut app = create_arsenal_app(ArsenalConfig {
        primary_torpedoes: 1,
        secondary_torpedoes: 1,
        ..Default::default()
    });
    let ship = spawn_ship(&mut app);

    app.world_mut().send_event(FireTorpedoCommand { ship, mode: FiringMode::Single });
    app.world_mut().send_event(FireTorpedoCommand { ship, mode: FiringMode::Single });
    app.world_mut().send_event(FireTorpedoCommand { ship, mode: FiringMode::Single });
    app.update();

    let results: Vec<_> = volleys(&app).iter().map(|volley| volley.report.success()).collect();
    assert_eq!(results, vec![true, true, false]);
}

#[test]
fn test_salvo_then_failover() {
    let mut app = create_arsenal_app(ArsenalConfig {
        primary_torpedoes: 1,
        secondary_torpedoes: 3,
        ..Default::default()
    });
    let ship = spawn_ship(&mut app);

    fire(&mut app, ship, FiringMode::All);
    fire(&mut app, ship, FiringMode::Single);
    fire(&mut app, ship, FiringMode::All);

    let log = volleys(&app);
    assert_eq!(log.len(), 3);

    // Залп из полных bays
    assert!(log[0].report.success());
    assert_eq!(log[0].report.torpedoes_launched(), 2);

    // Primary пуст → SINGLE уходит на secondary
    assert!(log[1].report.success());
    assert_eq!(log[1].report.primary, Some(BayOutcome::Empty));
    assert_eq!(log[1].report.secondary, Some(BayOutcome::Fired));

    // Неполный залп = failure, но secondary всё равно выстрелил
    assert!(!log[2].report.success());
    assert_eq!(log[2].report.torpedoes_launched(), 1);

    let starship = app.world().get::<Starship>(ship).expect("ship exists");
    assert_eq!(starship.torpedoes_left(), (0, 0));
}

#[test]
fn test_command_for_missing_ship_is_dropped() {
    let mut app = create_arsenal_app(ArsenalConfig::default());
    let not_a_ship = app.world_mut().spawn_empty().id();

    fire(&mut app, not_a_ship, FiringMode::Single);

    assert!(volleys(&app).is_empty());
}

#[test]
fn test_misfiring_ship_reports_failure() {
    let mut app = create_arsenal_app(ArsenalConfig {
        failure_rate: 1.0,
        ..Default::default()
    });
    let ship = spawn_ship(&mut app);

    fire(&mut app, ship, FiringMode::Single);
    fire(&mut app, ship, FiringMode::Single);

    let log = volleys(&app);
    assert_eq!(log.len(), 2);
    assert!(log.iter().all(|volley| !volley.report.success()));

    // Misfire не отдаёт ход другому bay в том же вызове
    assert_eq!(log[0].report.primary, Some(BayOutcome::Misfired));
    assert_eq!(log[0].report.secondary, None);
    assert_eq!(log[1].report.secondary, Some(BayOutcome::Misfired));
    assert_eq!(log[1].report.primary, None);
}
