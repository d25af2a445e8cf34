//! Headless прогон GT4500
//!
//! Спавнит корабль из config (путь первым аргументом, иначе defaults),
//! отдаёт фиксированный сценарий команд и логирует каждый залп.

use bevy::prelude::*;
use torpedo_control::{
    create_headless_app, log_error, log_info, spawn_starship, ArsenalConfig, ArsenalPlugin,
    FireTorpedoCommand, FiringMode, Starship, TorpedoVolley,
};

/// Сценарий: серия одиночных, залп, снова одиночные до опустошения
const SCRIPT: [FiringMode; 8] = [
    FiringMode::Single,
    FiringMode::Single,
    FiringMode::Single,
    FiringMode::All,
    FiringMode::Single,
    FiringMode::All,
    FiringMode::Single,
    FiringMode::Single,
];

#[derive(Resource, Default)]
struct VolleyTally {
    fired: u32,
    failed: u32,
}

fn tally_volleys(mut volleys: EventReader<TorpedoVolley>, mut tally: ResMut<VolleyTally>) {
    for volley in volleys.read() {
        if volley.report.success() {
            tally.fired += 1;
        } else {
            tally.failed += 1;
        }
    }
}

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match ArsenalConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("{}", err));
                std::process::exit(1);
            }
        },
        None => ArsenalConfig::default(),
    }
    .with_env_overrides();

    let mut app = create_headless_app(config.seed);
    app.insert_resource(config.clone())
        .init_resource::<VolleyTally>()
        .add_plugins(ArsenalPlugin)
        .add_systems(Update, tally_volleys.after(torpedo_control::process_fire_commands));

    log_info(&format!(
        "Starting {} (torpedoes {}/{}, failure rate {}, seed {})",
        config.ship_name,
        config.primary_torpedoes,
        config.secondary_torpedoes,
        config.failure_rate,
        config.seed
    ));

    let ship = spawn_starship(&mut app.world_mut().commands(), &config);
    // Первый update применяет spawn
    app.update();

    for mode in SCRIPT {
        app.world_mut().send_event(FireTorpedoCommand { ship, mode });
        app.update();
    }

    let tally = app.world().resource::<VolleyTally>();
    let left = app
        .world()
        .get::<Starship>(ship)
        .map(|starship| starship.torpedoes_left())
        .unwrap_or_default();

    log_info(&format!(
        "Run complete: {} successful, {} failed, torpedoes left {}/{}",
        tally.fired, tally.failed, left.0, left.1
    ));
}
