//! GT4500 Torpedo Control
//!
//! Weapons controller корабля: два torpedo bays (primary/secondary),
//! режимы SINGLE (чередование + failover на пустой bay) и ALL (залп из обоих).
//!
//! Слои:
//! - `controller` — логика выбора bay (без systems/queries, работает и вне App)
//! - `store` — capability trait + конкретный TorpedoBay
//! - `ship` — ECS surface (Starship component, command/volley events)

use bevy::prelude::*;

// Публичные модули
pub mod config;
pub mod controller;
pub mod logger;
pub mod ship;
pub mod store;

// Re-export основных типов
pub use config::{ArsenalConfig, ConfigError};
pub use controller::{
    AlternationState, Bay, BayOutcome, FireReport, FiringController, FiringMode, SpaceShip,
    TORPEDOS_PER_SHOT,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use ship::{process_fire_commands, spawn_starship, FireTorpedoCommand, Starship, TorpedoVolley};
pub use store::{TorpedoBay, TorpedoStore};

/// Главный plugin (events + fire command system)
pub struct ArsenalPlugin;

impl Plugin for ArsenalPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireTorpedoCommand>()
            .add_event::<TorpedoVolley>()
            .init_resource::<ArsenalConfig>()
            // Update, не FixedUpdate: команда обрабатывается в том же кадре, где пришла
            .add_systems(Update, process_fire_commands);
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// `seed` уходит в ArsenalConfig → RNG bays кораблей, заспавненных из config.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(ArsenalConfig {
            seed,
            ..Default::default()
        });

    app
}
