//! Starship ECS layer — команды на стрельбу и отчёты о залпах.
//!
//! Поток:
//! 1. Caller пишет `FireTorpedoCommand { ship, mode }`
//! 2. `process_fire_commands` стреляет контроллером корабля (по одной команде за раз)
//! 3. На каждую команду — ровно один `TorpedoVolley` с отчётом
//!
//! Доступ к контроллеру только через `Query<&mut Starship>` — конкурентной
//! стрельбы по одному кораблю в ECS не бывает.

use bevy::prelude::*;

use crate::config::ArsenalConfig;
use crate::controller::{FireReport, FiringController, FiringMode, SpaceShip};
use crate::store::TorpedoBay;


/// Корабль с двумя torpedo bays
#[derive(Component, Debug)]
pub struct Starship {
    pub name: String,
    controller: FiringController<TorpedoBay, TorpedoBay>,
}

impl Starship {
    pub fn new(name: impl Into<String>, primary: TorpedoBay, secondary: TorpedoBay) -> Self {
        Self {
            name: name.into(),
            controller: FiringController::new(primary, secondary),
        }
    }

    /// Собрать корабль из config (secondary seed = seed + 1, чтобы bays не misfire синхронно)
    pub fn from_config(config: &ArsenalConfig) -> Self {
        let primary =
            TorpedoBay::with_failure_rate(config.primary_torpedoes, config.failure_rate, config.seed);
        let secondary = TorpedoBay::with_failure_rate(
            config.secondary_torpedoes,
            config.failure_rate,
            config.seed.wrapping_add(1),
        );

        Self::new(config.ship_name.clone(), primary, secondary)
    }

    pub fn fire(&mut self, mode: FiringMode) -> FireReport {
        self.controller.fire(mode)
    }

    pub fn controller(&self) -> &FiringController<TorpedoBay, TorpedoBay> {
        &self.controller
    }

    /// Оставшиеся торпеды (primary, secondary)
    pub fn torpedoes_left(&self) -> (u32, u32) {
        (
            self.controller.primary().torpedo_count(),
            self.controller.secondary().torpedo_count(),
        )
    }
}

impl SpaceShip for Starship {
    fn fire_torpedo(&mut self, mode: FiringMode) -> bool {
        self.controller.fire_torpedo(mode)
    }
}

/// Event: приказ на стрельбу (caller → ECS)
#[derive(Event, Debug, Clone, Copy)]
pub struct FireTorpedoCommand {
    pub ship: Entity,
    pub mode: FiringMode,
}

/// Event: результат команды (ECS → caller)
#[derive(Event, Debug, Clone, Copy)]
pub struct TorpedoVolley {
    pub ship: Entity,
    /// Итог команды: `report.success()`
    pub report: FireReport,
}

/// System: обработка FireTorpedoCommand в порядке поступления
pub fn process_fire_commands(
    mut commands: EventReader<FireTorpedoCommand>,
    mut ships: Query<&mut Starship>,
    mut volleys: EventWriter<TorpedoVolley>,
) {
    for command in commands.read() {
        let Ok(mut ship) = ships.get_mut(command.ship) else {
            crate::logger::log_warning(&format!(
                "FireTorpedoCommand for {:?} dropped: entity has no Starship",
                command.ship
            ));
            continue;
        };

        let report = ship.fire(command.mode);

        let (primary_left, secondary_left) = ship.torpedoes_left();
        crate::logger::log_info(&format!(
            "🚀 {} fired {:?}: success={} launched={} (left: {}/{})",
            ship.name,
            command.mode,
            report.success(),
            report.torpedoes_launched(),
            primary_left,
            secondary_left
        ));

        volleys.write(TorpedoVolley {
            ship: command.ship,
            report,
        });
    }
}

/// Helper: spawn корабля из config
pub fn spawn_starship(commands: &mut Commands, config: &ArsenalConfig) -> Entity {
    commands.spawn(Starship::from_config(config)).id()
}
