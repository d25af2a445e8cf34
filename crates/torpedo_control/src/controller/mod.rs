//! Firing controller — выбор bay и failover между двумя torpedo stores.
//!
//! SINGLE: один bay за вызов, чередование primary/secondary.
//! - Пустой preferred bay → fallback на другой.
//! - Misfire preferred bay → сразу `false`, другой bay НЕ трогаем.
//!
//! ALL: оба bay независимо, без early exit. Успех = оба реально выстрелили
//! (пустой bay считается неудачей — торпеда из этого аппарата не вышла).
//!
//! Alternation state двигают только SINGLE вызовы. ALL его не меняет.
//!
//! Контроллер не thread-safe сам по себе: `&mut self` на весь цикл
//! check-then-fire. В ECS сериализацию даёт `Query<&mut Starship>`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::store::TorpedoStore;


/// Сколько торпед уходит из bay за один выстрел
pub const TORPEDOS_PER_SHOT: u32 = 1;

/// Режим стрельбы (передаётся на каждый вызов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum FiringMode {
    /// Один bay, чередование
    Single,
    /// Оба bay одновременно
    All,
}

/// Какой из двух stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum Bay {
    Primary,
    Secondary,
}

impl Bay {
    pub fn other(self) -> Self {
        match self {
            Bay::Primary => Bay::Secondary,
            Bay::Secondary => Bay::Primary,
        }
    }
}

/// Память контроллера о последнем SINGLE выстреле
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum AlternationState {
    /// Ещё не стреляли (preferred = primary)
    #[default]
    NoneFiredYet,
    LastFiredPrimary,
    LastFiredSecondary,
}

impl AlternationState {
    /// Bay, который должен стрелять следующим в SINGLE
    pub fn preferred(self) -> Bay {
        match self {
            AlternationState::NoneFiredYet => Bay::Primary,
            AlternationState::LastFiredPrimary => Bay::Secondary,
            AlternationState::LastFiredSecondary => Bay::Primary,
        }
    }

    fn after_attempt(bay: Bay) -> Self {
        match bay {
            Bay::Primary => AlternationState::LastFiredPrimary,
            Bay::Secondary => AlternationState::LastFiredSecondary,
        }
    }
}

/// Результат обращения к одному bay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum BayOutcome {
    /// Торпеда ушла
    Fired,
    /// Bay не пуст, но `fire` вернул false
    Misfired,
    /// Bay пуст, `fire` не вызывался
    Empty,
}

/// Детальный отчёт о вызове `fire`
///
/// `None` = bay в этом вызове вообще не опрашивался.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub struct FireReport {
    pub mode: FiringMode,
    pub primary: Option<BayOutcome>,
    pub secondary: Option<BayOutcome>,
}

impl FireReport {
    /// Булев контракт `fire_torpedo`
    pub fn success(&self) -> bool {
        match self.mode {
            FiringMode::Single => {
                self.primary == Some(BayOutcome::Fired) || self.secondary == Some(BayOutcome::Fired)
            }
            FiringMode::All => {
                self.primary == Some(BayOutcome::Fired) && self.secondary == Some(BayOutcome::Fired)
            }
        }
    }

    pub fn torpedoes_launched(&self) -> u32 {
        [self.primary, self.secondary]
            .iter()
            .filter(|outcome| **outcome == Some(BayOutcome::Fired))
            .count() as u32
            * TORPEDOS_PER_SHOT
    }

    pub fn outcome(&self, bay: Bay) -> Option<BayOutcome> {
        match bay {
            Bay::Primary => self.primary,
            Bay::Secondary => self.secondary,
        }
    }

    fn set(&mut self, bay: Bay, outcome: BayOutcome) {
        match bay {
            Bay::Primary => self.primary = Some(outcome),
            Bay::Secondary => self.secondary = Some(outcome),
        }
    }
}

/// Корабль с торпедным вооружением (caller-facing контракт)
pub trait SpaceShip {
    fn fire_torpedo(&mut self, mode: FiringMode) -> bool;
}

/// Firing controller: два store + alternation state
///
/// Stores фиксированы на всё время жизни контроллера.
#[derive(Debug, Clone)]
pub struct FiringController<P, S> {
    primary: P,
    secondary: S,
    alternation: AlternationState,
}

impl<P: TorpedoStore, S: TorpedoStore> FiringController<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary,
            alternation: AlternationState::NoneFiredYet,
        }
    }

    pub fn alternation(&self) -> AlternationState {
        self.alternation
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }

    pub fn into_stores(self) -> (P, S) {
        (self.primary, self.secondary)
    }

    /// Выстрел с детальным отчётом по каждому bay
    pub fn fire(&mut self, mode: FiringMode) -> FireReport {
        let report = match mode {
            FiringMode::Single => self.fire_single(),
            FiringMode::All => self.fire_all(),
        };

        crate::logger::log(&format!(
            "FiringController: {:?} → primary={:?} secondary={:?} success={}",
            mode,
            report.primary,
            report.secondary,
            report.success()
        ));

        report
    }

    fn fire_single(&mut self) -> FireReport {
        let mut report = FireReport {
            mode: FiringMode::Single,
            primary: None,
            secondary: None,
        };

        let preferred = self.alternation.preferred();

        // Preferred bay пуст → fallback; оба пусты → ни одного fire
        let chosen = if !self.is_empty(preferred) {
            preferred
        } else {
            report.set(preferred, BayOutcome::Empty);

            let fallback = preferred.other();
            if self.is_empty(fallback) {
                report.set(fallback, BayOutcome::Empty);
                crate::logger::log_warning("FiringController: both torpedo stores are empty");
                return report;
            }
            fallback
        };

        // Ход засчитан даже при misfire — повторной попытки в этом вызове нет
        self.alternation = AlternationState::after_attempt(chosen);

        let outcome = self.discharge(chosen);
        report.set(chosen, outcome);
        report
    }

    fn fire_all(&mut self) -> FireReport {
        let primary = self.check_and_discharge(Bay::Primary);
        let secondary = self.check_and_discharge(Bay::Secondary);

        FireReport {
            mode: FiringMode::All,
            primary: Some(primary),
            secondary: Some(secondary),
        }
    }

    fn check_and_discharge(&mut self, bay: Bay) -> BayOutcome {
        if self.is_empty(bay) {
            BayOutcome::Empty
        } else {
            self.discharge(bay)
        }
    }

    fn discharge(&mut self, bay: Bay) -> BayOutcome {
        let fired = match bay {
            Bay::Primary => self.primary.fire(TORPEDOS_PER_SHOT),
            Bay::Secondary => self.secondary.fire(TORPEDOS_PER_SHOT),
        };

        if fired {
            BayOutcome::Fired
        } else {
            crate::logger::log_warning(&format!("FiringController: {:?} bay misfired", bay));
            BayOutcome::Misfired
        }
    }

    fn is_empty(&self, bay: Bay) -> bool {
        match bay {
            Bay::Primary => self.primary.is_empty(),
            Bay::Secondary => self.secondary.is_empty(),
        }
    }
}

impl<P: TorpedoStore, S: TorpedoStore> SpaceShip for FiringController<P, S> {
    fn fire_torpedo(&mut self, mode: FiringMode) -> bool {
        self.fire(mode).success()
    }
}
