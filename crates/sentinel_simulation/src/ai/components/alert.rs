//! Alert FSM components (alert level accumulator, state, behaviour activity)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::senses::EnemySenses;

/// Состояния врага
///
/// Idle / Caution / Alert выводятся из alert level по порогам.
/// Dead выставляется только снаружи (летальный урон) и terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Idle,
    Caution,
    Alert,
    Dead,
}

impl EnemyState {
    /// Состояние по уровню тревоги: <caution → Idle, [caution, alert) → Caution, ≥alert → Alert
    pub fn from_level(level: f32, senses: &EnemySenses) -> Self {
        if level >= senses.alert_threshold {
            EnemyState::Alert
        } else if level >= senses.caution_threshold {
            EnemyState::Caution
        } else {
            EnemyState::Idle
        }
    }

    /// Минимальный уровень тревоги, при котором состояние держится
    pub fn floor_level(self, senses: &EnemySenses) -> f32 {
        match self {
            EnemyState::Idle | EnemyState::Dead => 0.0,
            EnemyState::Caution => senses.caution_threshold,
            EnemyState::Alert => senses.alert_threshold,
        }
    }

    pub fn indicator(self) -> IndicatorColor {
        match self {
            EnemyState::Idle => IndicatorColor::Blue,
            EnemyState::Caution => IndicatorColor::Magenta,
            EnemyState::Alert => IndicatorColor::Red,
            EnemyState::Dead => IndicatorColor::Gray,
        }
    }
}

/// Цвет debug индикатора над головой врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum IndicatorColor {
    #[default]
    Blue,
    Magenta,
    Red,
    Gray,
}

/// Component: текущий цвет индикатора (читают UI / debug overlay)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct StateIndicator(pub IndicatorColor);

/// Component: уровень тревоги + состояние FSM
///
/// Инвариант: 0 ≤ level ≤ max_alert.
/// Снаружи (UI, audio) - только чтение через `state()` / `level()`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AlertState {
    state: EnemyState,
    level: f32,
    /// Вход в текущее состояние ещё не отыгран (спавн, re-enable)
    entry_pending: bool,
}

impl Default for AlertState {
    fn default() -> Self {
        Self {
            state: EnemyState::Idle,
            level: 0.0,
            entry_pending: true,
        }
    }
}

impl AlertState {
    /// Начальное состояние из конфига. Уровень поднимается до нижней границы
    /// состояния, иначе пороги сразу же вернули бы врага в Idle.
    pub fn new(initial: EnemyState, senses: &EnemySenses) -> Self {
        Self {
            state: initial,
            level: initial.floor_level(senses),
            entry_pending: initial != EnemyState::Dead,
        }
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    /// Прирост тревоги (clamp сверху). Мёртвые не тревожатся.
    pub fn raise(&mut self, amount: f32, max: f32) {
        if self.is_dead() {
            return;
        }
        self.level = (self.level + amount.max(0.0)).min(max);
    }

    pub fn set_level(&mut self, level: f32, max: f32) {
        if self.is_dead() {
            return;
        }
        self.level = level.clamp(0.0, max);
    }

    pub fn decay(&mut self, amount: f32) {
        if self.is_dead() {
            return;
        }
        self.level = (self.level - amount.max(0.0)).max(0.0);
    }

    /// Летальный урон. `true` если враг умер именно сейчас.
    pub fn force_dead(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.state = EnemyState::Dead;
        self.entry_pending = false;
        true
    }

    /// Нужно ли отыграть вход в состояние. Повтор того же состояния - `None`.
    pub fn pending_transition(&self, senses: &EnemySenses) -> Option<EnemyState> {
        if self.is_dead() {
            return None;
        }

        let target = EnemyState::from_level(self.level, senses);
        if target != self.state || self.entry_pending {
            Some(target)
        } else {
            None
        }
    }

    /// Фиксирует переход, возвращает предыдущее состояние
    pub fn commit(&mut self, target: EnemyState) -> EnemyState {
        let previous = self.state;
        self.state = target;
        self.entry_pending = false;
        previous
    }

    /// Повторно отыграть вход в текущее состояние на следующем тике
    pub fn request_reentry(&mut self) {
        if !self.is_dead() {
            self.entry_pending = true;
        }
    }
}

/// Component: что враг сейчас физически делает
///
/// FSM state говорит "насколько встревожен", Activity - "чем занят".
/// FollowingTrail - режим преследования по следам: скорость как в Alert,
/// EnemyState при этом не меняется.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum Activity {
    /// Стоит на месте (нет маршрута патруля)
    #[default]
    Holding,
    /// Обходит PatrolRoute
    Patrolling,
    /// Caution: идёт к случайной точке (`None` - точка ещё не найдена, retry каждый тик)
    Investigating { point: Option<Vec3> },
    /// Alert: прямое преследование цели
    Pursuing,
    /// Идёт по breadcrumb trail
    FollowingTrail,
    /// Dead
    Inert,
}
