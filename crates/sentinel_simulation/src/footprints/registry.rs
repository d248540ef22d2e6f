//! FootprintRegistry - упорядоченное множество живых следов игрока
//!
//! Единственная shared mutable структура симуляции.
//! Владеет следами целиком: остальные (BreadcrumbTrail) держат только значения
//! (id + позиция) и перепроверяют членство перед использованием.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Стабильный идентификатор следа (монотонный, не переиспользуется)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub struct FootprintId(pub u64);

/// След - immutable value
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Footprint {
    pub id: FootprintId,
    pub position: Vec3,
    /// Тик симуляции, на котором след появился
    pub created_at: u64,
}

impl Footprint {
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }
}

/// Живые следы в порядке вставки
#[derive(Resource, Debug, Default)]
pub struct FootprintRegistry {
    live: Vec<Footprint>,
    next_id: u64,
}

impl FootprintRegistry {
    /// Вставка без проверок toggle (проверки - в `Footprints::place`)
    pub fn insert(&mut self, position: Vec3, now: u64) -> Footprint {
        let footprint = Footprint {
            id: FootprintId(self.next_id),
            position,
            created_at: now,
        };
        self.next_id += 1;
        self.live.push(footprint);
        footprint
    }

    /// Удаление. Повторное удаление - no-op (`None`), не ошибка.
    pub fn remove(&mut self, id: FootprintId) -> Option<Footprint> {
        let index = self.live.iter().position(|footprint| footprint.id == id)?;
        Some(self.live.remove(index))
    }

    pub fn get(&self, id: FootprintId) -> Option<&Footprint> {
        self.live.iter().find(|footprint| footprint.id == id)
    }

    pub fn contains(&self, id: FootprintId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Footprint> {
        self.live.iter()
    }

    /// Следы, прожившие `lifetime` тиков и больше (oldest first)
    pub fn expired(&self, now: u64, lifetime: u64) -> Vec<FootprintId> {
        self.live
            .iter()
            .filter(|footprint| footprint.age(now) >= lifetime)
            .map(|footprint| footprint.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// Параметры жизненного цикла следов
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintSettings {
    /// Время жизни следа с момента появления (секунды)
    pub lifetime_secs: f32,
    /// Окно "следы включены" после контакта с мокрой/снежной поверхностью (секунды)
    pub enable_window_secs: f32,
}

impl Default for FootprintSettings {
    fn default() -> Self {
        Self {
            lifetime_secs: 20.0,
            enable_window_secs: 10.0,
        }
    }
}

impl FootprintSettings {
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(self.lifetime_secs > 0.0) {
            return Err(SetupError::settings("lifetime_secs must be positive"));
        }
        if !(self.enable_window_secs > 0.0) {
            return Err(SetupError::settings("enable_window_secs must be positive"));
        }
        Ok(())
    }
}

/// Глобальный флаг "следы сейчас оставляются"
///
/// Решение принимает внешний классификатор шагов:
/// - `set_enabled` - прямой override снаружи
/// - `restart_window` - контакт с подходящей поверхностью, окно перезапускается с нуля
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FootprintToggle {
    forced: bool,
    window_ends_at: Option<u64>,
}

impl FootprintToggle {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.forced = enabled;
        if !enabled {
            self.window_ends_at = None;
        }
    }

    pub fn restart_window(&mut self, now: u64, window_ticks: u64) {
        self.window_ends_at = Some(now + window_ticks);
    }

    pub fn is_enabled(&self, now: u64) -> bool {
        self.forced || self.window_ends_at.is_some_and(|end| now < end)
    }
}
