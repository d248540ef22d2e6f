//! AI Events - сигналы от damage/health сервиса и уведомления для UI/audio

use bevy::prelude::*;

use super::components::EnemyState;

/// Сигналы damage/health сервиса
///
/// - Hit: врага ударили/подстрелили → тревога сразу на максимум
/// - Lethal: здоровье ушло в 0 → Dead (terminal)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSignal {
    Hit { enemy: Entity },
    Lethal { enemy: Entity },
}

/// Смена состояния FSM (для debug overlay, audio cues)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertStateChanged {
    pub enemy: Entity,
    pub from: EnemyState,
    pub to: EnemyState,
}
