//! Footprint events - входящие от footstep классификатора и исходящие уведомления registry

use bevy::prelude::*;

use super::registry::Footprint;

/// Уведомления registry для подписчиков (враги с BreadcrumbTrail)
///
/// Пишутся в той же операции, что и мутация registry:
/// подписчик никогда не видит insert/remove без события и наоборот.
/// Порядок доставки между подписчиками не гарантируется.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum FootprintEvent {
    Added(Footprint),
    Removed(Footprint),
}

impl FootprintEvent {
    pub fn footprint(&self) -> &Footprint {
        match self {
            FootprintEvent::Added(footprint) | FootprintEvent::Removed(footprint) => footprint,
        }
    }
}

/// Шаг игрока: нога коснулась земли (animation event в движке)
#[derive(Event, Debug, Clone, Copy)]
pub struct FootstepEvent {
    pub position: Vec3,
}

/// Контакт с поверхностью, оставляющей следы (вода, снег, грязь)
///
/// Перезапускает окно FootprintToggle.
#[derive(Event, Debug, Clone, Copy)]
pub struct TerrainContact {
    pub position: Vec3,
}
