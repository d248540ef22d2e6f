//! Footprint systems: placement, expiry, enable window

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::clock::SimClock;

use super::events::{FootprintEvent, FootstepEvent, TerrainContact};
use super::registry::{FootprintId, FootprintRegistry, FootprintSettings, FootprintToggle};

/// SystemParam: единственная точка мутации FootprintRegistry
///
/// `place` / `expire` атомарны относительно broadcast: мутация и событие
/// происходят в одном вызове внутри одной системы.
#[derive(SystemParam)]
pub struct Footprints<'w> {
    registry: ResMut<'w, FootprintRegistry>,
    toggle: Res<'w, FootprintToggle>,
    clock: Res<'w, SimClock>,
    events: EventWriter<'w, FootprintEvent>,
}

impl Footprints<'_> {
    /// Новый след. `None` если следы сейчас выключены (no-op).
    pub fn place(&mut self, position: Vec3) -> Option<FootprintId> {
        if !self.toggle.is_enabled(self.clock.tick) {
            return None;
        }

        let footprint = self.registry.insert(position, self.clock.tick);
        self.events.write(FootprintEvent::Added(footprint));
        crate::log(&format!(
            "👣 Footprint {:?} placed at {:?} (tick {})",
            footprint.id, footprint.position, footprint.created_at
        ));
        Some(footprint.id)
    }

    /// Удаление следа + уведомление. Уже удалённый id - no-op (false).
    pub fn expire(&mut self, id: FootprintId) -> bool {
        let Some(footprint) = self.registry.remove(id) else {
            return false;
        };

        self.events.write(FootprintEvent::Removed(footprint));
        crate::log(&format!("🫧 Footprint {:?} expired", footprint.id));
        true
    }

    /// Удаляет все следы возрастом >= lifetime тиков. Возвращает количество удалённых.
    pub fn expire_older_than(&mut self, lifetime_ticks: u64) -> usize {
        let expired = self.registry.expired(self.clock.tick, lifetime_ticks);
        expired.into_iter().filter(|id| self.expire(*id)).count()
    }
}

/// System: контакт с "мокрой" поверхностью → перезапуск окна следов
pub fn handle_terrain_contacts(
    mut contacts: EventReader<TerrainContact>,
    mut toggle: ResMut<FootprintToggle>,
    settings: Res<FootprintSettings>,
    clock: Res<SimClock>,
) {
    // Несколько контактов за тик = один перезапуск
    if contacts.read().count() == 0 {
        return;
    }

    let window = clock.secs_to_ticks(settings.enable_window_secs);
    toggle.restart_window(clock.tick, window);
}

/// System: шаги игрока → новые следы (если включены)
pub fn handle_footsteps(mut footsteps: EventReader<FootstepEvent>, mut footprints: Footprints) {
    for step in footsteps.read() {
        footprints.place(step.position);
    }
}

/// System: следы старше lifetime удаляются (с уведомлением)
pub fn expire_footprints(mut footprints: Footprints, settings: Res<FootprintSettings>) {
    let lifetime = footprints.clock.secs_to_ticks(settings.lifetime_secs);
    footprints.expire_older_than(lifetime);
}
