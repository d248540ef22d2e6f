//! Footprint domain - следы игрока для преследования по "хлебным крошкам"
//!
//! Содержит:
//! - FootprintRegistry (живые следы, порядок вставки)
//! - FootprintToggle / FootprintSettings (окно включения, время жизни)
//! - FootprintEvent (Added / Removed уведомления для врагов)
//! - Footprints SystemParam (атомарные place / expire)

use bevy::prelude::*;

pub mod events;
pub mod registry;
pub mod systems;

#[cfg(test)]
mod registry_tests;

pub use events::*;
pub use registry::*;
pub use systems::*;

use crate::SimulationSet;

/// Footprint Plugin
///
/// Порядок внутри SimulationSet::Footprints:
/// 1. handle_terrain_contacts - окно включения
/// 2. handle_footsteps - новые следы
/// 3. expire_footprints - удаление по lifetime
pub struct FootprintPlugin;

impl Plugin for FootprintPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FootprintEvent>()
            .add_event::<FootstepEvent>()
            .add_event::<TerrainContact>()
            .init_resource::<FootprintRegistry>()
            .init_resource::<FootprintToggle>()
            .init_resource::<FootprintSettings>();

        app.add_systems(
            FixedUpdate,
            (handle_terrain_contacts, handle_footsteps, expire_footprints)
                .chain()
                .in_set(SimulationSet::Footprints),
        );
    }
}
