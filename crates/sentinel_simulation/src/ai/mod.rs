//! AI decision-making module
//!
//! Perception (зрение + следы) → alert level → FSM state → навигационные команды.
//! Движение исполняет движок через NavigationService, ECS только решает.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod spawn;
pub mod systems;

pub use components::*;
pub use events::*;
pub use spawn::*;
pub use systems::*;

use crate::components::AgentMoved;
use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения (по SimulationSet):
/// 1. Sync - sync_agent_transforms (позиции из движка)
/// 2. Notify - deliver_footprint_notifications (Added/Removed → trail)
/// 3. Senses - apply_damage_signals → sample_perception → decay_alert
/// 4. Decide - update_alert_states (пороги → состояние → поведение)
/// 5. Act - advance_trails → drive_activities → advance_patrols
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageSignal>()
            .add_event::<AlertStateChanged>()
            .add_event::<AgentMoved>();

        app.add_systems(
            FixedUpdate,
            (
                sync_agent_transforms.in_set(SimulationSet::Sync),
                deliver_footprint_notifications.in_set(SimulationSet::Notify),
                (apply_damage_signals, sample_perception, decay_alert)
                    .chain()
                    .in_set(SimulationSet::Senses),
                update_alert_states.in_set(SimulationSet::Decide),
                (advance_trails, drive_activities, advance_patrols)
                    .chain()
                    .in_set(SimulationSet::Act),
            ),
        );
    }
}
