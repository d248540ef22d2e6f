//! Movement events: движок authoritative для Transform

use bevy::prelude::*;

/// Агент сдвинулся (отправляется движком после шага навигации)
///
/// ECS не двигает врагов сам - только выставляет цели через NavigationService
/// и принимает фактическую позицию обратно через это событие.
#[derive(Event, Debug, Clone, Copy)]
pub struct AgentMoved {
    pub entity: Entity,
    pub position: Vec3,
    /// Новое направление взгляда (если движок его поменял)
    pub forward: Option<Vec3>,
}
