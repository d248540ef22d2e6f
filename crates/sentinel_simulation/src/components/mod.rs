//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: маркеры акторов (Enemy, PerceptionTarget, Dead, Dormant)
//! - movement: обратная связь от движка (AgentMoved)
//!
//! AI state (AlertState, BreadcrumbTrail, PatrolRoute, EnemySenses) живёт в crate::ai.

pub mod actor;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
