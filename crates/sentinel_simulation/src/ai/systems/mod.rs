//! AI systems (perception → FSM → behaviour)

pub mod behaviour;
pub mod fsm;
pub mod movement;
pub mod patrol;
pub mod perception;
pub mod reactions;
pub mod trail;

// Re-export all systems
pub use behaviour::*;
pub use fsm::*;
pub use movement::*;
pub use patrol::*;
pub use perception::*;
pub use reactions::*;
pub use trail::*;
