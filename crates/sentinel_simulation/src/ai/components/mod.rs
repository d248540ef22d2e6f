//! AI components

pub mod alert;
pub mod patrol;
pub mod perception;
pub mod senses;
pub mod trail;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod alert_tests;

// Re-export all components
pub use alert::*;
pub use patrol::*;
pub use perception::*;
pub use senses::*;
pub use trail::*;
