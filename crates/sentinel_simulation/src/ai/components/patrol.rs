//! PatrolRoute - фиксированный маршрут обхода в Idle

use bevy::prelude::*;

/// Component: точки маршрута + текущий индекс (по кругу)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    waypoints: Vec<Vec3>,
    index: usize,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self { waypoints, index: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.get(self.index).copied()
    }

    /// Следующая точка (wrap по модулю длины). Пустой маршрут - no-op.
    pub fn advance(&mut self) -> Option<Vec3> {
        if self.waypoints.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.waypoints.len();
        self.current()
    }
}
