//! External collaborators - навигация и геометрия восприятия
//!
//! Симуляция не знает про NavMesh и физику движка. Она отдаёт high-level команды
//! ("иди в точку") и задаёт вопросы ("сколько осталось идти", "есть ли LOS").
//! Реализации ставятся как resources ДО спавна врагов (см. `validate_collaborators`).
//!
//! Идентичность агента = ECS Entity.

use std::ops::{Deref, DerefMut};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Навигационный сервис (pathfinding движка)
pub trait NavigationService: Send + Sync + 'static {
    /// Новая цель движения для агента
    fn set_destination(&mut self, agent: Entity, position: Vec3);

    /// Остановить агента (сбросить путь)
    fn stop(&mut self, agent: Entity);

    /// Оставшаяся длина пути.
    /// `None` - пути нет / агент неизвестен (tick пропускается, не ошибка).
    fn distance_remaining(&self, agent: Entity) -> Option<f32>;

    /// Текущая скорость агента (метры/сек)
    fn current_speed(&self, agent: Entity) -> f32;

    /// Множитель скорости (меняется на входе в каждое состояние)
    fn set_speed_multiplier(&mut self, agent: Entity, multiplier: f32);

    /// Проекция точки на проходимую поверхность в радиусе `max_distance`
    fn sample_reachable(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// Маска слоёв для overlap запросов восприятия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct TargetMask(pub u32);

impl TargetMask {
    pub const PLAYER: Self = Self(1 << 0);
    pub const ALL: Self = Self(u32::MAX);

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for TargetMask {
    fn default() -> Self {
        Self::PLAYER
    }
}

/// Результат linecast: первый collider на линии
#[derive(Debug, Clone, PartialEq)]
pub struct HitInfo {
    pub tag: String,
    pub entity: Option<Entity>,
}

impl HitInfo {
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            entity: None,
        }
    }
}

/// Геометрия восприятия (physics queries движка)
pub trait PerceptionGeometry: Send + Sync + 'static {
    /// Broadphase: кандидаты в радиусе. Позиции перечитываются из ECS Transform.
    fn overlap_targets(&self, origin: Vec3, radius: f32, mask: TargetMask) -> Vec<Entity>;

    /// Linecast from → to. `None` - ничего не задето.
    fn line_of_sight(&self, from: Vec3, to: Vec3) -> Option<HitInfo>;
}

/// Resource: установленный навигационный backend
#[derive(Resource)]
pub struct NavigationBackend(pub Box<dyn NavigationService>);

impl NavigationBackend {
    pub fn new(service: impl NavigationService) -> Self {
        Self(Box::new(service))
    }
}

impl Deref for NavigationBackend {
    type Target = dyn NavigationService;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for NavigationBackend {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

/// Resource: установленный backend геометрии восприятия
#[derive(Resource)]
pub struct GeometryBackend(pub Box<dyn PerceptionGeometry>);

impl GeometryBackend {
    pub fn new(geometry: impl PerceptionGeometry) -> Self {
        Self(Box::new(geometry))
    }
}

impl Deref for GeometryBackend {
    type Target = dyn PerceptionGeometry;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Проверка что все обязательные collaborators установлены
pub fn validate_collaborators(world: &World) -> Result<(), SetupError> {
    if !world.contains_resource::<NavigationBackend>() {
        return Err(SetupError::MissingNavigation);
    }
    if !world.contains_resource::<GeometryBackend>() {
        return Err(SetupError::MissingGeometry);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullNav;

    impl NavigationService for NullNav {
        fn set_destination(&mut self, _agent: Entity, _position: Vec3) {}
        fn stop(&mut self, _agent: Entity) {}
        fn distance_remaining(&self, _agent: Entity) -> Option<f32> {
            None
        }
        fn current_speed(&self, _agent: Entity) -> f32 {
            0.0
        }
        fn set_speed_multiplier(&mut self, _agent: Entity, _multiplier: f32) {}
        fn sample_reachable(&self, point: Vec3, _max_distance: f32) -> Option<Vec3> {
            Some(point)
        }
    }

    struct BlindGeometry;

    impl PerceptionGeometry for BlindGeometry {
        fn overlap_targets(&self, _origin: Vec3, _radius: f32, _mask: TargetMask) -> Vec<Entity> {
            Vec::new()
        }
        fn line_of_sight(&self, _from: Vec3, _to: Vec3) -> Option<HitInfo> {
            None
        }
    }

    #[test]
    fn test_validate_reports_missing_navigation_first() {
        let world = World::new();
        assert_eq!(validate_collaborators(&world), Err(SetupError::MissingNavigation));
    }

    #[test]
    fn test_validate_reports_missing_geometry() {
        let mut world = World::new();
        world.insert_resource(NavigationBackend::new(NullNav));
        assert_eq!(validate_collaborators(&world), Err(SetupError::MissingGeometry));

        world.insert_resource(GeometryBackend::new(BlindGeometry));
        assert_eq!(validate_collaborators(&world), Ok(()));
    }

    #[test]
    fn test_target_mask_intersects() {
        assert!(TargetMask::ALL.intersects(TargetMask::PLAYER));
        assert!(!TargetMask(0b10).intersects(TargetMask::PLAYER));
    }
}
