//! Spawn helpers: враг с полным AI набором + enable/disable

use bevy::prelude::*;

use crate::ai::{
    Activity, AiCadence, AlertState, BreadcrumbTrail, EnemySenses, EnemyState, PatrolRoute,
    StateIndicator,
};
use crate::clock::{SimClock, DEFAULT_TICK_HZ};
use crate::collaborators::{validate_collaborators, NavigationBackend};
use crate::components::{Dead, Dormant, Enemy};
use crate::error::SetupError;
use crate::footprints::FootprintSettings;

/// Builder врага
///
/// ```ignore
/// let guard = EnemySpawn::new(Vec3::ZERO)
///     .facing(Vec3::X)
///     .with_patrol(vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)])
///     .spawn(app.world_mut())?;
/// ```
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub position: Vec3,
    pub forward: Vec3,
    pub senses: EnemySenses,
    pub initial_state: EnemyState,
    pub patrol: Vec<Vec3>,
}

impl EnemySpawn {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            forward: Vec3::NEG_Z,
            senses: EnemySenses::default(),
            initial_state: EnemyState::Idle,
            patrol: Vec::new(),
        }
    }

    pub fn facing(mut self, forward: Vec3) -> Self {
        self.forward = forward;
        self
    }

    pub fn with_senses(mut self, senses: EnemySenses) -> Self {
        self.senses = senses;
        self
    }

    pub fn with_patrol(mut self, waypoints: Vec<Vec3>) -> Self {
        self.patrol = waypoints;
        self
    }

    pub fn with_initial_state(mut self, state: EnemyState) -> Self {
        self.initial_state = state;
        self
    }

    /// Спавн в мир
    ///
    /// Ошибка если collaborators не установлены или конфиг (senses / FootprintSettings) невалиден.
    /// Вход в начальное состояние отыгрывается на первом тике (update_alert_states).
    pub fn spawn(self, world: &mut World) -> Result<Entity, SetupError> {
        validate_collaborators(world)?;
        self.senses.validate()?;
        if let Some(settings) = world.get_resource::<FootprintSettings>() {
            settings.validate()?;
        }

        let tick_hz = world
            .get_resource::<SimClock>()
            .map_or(DEFAULT_TICK_HZ, |clock| clock.tick_hz);

        let mut transform = Transform::from_translation(self.position);
        let forward = Vec3::new(self.forward.x, 0.0, self.forward.z);
        if forward.length_squared() > f32::EPSILON {
            transform.look_to(forward, Vec3::Y);
        }

        let alert = AlertState::new(self.initial_state, &self.senses);
        let patrol = PatrolRoute::new(self.patrol);

        let entity = if self.initial_state == EnemyState::Dead {
            world
                .spawn((
                    Enemy,
                    Dead,
                    transform,
                    alert,
                    patrol,
                    Activity::Inert,
                    StateIndicator(EnemyState::Dead.indicator()),
                    self.senses,
                ))
                .id()
        } else {
            let cadence = AiCadence::from_senses(&self.senses, tick_hz);
            world
                .spawn((Enemy, transform, alert, patrol, cadence, self.senses))
                .id()
        };

        crate::log_info(&format!(
            "🛡️ Enemy {:?} spawned at {:?} ({:?})",
            entity, self.position, self.initial_state
        ));
        Ok(entity)
    }
}

/// Enable/disable врага (аналог SetActive в движке)
///
/// Disable: trail сброшен, навигация остановлена, уведомления и таймеры не идут.
/// Enable: таймеры с нуля, вход в текущее состояние отыгрывается заново.
///
/// `false` если entity не враг или мёртв.
pub fn set_enemy_dormant(world: &mut World, enemy: Entity, dormant: bool) -> bool {
    {
        let Ok(mut entity) = world.get_entity_mut(enemy) else {
            return false;
        };
        if !entity.contains::<Enemy>() || entity.contains::<Dead>() {
            return false;
        }

        if dormant {
            entity.insert(Dormant);
            if let Some(mut trail) = entity.get_mut::<BreadcrumbTrail>() {
                trail.abort();
            }
            if let Some(mut activity) = entity.get_mut::<Activity>() {
                *activity = Activity::Holding;
            }
        } else {
            entity.remove::<Dormant>();
            if let Some(mut cadence) = entity.get_mut::<AiCadence>() {
                cadence.reset();
            }
            if let Some(mut alert) = entity.get_mut::<AlertState>() {
                alert.request_reentry();
            }
        }
    }

    if dormant {
        if let Some(mut nav) = world.get_resource_mut::<NavigationBackend>() {
            nav.stop(enemy);
        }
        crate::log(&format!("💤 Enemy {:?} disabled", enemy));
    } else {
        crate::log(&format!("⏰ Enemy {:?} enabled", enemy));
    }

    true
}
