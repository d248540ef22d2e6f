//! Поведение на входе в состояние FSM (общая часть для fsm / trail / reactions)

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::ai::{flat_distance, Activity, EnemySenses, EnemyState, PatrolRoute, StateIndicator};
use crate::collaborators::NavigationService;

/// Вход в состояние: скорость, индикатор, навигационная команда
///
/// - Idle: (пере)запуск патруля с текущей точки, без маршрута - стоим
/// - Caution: случайная достижимая точка в investigate_radius
/// - Alert: прямое преследование (цель переназначается каждый тик в drive_activities)
/// - Dead: стоп
#[allow(clippy::too_many_arguments)]
pub fn begin_state_behaviour(
    entity: Entity,
    state: EnemyState,
    position: Vec3,
    senses: &EnemySenses,
    patrol: &PatrolRoute,
    activity: &mut Activity,
    indicator: &mut StateIndicator,
    nav: &mut dyn NavigationService,
    rng: &mut ChaCha8Rng,
) {
    indicator.0 = state.indicator();
    nav.set_speed_multiplier(entity, senses.speed_for(state));

    *activity = match state {
        EnemyState::Idle => match patrol.current() {
            Some(waypoint) => {
                nav.set_destination(entity, waypoint);
                Activity::Patrolling
            }
            None => {
                nav.stop(entity);
                Activity::Holding
            }
        },
        EnemyState::Caution => {
            let point = pick_investigation_point(position, senses.investigate_radius, nav, rng);
            match point {
                Some(point) => nav.set_destination(entity, point),
                None => crate::log(&format!(
                    "🔍 {:?} Caution: no reachable point yet, retrying next tick",
                    entity
                )),
            }
            Activity::Investigating { point }
        }
        EnemyState::Alert => Activity::Pursuing,
        EnemyState::Dead => {
            nav.stop(entity);
            Activity::Inert
        }
    };
}

/// Случайная точка в круге radius вокруг origin, спроецированная на NavMesh
///
/// Проекция, улетевшая за radius, считается промахом (retry на следующем тике).
pub fn pick_investigation_point(
    origin: Vec3,
    radius: f32,
    nav: &dyn NavigationService,
    rng: &mut ChaCha8Rng,
) -> Option<Vec3> {
    let angle = rng.gen::<f32>() * TAU;
    let distance = rng.gen::<f32>() * radius;
    let candidate = origin + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);

    nav.sample_reachable(candidate, radius)
        .filter(|point| flat_distance(*point, origin) <= radius)
}
