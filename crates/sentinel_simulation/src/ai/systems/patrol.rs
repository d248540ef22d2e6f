//! Patrol system: обход точек маршрута в Idle

use bevy::prelude::*;

use crate::ai::{Activity, EnemySenses, PatrolRoute};
use crate::collaborators::NavigationBackend;
use crate::components::{Dead, Dormant, Enemy};

/// Система: дошёл до точки → следующая (по кругу)
///
/// Работает только пока Activity::Patrolling. Пути нет (`distance_remaining == None`)
/// - тик пропускается.
pub fn advance_patrols(
    mut enemies: Query<
        (Entity, &EnemySenses, &Activity, &mut PatrolRoute),
        (With<Enemy>, Without<Dead>, Without<Dormant>),
    >,
    nav: Option<ResMut<NavigationBackend>>,
) {
    let Some(mut nav) = nav else {
        return;
    };

    for (entity, senses, activity, mut patrol) in enemies.iter_mut() {
        if *activity != Activity::Patrolling {
            continue;
        }

        let Some(remaining) = nav.distance_remaining(entity) else {
            continue;
        };
        if remaining > senses.waypoint_arrive_distance {
            continue;
        }

        if let Some(next) = patrol.advance() {
            crate::log(&format!(
                "🚶 {:?} patrol → waypoint {} {:?}",
                entity,
                patrol.index(),
                next
            ));
            nav.set_destination(entity, next);
        }
    }
}
