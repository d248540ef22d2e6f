//! Movement systems: синхронизация Transform из движка + навигационные цели по Activity

use bevy::prelude::*;

use crate::ai::{pick_investigation_point, Activity, EnemySenses, PerceptionMemory};
use crate::collaborators::NavigationBackend;
use crate::components::{AgentMoved, Dead, Dormant, Enemy, PerceptionTarget};
use crate::DeterministicRng;

/// Система: AgentMoved → Transform
///
/// Движок authoritative для позиций (и врагов, и игрока).
/// Событие для despawned entity игнорируется.
pub fn sync_agent_transforms(
    mut moved: EventReader<AgentMoved>,
    mut transforms: Query<&mut Transform>,
) {
    for event in moved.read() {
        let Ok(mut transform) = transforms.get_mut(event.entity) else {
            continue;
        };

        transform.translation = event.position;
        if let Some(forward) = event.forward.filter(|f| f.length_squared() > f32::EPSILON) {
            transform.look_to(forward, Vec3::Y);
        }
    }
}

/// Система: навигационные цели, которые обновляются каждый тик
///
/// - Pursuing: цель = текущая позиция цели (despawn → last known position)
/// - Investigating без точки: повторная попытка найти достижимую точку
pub fn drive_activities(
    mut enemies: Query<
        (Entity, &Transform, &EnemySenses, &PerceptionMemory, &mut Activity),
        (With<Enemy>, Without<Dead>, Without<Dormant>),
    >,
    targets: Query<&Transform, With<PerceptionTarget>>,
    nav: Option<ResMut<NavigationBackend>>,
    mut rng: ResMut<DeterministicRng>,
) {
    let Some(mut nav) = nav else {
        return;
    };

    for (entity, transform, senses, memory, mut activity) in enemies.iter_mut() {
        match *activity {
            Activity::Pursuing => {
                let destination = memory
                    .target
                    .and_then(|target| targets.get(target).ok())
                    .map(|target| target.translation)
                    .or(memory.last_known);

                if let Some(destination) = destination {
                    nav.set_destination(entity, destination);
                }
            }

            Activity::Investigating { point: None } => {
                let Some(point) = pick_investigation_point(
                    transform.translation,
                    senses.investigate_radius,
                    &**nav,
                    &mut rng.rng,
                ) else {
                    continue;
                };

                nav.set_destination(entity, point);
                *activity = Activity::Investigating { point: Some(point) };
            }

            _ => {}
        }
    }
}
