//! Perception systems: периодический сэмпл зрения → накопление тревоги

use bevy::prelude::*;

use crate::ai::{sight_check, AiCadence, AlertState, EnemySenses, PerceptionMemory};
use crate::clock::SimClock;
use crate::collaborators::GeometryBackend;
use crate::components::{Dead, Dormant, Enemy, PerceptionTarget};

/// Система: сэмпл зрения раз в sample_interval
///
/// 1. Overlap в радиусе view_distance → ближайшая живая цель
/// 2. Конус обзора + linecast (хит должен иметь target_tag)
/// 3. Видно → alert += gain / distance (clamp max_alert)
///
/// Пустой overlap / despawned цель - сэмпл пропускается (не ошибка).
/// Не видно - уровень не меняется (decay отдельно, по конфигу).
pub fn sample_perception(
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &EnemySenses,
            &mut AiCadence,
            &mut AlertState,
            &mut PerceptionMemory,
        ),
        (With<Enemy>, Without<Dead>, Without<Dormant>),
    >,
    targets: Query<&Transform, With<PerceptionTarget>>,
    geometry: Option<Res<GeometryBackend>>,
) {
    let Some(geometry) = geometry else {
        return;
    };

    for (entity, transform, senses, mut cadence, mut alert, mut memory) in enemies.iter_mut() {
        if !cadence.perception.tick() || alert.is_dead() {
            continue;
        }

        let origin = transform.translation;
        let nearest = geometry
            .overlap_targets(origin, senses.view_distance, senses.target_mask)
            .into_iter()
            .filter(|candidate| *candidate != entity)
            .filter_map(|candidate| {
                targets
                    .get(candidate)
                    .ok()
                    .map(|target_transform| (candidate, target_transform.translation))
            })
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(origin).total_cmp(&b.distance_squared(origin))
            });

        let Some((target, target_position)) = nearest else {
            memory.lose_sight();
            continue;
        };

        let forward = transform.forward().as_vec3();
        let result = sight_check(origin, forward, target_position, senses, &**geometry);

        if result.visible {
            let before = alert.level();
            alert.raise(result.alert_gain(senses), senses.max_alert);
            memory.observe(target, target_position);
            crate::log(&format!(
                "👁️ {:?} sees {:?} at {:.1}m: alert {:.1} → {:.1}",
                entity,
                target,
                result.distance,
                before,
                alert.level()
            ));
        } else {
            memory.lose_sight();
        }
    }
}

/// Система: убывание тревоги пока цель не видна
///
/// При alert_decay_per_sec = 0 (по умолчанию) ничего не делает:
/// тревога держится, пока её не перекроют пороги.
pub fn decay_alert(
    mut enemies: Query<
        (&EnemySenses, &PerceptionMemory, &mut AlertState),
        (With<Enemy>, Without<Dead>, Without<Dormant>),
    >,
    clock: Res<SimClock>,
) {
    let delta = clock.delta_secs();

    for (senses, memory, mut alert) in enemies.iter_mut() {
        if senses.alert_decay_per_sec <= 0.0 || memory.visible || alert.level() <= 0.0 {
            continue;
        }
        alert.decay(senses.alert_decay_per_sec * delta);
    }
}
