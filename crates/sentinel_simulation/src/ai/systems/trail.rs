//! Breadcrumb trail systems: уведомления о следах + движение по очереди
//!
//! Idle враг, заметивший след позади себя, идёт по следам со скоростью Alert.
//! Новые следы дописываются в хвост, удалённый след из очереди обрывает trail.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ai::{
    begin_state_behaviour, flat_distance, notices_footprint, Activity, AiCadence, AlertState,
    BreadcrumbTrail, EnemySenses, EnemyState, IndicatorColor, PatrolRoute, StateIndicator,
    TrailStep,
};
use crate::collaborators::{NavigationBackend, NavigationService};
use crate::components::{Dead, Dormant, Enemy};
use crate::footprints::{FootprintEvent, FootprintRegistry};
use crate::DeterministicRng;

/// Система: доставка Added/Removed уведомлений подписанным врагам
///
/// Подписка = живой, включённый Enemy (фильтр запроса).
/// Каждый враг обрабатывает пачку уведомлений тика в порядке публикации.
#[allow(clippy::type_complexity)]
pub fn deliver_footprint_notifications(
    mut notifications: EventReader<FootprintEvent>,
    registry: Res<FootprintRegistry>,
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &EnemySenses,
            &PatrolRoute,
            &AlertState,
            &mut Activity,
            &mut StateIndicator,
            &mut BreadcrumbTrail,
        ),
        (With<Enemy>, Without<Dead>, Without<Dormant>),
    >,
    nav: Option<ResMut<NavigationBackend>>,
    mut rng: ResMut<DeterministicRng>,
) {
    let batch: Vec<FootprintEvent> = notifications.read().copied().collect();
    if batch.is_empty() {
        return;
    }
    let Some(mut nav) = nav else {
        return;
    };

    for (entity, transform, senses, patrol, alert, mut activity, mut indicator, mut trail) in
        enemies.iter_mut()
    {
        for notification in &batch {
            match notification {
                FootprintEvent::Added(footprint) => {
                    // Уже удалён в этом же тике - Removed придёт следом
                    if !registry.contains(footprint.id) {
                        continue;
                    }

                    if trail.is_following() {
                        trail.push(TrailStep::from(footprint));
                        continue;
                    }

                    if alert.state() != EnemyState::Idle {
                        continue;
                    }

                    let forward = transform.forward().as_vec3();
                    if notices_footprint(transform.translation, forward, footprint.position, senses)
                    {
                        start_trail(
                            entity,
                            TrailStep::from(footprint),
                            senses,
                            &mut trail,
                            &mut activity,
                            &mut indicator,
                            &mut **nav,
                        );
                    }
                }

                FootprintEvent::Removed(footprint) => {
                    if !trail.contains(footprint.id) {
                        continue;
                    }

                    trail.abort();
                    crate::log(&format!(
                        "🫧 {:?} trail lost: footprint {:?} vanished",
                        entity, footprint.id
                    ));
                    begin_state_behaviour(
                        entity,
                        alert.state(),
                        transform.translation,
                        senses,
                        patrol,
                        &mut activity,
                        &mut indicator,
                        &mut **nav,
                        &mut rng.rng,
                    );
                }
            }
        }
    }
}

/// Система: опрос trail (раз в trail_poll_interval)
///
/// - голова очереди пропала из registry → trail оборван
/// - враг дошёл до головы (flat distance < trail_arrive_distance) → следующий шаг
/// - очередь опустела → trail завершён, поведение текущего состояния в этом же тике
#[allow(clippy::type_complexity)]
pub fn advance_trails(
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &EnemySenses,
            &PatrolRoute,
            &AlertState,
            &mut AiCadence,
            &mut Activity,
            &mut StateIndicator,
            &mut BreadcrumbTrail,
        ),
        (With<Enemy>, Without<Dead>, Without<Dormant>),
    >,
    registry: Res<FootprintRegistry>,
    nav: Option<ResMut<NavigationBackend>>,
    mut rng: ResMut<DeterministicRng>,
) {
    let Some(mut nav) = nav else {
        return;
    };

    for (
        entity,
        transform,
        senses,
        patrol,
        alert,
        mut cadence,
        mut activity,
        mut indicator,
        mut trail,
    ) in enemies.iter_mut()
    {
        let poll = cadence.trail.tick();
        if !poll || !trail.is_following() {
            continue;
        }

        let Some(head) = trail.head() else {
            continue;
        };

        if !registry.contains(head.id) {
            trail.abort();
            crate::log(&format!(
                "🫧 {:?} trail lost: head {:?} is gone",
                entity, head.id
            ));
            resume(
                entity,
                alert,
                transform,
                senses,
                patrol,
                &mut activity,
                &mut indicator,
                &mut **nav,
                &mut rng.rng,
            );
            continue;
        }

        if flat_distance(transform.translation, head.position) >= senses.trail_arrive_distance {
            continue;
        }

        match trail.pop_head() {
            Some(next) => nav.set_destination(entity, next.position),
            None => {
                crate::log_info(&format!("👣 {:?} reached the end of the trail", entity));
                resume(
                    entity,
                    alert,
                    transform,
                    senses,
                    patrol,
                    &mut activity,
                    &mut indicator,
                    &mut **nav,
                    &mut rng.rng,
                );
            }
        }
    }
}

/// Старт trail с одного следа: Alert скорость, красный индикатор, EnemyState не трогаем
fn start_trail(
    entity: Entity,
    step: TrailStep,
    senses: &EnemySenses,
    trail: &mut BreadcrumbTrail,
    activity: &mut Activity,
    indicator: &mut StateIndicator,
    nav: &mut dyn NavigationService,
) {
    trail.start(step);
    *activity = Activity::FollowingTrail;
    indicator.0 = IndicatorColor::Red;
    nav.set_speed_multiplier(entity, senses.alert_speed);
    nav.set_destination(entity, step.position);

    crate::log_info(&format!(
        "👣 {:?} noticed footprint {:?} behind, following the trail",
        entity, step.id
    ));
}

#[allow(clippy::too_many_arguments)]
fn resume(
    entity: Entity,
    alert: &AlertState,
    transform: &Transform,
    senses: &EnemySenses,
    patrol: &PatrolRoute,
    activity: &mut Activity,
    indicator: &mut StateIndicator,
    nav: &mut dyn NavigationService,
    rng: &mut ChaCha8Rng,
) {
    begin_state_behaviour(
        entity,
        alert.state(),
        transform.translation,
        senses,
        patrol,
        activity,
        indicator,
        nav,
        rng,
    );
}
