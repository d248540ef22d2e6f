//! FSM systems: пороги alert level → состояние → поведение

use bevy::prelude::*;

use crate::ai::{
    begin_state_behaviour, Activity, AlertState, AlertStateChanged, BreadcrumbTrail, EnemySenses,
    EnemyState, PatrolRoute, StateIndicator,
};
use crate::collaborators::NavigationBackend;
use crate::components::{Dead, Dormant, Enemy};
use crate::DeterministicRng;

/// Система: AI FSM transitions (каждый тик)
///
/// Состояние = функция от alert level:
/// - level < caution_threshold → Idle
/// - caution_threshold ≤ level < alert_threshold → Caution
/// - level ≥ alert_threshold → Alert
///
/// Dead сюда не попадает (terminal, выставляется в apply_damage_signals).
/// Повтор того же состояния - no-op, вход не переигрывается.
///
/// Пока враг идёт по следам, trail важнее Idle/Caution поведения:
/// меняется только состояние (Caution ещё и красит индикатор). Alert обрывает trail.
#[allow(clippy::type_complexity)]
pub fn update_alert_states(
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &EnemySenses,
            &PatrolRoute,
            &mut AlertState,
            &mut Activity,
            &mut StateIndicator,
            &mut BreadcrumbTrail,
        ),
        (With<Enemy>, Without<Dead>, Without<Dormant>),
    >,
    nav: Option<ResMut<NavigationBackend>>,
    mut rng: ResMut<DeterministicRng>,
    mut changes: EventWriter<AlertStateChanged>,
) {
    let Some(mut nav) = nav else {
        return;
    };

    for (entity, transform, senses, patrol, mut alert, mut activity, mut indicator, mut trail) in
        enemies.iter_mut()
    {
        let Some(target) = alert.pending_transition(senses) else {
            continue;
        };

        let from = alert.commit(target);
        if from != target {
            crate::log_info(&format!(
                "AI: {:?} {:?} → {:?} (alert {:.1})",
                entity,
                from,
                target,
                alert.level()
            ));
            changes.write(AlertStateChanged {
                enemy: entity,
                from,
                to: target,
            });
        }

        if trail.is_following() {
            if target != EnemyState::Alert {
                if target == EnemyState::Caution {
                    indicator.0 = target.indicator();
                }
                continue;
            }
            trail.abort();
            crate::log_info(&format!(
                "🏃 {:?} Alert: trail dropped, switching to direct pursuit",
                entity
            ));
        }

        begin_state_behaviour(
            entity,
            target,
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
