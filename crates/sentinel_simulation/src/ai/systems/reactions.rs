//! AI reaction systems (damage, death).

use bevy::prelude::*;

use crate::ai::{
    Activity, AiCadence, AlertState, AlertStateChanged, BreadcrumbTrail, DamageSignal, EnemySenses,
    EnemyState, StateIndicator,
};
use crate::collaborators::NavigationBackend;
use crate::components::{Dead, Dormant, Enemy};

/// System: сигналы damage/health сервиса
///
/// - Hit → alert level = max (FSM переключит в Alert в этом же тике)
/// - Lethal → Dead: стоп навигации, trail сброшен, опросы отменены (AiCadence удаляется),
///   маркер Dead отсекает врага от всех AI систем
///
/// Hit для выключенного врага пропускается, Lethal доходит всегда
/// (выключенный враг остаётся Dead и после enable). Despawned - пропуск.
pub fn apply_damage_signals(
    mut commands: Commands,
    mut signals: EventReader<DamageSignal>,
    mut enemies: Query<
        (
            &EnemySenses,
            &mut AlertState,
            &mut Activity,
            &mut StateIndicator,
            &mut BreadcrumbTrail,
            Has<Dormant>,
        ),
        With<Enemy>,
    >,
    mut nav: Option<ResMut<NavigationBackend>>,
    mut changes: EventWriter<AlertStateChanged>,
) {
    for signal in signals.read() {
        match *signal {
            DamageSignal::Hit { enemy } => {
                let Ok((senses, mut alert, .., dormant)) = enemies.get_mut(enemy) else {
                    continue;
                };
                if dormant || alert.is_dead() {
                    continue;
                }

                alert.set_level(senses.max_alert, senses.max_alert);
                crate::log(&format!("⚠️ {:?} hit → alert {:.0}", enemy, alert.level()));
            }

            DamageSignal::Lethal { enemy } => {
                let Ok((_, mut alert, mut activity, mut indicator, mut trail, _)) =
                    enemies.get_mut(enemy)
                else {
                    continue;
                };

                let from = alert.state();
                if !alert.force_dead() {
                    continue;
                }

                trail.abort();
                *activity = Activity::Inert;
                indicator.0 = EnemyState::Dead.indicator();
                if let Some(nav) = nav.as_mut() {
                    nav.stop(enemy);
                    nav.set_speed_multiplier(enemy, 0.0);
                }

                commands.entity(enemy).insert(Dead).remove::<AiCadence>();
                changes.write(AlertStateChanged {
                    enemy,
                    from,
                    to: EnemyState::Dead,
                });
                crate::log_info(&format!("💀 {:?} died → AI disabled (Dead state)", enemy));
            }
        }
    }
}
