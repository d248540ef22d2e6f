//! Базовые компоненты акторов: Enemy, PerceptionTarget, Dead, Dormant

use bevy::prelude::*;

use crate::ai::{Activity, BreadcrumbTrail, PatrolRoute, PerceptionMemory, StateIndicator};

/// Враг (guard) - носитель perception / alert FSM / breadcrumb trail
///
/// Required Components дают пустой trail, пустой маршрут и Holding.
/// Полный набор (EnemySenses, AlertState, AiCadence) ставит `EnemySpawn::spawn`
/// после валидации конфига.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, Activity, StateIndicator, BreadcrumbTrail, PerceptionMemory, PatrolRoute)]
pub struct Enemy;

/// Цель восприятия (игрок). Позиция = Transform, его пишет движок.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct PerceptionTarget;

/// Компонент-маркер: враг мёртв (terminal)
///
/// Все AI системы фильтруют `Without<Dead>`; снять маркер нечем.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Компонент-маркер: враг выключен (disable в движке)
///
/// Выключенный враг не получает footprint уведомлений и его таймеры стоят.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dormant;
