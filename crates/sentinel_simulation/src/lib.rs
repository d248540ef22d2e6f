//! Sentinel Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: восприятие и преследование врагов (stealth AI)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = decision layer (alert level, FSM, footprints, breadcrumb trail)
//! - Движок = tactical layer (NavMesh, raycasts, анимации)
//!
//! Связь с движком только через collaborators (NavigationService / PerceptionGeometry)
//! и события (AgentMoved, FootstepEvent, TerrainContact, DamageSignal).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod clock;
pub mod collaborators;
pub mod components;
pub mod error;
pub mod footprints;
pub mod logger;

// Re-export базовых типов для удобства
pub use ai::{
    set_enemy_dormant, AIPlugin, Activity, AlertState, AlertStateChanged, BreadcrumbTrail,
    DamageSignal, EnemySenses, EnemySpawn, EnemyState, IndicatorColor, PatrolRoute,
    PerceptionMemory, StateIndicator,
};
pub use clock::{SimClock, TickTimer};
pub use collaborators::{
    GeometryBackend, HitInfo, NavigationBackend, NavigationService, PerceptionGeometry, TargetMask,
};
pub use components::*;
pub use error::SetupError;
pub use footprints::{
    FootprintEvent, FootprintId, FootprintPlugin, FootprintRegistry, FootprintSettings,
    FootprintToggle, FootstepEvent, TerrainContact,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Порядок фаз внутри одного FixedUpdate тика
///
/// Clock → Sync → Footprints → Notify → Senses → Decide → Act
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Инкремент SimClock
    Clock,
    /// Позиции из движка (AgentMoved)
    Sync,
    /// Footprint registry: окно, новые следы, expiry
    Footprints,
    /// Доставка footprint уведомлений врагам
    Notify,
    /// Урон + зрение + decay
    Senses,
    /// FSM transitions
    Decide,
    /// Навигационные команды (trail, pursuit, patrol)
    Act,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(clock::DEFAULT_TICK_HZ as f64))
            .init_resource::<SimClock>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Clock,
                    SimulationSet::Sync,
                    SimulationSet::Footprints,
                    SimulationSet::Notify,
                    SimulationSet::Senses,
                    SimulationSet::Decide,
                    SimulationSet::Act,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, clock::advance_clock.in_set(SimulationSet::Clock))
            // Подсистемы (ECS decision layer)
            .add_plugins((FootprintPlugin, AIPlugin));

        // Детерминистичный RNG (seed по умолчанию, если не задан снаружи)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Collaborators (NavigationBackend / GeometryBackend) ставит вызывающий код
/// до спавна врагов.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Один детерминированный тик симуляции (FixedUpdate без привязки к wall clock)
///
/// После тика буферы событий свапаются (как event_update_system в First),
/// иначе Events<T> растут всё время жизни App.
pub fn step(app: &mut App) {
    let world = app.world_mut();
    world.run_schedule(FixedUpdate);
    update_event_buffers(world);
}

/// Double-buffer swap для всех событий симуляции: событие живёт два тика
pub fn update_event_buffers(world: &mut World) {
    swap_events::<FootstepEvent>(world);
    swap_events::<TerrainContact>(world);
    swap_events::<FootprintEvent>(world);
    swap_events::<AgentMoved>(world);
    swap_events::<DamageSignal>(world);
    swap_events::<AlertStateChanged>(world);
}

fn swap_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
