//! Headless симуляция Sentinel
//!
//! Один guard на патруле, игрок проходит у него за спиной по мокрой земле.
//! Навигация = движение по прямой, геометрия = открытое поле без стен.
//!
//! Запуск: `sentinel_simulation [scenario.json]`

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use sentinel_simulation::{
    create_headless_app, step, AgentMoved, AlertStateChanged, EnemySenses, EnemySpawn,
    FootprintRegistry, FootprintSettings, FootstepEvent, GeometryBackend, HitInfo,
    NavigationBackend, NavigationService, PerceptionGeometry, PerceptionTarget, SimClock,
    SimulationSet, TargetMask, TerrainContact, TickTimer,
};

/// Базовая скорость агента при multiplier = 1.0 (м/с)
const BASE_SPEED: f32 = 3.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Scenario {
    seed: u64,
    ticks: u64,
    senses: EnemySenses,
    footprints: FootprintSettings,
    guard_position: [f32; 3],
    guard_forward: [f32; 3],
    patrol: Vec<[f32; 3]>,
    player_path: Vec<[f32; 3]>,
    player_speed: f32,
    /// Период шагов игрока (секунды)
    footstep_interval_secs: f32,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 1800,
            senses: EnemySenses::default(),
            footprints: FootprintSettings::default(),
            guard_position: [0.0, 0.0, 0.0],
            guard_forward: [0.0, 0.0, -1.0],
            patrol: vec![[0.0, 0.0, 0.0], [0.0, 0.0, -12.0]],
            player_path: vec![[-6.0, 0.0, 1.5], [6.0, 0.0, 1.5], [6.0, 0.0, 20.0]],
            player_speed: 2.0,
            footstep_interval_secs: 0.5,
        }
    }
}

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

/// Общее состояние "движка": позиции, цели и скорости агентов
#[derive(Default)]
struct EngineState {
    positions: HashMap<Entity, Vec3>,
    destinations: HashMap<Entity, Vec3>,
    multipliers: HashMap<Entity, f32>,
    player: Option<Entity>,
}

#[derive(Resource, Clone, Default)]
struct Engine(Arc<Mutex<EngineState>>);

impl Engine {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct StraightLineNav(Engine);

impl NavigationService for StraightLineNav {
    fn set_destination(&mut self, agent: Entity, position: Vec3) {
        self.0.lock().destinations.insert(agent, position);
    }

    fn stop(&mut self, agent: Entity) {
        self.0.lock().destinations.remove(&agent);
    }

    fn distance_remaining(&self, agent: Entity) -> Option<f32> {
        let state = self.0.lock();
        let destination = state.destinations.get(&agent)?;
        let position = state.positions.get(&agent)?;
        Some(position.distance(*destination))
    }

    fn current_speed(&self, agent: Entity) -> f32 {
        let state = self.0.lock();
        if !state.destinations.contains_key(&agent) {
            return 0.0;
        }
        BASE_SPEED * state.multipliers.get(&agent).copied().unwrap_or(1.0)
    }

    fn set_speed_multiplier(&mut self, agent: Entity, multiplier: f32) {
        self.0.lock().multipliers.insert(agent, multiplier);
    }

    fn sample_reachable(&self, point: Vec3, _max_distance: f32) -> Option<Vec3> {
        Some(Vec3::new(point.x, 0.0, point.z))
    }
}

/// Открытое поле: все linecast'ы доходят до цели
struct OpenField(Engine);

impl PerceptionGeometry for OpenField {
    fn overlap_targets(&self, origin: Vec3, radius: f32, mask: TargetMask) -> Vec<Entity> {
        if !mask.intersects(TargetMask::PLAYER) {
            return Vec::new();
        }
        let state = self.0.lock();
        state
            .player
            .filter(|player| {
                state
                    .positions
                    .get(player)
                    .is_some_and(|position| position.distance(origin) <= radius)
            })
            .into_iter()
            .collect()
    }

    fn line_of_sight(&self, _from: Vec3, to: Vec3) -> Option<HitInfo> {
        let state = self.0.lock();
        let player = state.player?;
        let position = state.positions.get(&player)?;
        if position.distance(to) > 0.5 {
            return None;
        }
        Some(HitInfo {
            tag: "Player".to_string(),
            entity: Some(player),
        })
    }
}

/// Маршрут игрока + таймер шагов
#[derive(Resource)]
struct PlayerScript {
    path: Vec<Vec3>,
    next: usize,
    speed: f32,
    footstep: TickTimer,
}

/// Система "движка": двигает guard'ов к их целям и сообщает новые позиции
fn move_agents(
    engine: Res<Engine>,
    clock: Res<SimClock>,
    agents: Query<(Entity, &Transform), Without<PerceptionTarget>>,
    mut moved: EventWriter<AgentMoved>,
) {
    let mut state = engine.lock();
    for (entity, transform) in agents.iter() {
        state.positions.insert(entity, transform.translation);

        let Some(destination) = state.destinations.get(&entity).copied() else {
            continue;
        };
        let multiplier = state.multipliers.get(&entity).copied().unwrap_or(1.0);
        let to_destination = destination - transform.translation;
        let max_step = BASE_SPEED * multiplier * clock.delta_secs();
        if to_destination.length() <= f32::EPSILON || max_step <= 0.0 {
            continue;
        }

        let step = to_destination.clamp_length_max(max_step);
        let position = transform.translation + step;
        state.positions.insert(entity, position);
        moved.write(AgentMoved {
            entity,
            position,
            forward: Some(step.normalize_or_zero()),
        });
    }
}

/// Система "движка": игрок идёт по маршруту и оставляет шаги
fn move_player(
    engine: Res<Engine>,
    clock: Res<SimClock>,
    mut script: ResMut<PlayerScript>,
    player: Query<(Entity, &Transform), With<PerceptionTarget>>,
    mut moved: EventWriter<AgentMoved>,
    mut footsteps: EventWriter<FootstepEvent>,
) {
    let Ok((entity, transform)) = player.single() else {
        return;
    };
    let Some(waypoint) = script.path.get(script.next).copied() else {
        return;
    };

    let to_waypoint = waypoint - transform.translation;
    let position = transform.translation
        + to_waypoint.clamp_length_max(script.speed * clock.delta_secs());
    if position.distance(waypoint) <= 0.05 {
        script.next += 1;
    }

    engine.lock().positions.insert(entity, position);
    moved.write(AgentMoved {
        entity,
        position,
        forward: None,
    });

    if script.footstep.tick() {
        footsteps.write(FootstepEvent { position });
    }
}

fn report_transitions(mut changes: EventReader<AlertStateChanged>, clock: Res<SimClock>) {
    for change in changes.read() {
        println!(
            "Tick {}: {:?} {:?} → {:?}",
            clock.tick, change.enemy, change.from, change.to
        );
    }
}

fn load_scenario() -> Result<Scenario, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Scenario::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scenario = load_scenario()?;
    scenario.footprints.validate()?;
    println!(
        "Starting Sentinel headless simulation (seed: {}, ticks: {})",
        scenario.seed, scenario.ticks
    );

    let mut app = create_headless_app(scenario.seed);
    let engine = Engine::default();
    let tick_hz = app.world().resource::<SimClock>().tick_hz;

    app.insert_resource(engine.clone())
        .insert_resource(scenario.footprints.clone())
        .insert_resource(NavigationBackend::new(StraightLineNav(engine.clone())))
        .insert_resource(GeometryBackend::new(OpenField(engine.clone())))
        .insert_resource(PlayerScript {
            path: scenario.player_path.iter().copied().map(vec3).collect(),
            next: 0,
            speed: scenario.player_speed,
            footstep: TickTimer::from_secs(
                scenario.footstep_interval_secs,
                tick_hz,
            ),
        })
        .add_systems(
            FixedUpdate,
            (move_agents, move_player, report_transitions)
                .chain()
                .after(SimulationSet::Act),
        );

    let start = scenario
        .player_path
        .first()
        .copied()
        .map_or(Vec3::ZERO, vec3);
    let player = app
        .world_mut()
        .spawn((PerceptionTarget, Transform::from_translation(start)))
        .id();
    {
        let mut state = engine.lock();
        state.player = Some(player);
        state.positions.insert(player, start);
    }

    let guard = EnemySpawn::new(vec3(scenario.guard_position))
        .facing(vec3(scenario.guard_forward))
        .with_senses(scenario.senses.clone())
        .with_patrol(scenario.patrol.iter().copied().map(vec3).collect())
        .spawn(app.world_mut())?;

    // Игрок стартует на мокрой земле
    app.world_mut().send_event(TerrainContact { position: start });

    for tick in 0..scenario.ticks {
        step(&mut app);

        if tick % 300 == 0 {
            let world = app.world();
            let footprints = world.resource::<FootprintRegistry>().len();
            let position = world
                .get::<Transform>(guard)
                .map(|t| t.translation)
                .unwrap_or_default();
            println!(
                "Tick {}: guard at {:.1?}, {} live footprints",
                tick, position, footprints
            );
        }
    }

    println!("Simulation complete!");
    Ok(())
}
