//! Общий harness для интеграционных тестов
//!
//! Headless App + fake backends (навигация / геометрия), состояние которых
//! доступно тесту через Arc<Mutex<…>>. Тики гоняются вручную через FixedUpdate.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use bevy::prelude::*;
use sentinel_simulation::{
    create_headless_app, step, Activity, AgentMoved, AlertState, AlertStateChanged,
    BreadcrumbTrail, EnemySpawn, FootprintEvent, FootprintRegistry, FootstepEvent,
    GeometryBackend, HitInfo, NavigationBackend, NavigationService, PerceptionGeometry,
    PerceptionTarget, SimulationSet, StateIndicator, TargetMask, TerrainContact,
};

/// Что навигация получила от AI
#[derive(Default, Debug)]
pub struct NavState {
    pub destinations: HashMap<Entity, Vec3>,
    pub multipliers: HashMap<Entity, f32>,
    pub stops: HashMap<Entity, usize>,
    /// Ответ distance_remaining (нет записи → None)
    pub remaining: HashMap<Entity, f32>,
    /// sample_reachable всегда промахивается
    pub unreachable: bool,
}

#[derive(Clone, Default)]
pub struct FakeNav(pub Arc<Mutex<NavState>>);

impl FakeNav {
    fn state(&self) -> MutexGuard<'_, NavState> {
        self.0.lock().unwrap()
    }
}

impl NavigationService for FakeNav {
    fn set_destination(&mut self, agent: Entity, position: Vec3) {
        self.state().destinations.insert(agent, position);
    }

    fn stop(&mut self, agent: Entity) {
        let mut state = self.state();
        state.destinations.remove(&agent);
        *state.stops.entry(agent).or_default() += 1;
    }

    fn distance_remaining(&self, agent: Entity) -> Option<f32> {
        self.state().remaining.get(&agent).copied()
    }

    fn current_speed(&self, agent: Entity) -> f32 {
        self.state().multipliers.get(&agent).copied().unwrap_or(0.0)
    }

    fn set_speed_multiplier(&mut self, agent: Entity, multiplier: f32) {
        self.state().multipliers.insert(agent, multiplier);
    }

    fn sample_reachable(&self, point: Vec3, _max_distance: f32) -> Option<Vec3> {
        if self.state().unreachable {
            None
        } else {
            Some(point)
        }
    }
}

/// Что "видит" физика
#[derive(Default, Debug)]
pub struct GeometryState {
    /// Результат overlap (позиции берутся из Transform)
    pub targets: Vec<Entity>,
    /// Между глазами и целью стена
    pub blocked: bool,
    pub linecasts: usize,
}

#[derive(Clone, Default)]
pub struct FakeGeometry(pub Arc<Mutex<GeometryState>>);

impl PerceptionGeometry for FakeGeometry {
    fn overlap_targets(&self, _origin: Vec3, _radius: f32, _mask: TargetMask) -> Vec<Entity> {
        self.0.lock().unwrap().targets.clone()
    }

    fn line_of_sight(&self, _from: Vec3, _to: Vec3) -> Option<HitInfo> {
        let mut state = self.0.lock().unwrap();
        state.linecasts += 1;
        if state.blocked {
            Some(HitInfo::tagged("Wall"))
        } else {
            Some(HitInfo {
                tag: "Player".to_string(),
                entity: state.targets.first().copied(),
            })
        }
    }
}

/// Журнал событий типа E за весь тест (свой EventReader, буферы свапаются каждый тик)
#[derive(Resource)]
pub struct Recorded<E: Event>(pub Vec<E>);

fn record<E: Event + Clone>(mut reader: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(reader.read().cloned());
}

pub struct Harness {
    pub app: App,
    pub nav: FakeNav,
    pub geometry: FakeGeometry,
}

impl Harness {
    pub fn new() -> Self {
        let mut app = create_headless_app(7);
        let nav = FakeNav::default();
        let geometry = FakeGeometry::default();
        app.insert_resource(NavigationBackend::new(nav.clone()))
            .insert_resource(GeometryBackend::new(geometry.clone()))
            .insert_resource(Recorded::<FootprintEvent>(Vec::new()))
            .insert_resource(Recorded::<AlertStateChanged>(Vec::new()))
            .add_systems(
                FixedUpdate,
                (record::<FootprintEvent>, record::<AlertStateChanged>)
                    .after(SimulationSet::Act),
            );

        Self { app, nav, geometry }
    }

    pub fn world(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn spawn_enemy(&mut self, spawn: EnemySpawn) -> Entity {
        spawn.spawn(self.app.world_mut()).unwrap()
    }

    /// Игрок + регистрация в overlap
    pub fn spawn_player(&mut self, position: Vec3) -> Entity {
        let player = self
            .app
            .world_mut()
            .spawn((PerceptionTarget, Transform::from_translation(position)))
            .id();
        self.geometry.0.lock().unwrap().targets.push(player);
        player
    }

    pub fn step(&mut self) {
        step(&mut self.app);
    }

    pub fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn nav(&self) -> MutexGuard<'_, NavState> {
        self.nav.0.lock().unwrap()
    }

    pub fn geometry(&self) -> MutexGuard<'_, GeometryState> {
        self.geometry.0.lock().unwrap()
    }

    pub fn alert(&self, enemy: Entity) -> &AlertState {
        self.app.world().get::<AlertState>(enemy).unwrap()
    }

    pub fn activity(&self, enemy: Entity) -> Activity {
        *self.app.world().get::<Activity>(enemy).unwrap()
    }

    pub fn indicator(&self, enemy: Entity) -> StateIndicator {
        *self.app.world().get::<StateIndicator>(enemy).unwrap()
    }

    pub fn trail(&self, enemy: Entity) -> &BreadcrumbTrail {
        self.app.world().get::<BreadcrumbTrail>(enemy).unwrap()
    }

    pub fn live_footprints(&self) -> usize {
        self.app.world().resource::<FootprintRegistry>().len()
    }

    /// Все события типа E с начала теста (только записываемые типы: см. Harness::new)
    pub fn events<E: Event + Clone>(&self) -> Vec<E> {
        self.app.world().resource::<Recorded<E>>().0.clone()
    }

    /// Сколько событий E сейчас лежит в double buffer
    pub fn buffered<E: Event>(&self) -> usize {
        self.app.world().resource::<Events<E>>().len()
    }

    pub fn move_agent(&mut self, entity: Entity, position: Vec3) {
        self.app.world_mut().send_event(AgentMoved {
            entity,
            position,
            forward: None,
        });
    }

    pub fn footstep(&mut self, position: Vec3) {
        self.app.world_mut().send_event(FootstepEvent { position });
    }

    pub fn terrain_contact(&mut self, position: Vec3) {
        self.app.world_mut().send_event(TerrainContact { position });
    }
}
