//! Perception components: память о цели + результат одного сэмпла

use bevy::prelude::*;

use crate::collaborators::PerceptionGeometry;

use super::senses::EnemySenses;

/// Дистанция ниже этой считается "вплотную" (защита от деления на 0)
pub const MIN_SIGHT_DISTANCE: f32 = 0.01;

/// Результат одного сэмпла зрения
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerceptionResult {
    pub visible: bool,
    pub distance: f32,
}

impl PerceptionResult {
    pub fn hidden(distance: f32) -> Self {
        Self {
            visible: false,
            distance,
        }
    }

    /// Прирост тревоги за этот сэмпл: gain / distance (0 если не видно)
    pub fn alert_gain(&self, senses: &EnemySenses) -> f32 {
        if !self.visible {
            return 0.0;
        }
        senses.alert_gain / self.distance.max(MIN_SIGHT_DISTANCE)
    }
}

/// Component: что враг знает о цели
///
/// `target` может указывать на despawned entity - тогда преследование
/// идёт к `last_known` позиции.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PerceptionMemory {
    pub target: Option<Entity>,
    pub last_known: Option<Vec3>,
    /// Видна ли цель на последнем сэмпле
    pub visible: bool,
}

impl PerceptionMemory {
    pub fn observe(&mut self, target: Entity, position: Vec3) {
        self.target = Some(target);
        self.last_known = Some(position);
        self.visible = true;
    }

    pub fn lose_sight(&mut self) {
        self.visible = false;
    }
}

/// Проверка видимости цели: дистанция, конус обзора, linecast с проверкой тега
pub fn sight_check(
    origin: Vec3,
    forward: Vec3,
    target_position: Vec3,
    senses: &EnemySenses,
    geometry: &dyn PerceptionGeometry,
) -> PerceptionResult {
    let to_target = target_position - origin;
    let distance = to_target.length();

    if distance > senses.view_distance {
        return PerceptionResult::hidden(distance);
    }

    // Вплотную угол не определён - считаем что в конусе
    if distance > MIN_SIGHT_DISTANCE {
        let angle = forward.angle_between(to_target).to_degrees();
        if !(angle <= senses.view_half_angle_deg) {
            return PerceptionResult::hidden(distance);
        }
    }

    let eye = origin + Vec3::Y * senses.eye_height;
    let visible = geometry
        .line_of_sight(eye, target_position)
        .is_some_and(|hit| hit.tag == senses.target_tag);

    PerceptionResult { visible, distance }
}
