//! BreadcrumbTrail - очередь следов, по которой враг идёт за игроком

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::footprints::{Footprint, FootprintId};

use super::senses::EnemySenses;

/// Шаг trail: значение следа (id + позиция), не ссылка на registry
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct TrailStep {
    pub id: FootprintId,
    pub position: Vec3,
}

impl From<&Footprint> for TrailStep {
    fn from(footprint: &Footprint) -> Self {
        Self {
            id: footprint.id,
            position: footprint.position,
        }
    }
}

/// Component: очередь следов + флаг following
///
/// Инвариант: `following == !queue.is_empty()`.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BreadcrumbTrail {
    queue: VecDeque<TrailStep>,
    following: bool,
}

impl BreadcrumbTrail {
    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn head(&self) -> Option<TrailStep> {
        self.queue.front().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, id: FootprintId) -> bool {
        self.queue.iter().any(|step| step.id == id)
    }

    pub fn steps(&self) -> impl Iterator<Item = &TrailStep> {
        self.queue.iter()
    }

    /// Начать следование с одного следа
    pub fn start(&mut self, step: TrailStep) {
        self.queue.clear();
        self.queue.push_back(step);
        self.following = true;
    }

    /// Добавить след в хвост (только пока following). Дубликаты игнорируются.
    pub fn push(&mut self, step: TrailStep) -> bool {
        if !self.following || self.contains(step.id) {
            return false;
        }
        self.queue.push_back(step);
        true
    }

    /// Дошли до головы: снимаем её, возвращаем новую голову.
    /// Очередь опустела → following = false в этом же вызове.
    pub fn pop_head(&mut self) -> Option<TrailStep> {
        self.queue.pop_front();
        let next = self.head();
        if next.is_none() {
            self.following = false;
        }
        next
    }

    /// Сброс trail (stale голова, эскалация в Alert, смерть)
    pub fn abort(&mut self) {
        self.queue.clear();
        self.following = false;
    }
}

/// Горизонтальная проекция: следы лежат на земле, pivot агента может быть выше
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

pub fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(a).distance(flatten(b))
}

/// Заметит ли idle враг след
///
/// След должен быть близко (< trail_notice_distance) и позади/сбоку
/// (угол от forward > trail_notice_angle_deg): игрок прошёл за спиной.
pub fn notices_footprint(
    enemy_position: Vec3,
    enemy_forward: Vec3,
    footprint_position: Vec3,
    senses: &EnemySenses,
) -> bool {
    let to_footprint = flatten(footprint_position - enemy_position);
    let distance = to_footprint.length();
    if distance <= f32::EPSILON || distance >= senses.trail_notice_distance {
        return false;
    }

    let forward = flatten(enemy_forward);
    if forward.length_squared() <= f32::EPSILON {
        return false;
    }

    forward.angle_between(to_footprint).to_degrees() > senses.trail_notice_angle_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: u64, x: f32) -> TrailStep {
        TrailStep {
            id: FootprintId(id),
            position: Vec3::new(x, 0.0, 0.0),
        }
    }

    #[test]
    fn test_start_sets_following() {
        let mut trail = BreadcrumbTrail::default();
        assert!(!trail.is_following());

        trail.start(step(1, 0.0));
        assert!(trail.is_following());
        assert_eq!(trail.head(), Some(step(1, 0.0)));
    }

    #[test]
    fn test_push_only_while_following() {
        let mut trail = BreadcrumbTrail::default();
        assert!(!trail.push(step(1, 0.0)));
        assert!(trail.is_empty());

        trail.start(step(1, 0.0));
        assert!(trail.push(step(2, 1.0)));
        assert!(!trail.push(step(2, 1.0)));
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn test_pop_last_head_stops_following_immediately() {
        let mut trail = BreadcrumbTrail::default();
        trail.start(step(1, 0.0));
        trail.push(step(2, 1.0));

        assert_eq!(trail.pop_head(), Some(step(2, 1.0)));
        assert!(trail.is_following());

        assert_eq!(trail.pop_head(), None);
        assert!(!trail.is_following());
        assert!(trail.is_empty());
    }

    #[test]
    fn test_abort_clears() {
        let mut trail = BreadcrumbTrail::default();
        trail.start(step(1, 0.0));
        trail.push(step(2, 1.0));
        trail.abort();

        assert!(!trail.is_following());
        assert!(!trail.contains(FootprintId(2)));
    }

    #[test]
    fn test_notices_footprint_behind_and_close() {
        let senses = EnemySenses::default();
        // forward = -Z, след за спиной (+Z)
        assert!(notices_footprint(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 1.5), &senses));
        // по диагонали сзади (135°)
        assert!(notices_footprint(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(1.0, 0.0, 1.0), &senses));
    }

    #[test]
    fn test_ignores_footprint_in_front_or_beside() {
        let senses = EnemySenses::default();
        assert!(!notices_footprint(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -1.0), &senses));
        // ровно сбоку = 90° < 120°
        assert!(!notices_footprint(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(1.0, 0.0, 0.0), &senses));
    }

    #[test]
    fn test_ignores_far_footprint() {
        let senses = EnemySenses::default();
        assert!(!notices_footprint(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 2.5), &senses));
        assert!(!notices_footprint(Vec3::ZERO, Vec3::NEG_Z, Vec3::ZERO, &senses));
    }

    #[test]
    fn test_height_is_ignored() {
        let senses = EnemySenses::default();
        let enemy = Vec3::new(0.0, 1.0, 0.0);
        assert!(notices_footprint(enemy, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 1.5), &senses));
        assert!((flat_distance(enemy, Vec3::ZERO)).abs() < f32::EPSILON);
    }
}
