//! EnemySenses - единый конфиг "органов чувств" врага
//!
//! Все пороги восприятия, FSM и breadcrumb trail в одном месте,
//! вместо магических констант по системам.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collaborators::TargetMask;
use crate::error::SetupError;

use super::alert::EnemyState;

/// Параметры восприятия и реакции врага
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemySenses {
    // --- Perception ---
    /// Период сэмплирования зрения (секунды)
    pub sample_interval_secs: f32,
    /// Дальность зрения (метры)
    pub view_distance: f32,
    /// Половина угла обзора от forward (градусы)
    pub view_half_angle_deg: f32,
    /// Высота глаз над pivot (метры)
    pub eye_height: f32,
    /// Тег collider цели: linecast должен попасть именно в него
    pub target_tag: String,
    pub target_mask: TargetMask,
    /// Прирост тревоги за сэмпл = alert_gain / distance
    pub alert_gain: f32,
    /// Убывание тревоги в секунду, пока цель не видна (0 = нет decay)
    pub alert_decay_per_sec: f32,

    // --- Alert FSM ---
    pub caution_threshold: f32,
    pub alert_threshold: f32,
    pub max_alert: f32,
    pub idle_speed: f32,
    pub caution_speed: f32,
    pub alert_speed: f32,
    /// Радиус случайной точки осмотра в Caution (метры)
    pub investigate_radius: f32,

    // --- Breadcrumb trail ---
    /// След заметен ближе этой дистанции (метры)
    pub trail_notice_distance: f32,
    /// След должен быть позади/сбоку: угол от forward больше этого (градусы)
    pub trail_notice_angle_deg: f32,
    /// Дистанция "дошёл до следа" (метры)
    pub trail_arrive_distance: f32,
    /// Период опроса trail (секунды)
    pub trail_poll_interval_secs: f32,

    // --- Patrol ---
    pub waypoint_arrive_distance: f32,
}

impl Default for EnemySenses {
    fn default() -> Self {
        Self {
            sample_interval_secs: 0.2,
            view_distance: 15.0,
            view_half_angle_deg: 60.0,
            eye_height: 1.6,
            target_tag: "Player".to_string(),
            target_mask: TargetMask::PLAYER,
            alert_gain: 50.0,
            alert_decay_per_sec: 0.0,
            caution_threshold: 50.0,
            alert_threshold: 75.0,
            max_alert: 100.0,
            idle_speed: 0.3,
            caution_speed: 0.5,
            alert_speed: 1.0,
            investigate_radius: 10.0,
            trail_notice_distance: 2.0,
            trail_notice_angle_deg: 120.0,
            trail_arrive_distance: 0.5,
            trail_poll_interval_secs: 0.1,
            waypoint_arrive_distance: 0.5,
        }
    }
}

impl EnemySenses {
    /// Множитель скорости для состояния (Dead не двигается)
    pub fn speed_for(&self, state: EnemyState) -> f32 {
        match state {
            EnemyState::Idle => self.idle_speed,
            EnemyState::Caution => self.caution_speed,
            EnemyState::Alert => self.alert_speed,
            EnemyState::Dead => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let positive = [
            ("sample_interval_secs", self.sample_interval_secs),
            ("trail_poll_interval_secs", self.trail_poll_interval_secs),
            ("view_distance", self.view_distance),
            ("max_alert", self.max_alert),
            // Дошёл = строго ближе, при 0 trail никогда не продвинется
            ("trail_arrive_distance", self.trail_arrive_distance),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SetupError::senses(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("view_half_angle_deg", self.view_half_angle_deg),
            ("alert_gain", self.alert_gain),
            ("alert_decay_per_sec", self.alert_decay_per_sec),
            ("investigate_radius", self.investigate_radius),
            ("trail_notice_distance", self.trail_notice_distance),
            ("waypoint_arrive_distance", self.waypoint_arrive_distance),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SetupError::senses(format!("{name} must not be negative, got {value}")));
            }
        }

        if !(0.0 < self.caution_threshold
            && self.caution_threshold < self.alert_threshold
            && self.alert_threshold <= self.max_alert)
        {
            return Err(SetupError::senses(format!(
                "thresholds must satisfy 0 < caution ({}) < alert ({}) <= max ({})",
                self.caution_threshold, self.alert_threshold, self.max_alert
            )));
        }

        if self.target_tag.is_empty() {
            return Err(SetupError::senses("target_tag must not be empty"));
        }

        Ok(())
    }
}

/// Периодические опросы врага (perception sample, trail poll)
///
/// Компонент на enemy entity: удаление компонента / despawn = отмена опросов.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AiCadence {
    pub perception: crate::clock::TickTimer,
    pub trail: crate::clock::TickTimer,
}

impl AiCadence {
    pub fn from_senses(senses: &EnemySenses, tick_hz: u32) -> Self {
        Self {
            perception: crate::clock::TickTimer::from_secs(senses.sample_interval_secs, tick_hz),
            trail: crate::clock::TickTimer::from_secs(senses.trail_poll_interval_secs, tick_hz),
        }
    }

    pub fn reset(&mut self) {
        self.perception.reset();
        self.trail.reset();
    }
}
