//! Simulation clock - tick counter + tick-based timers
//!
//! Один FixedUpdate = один тик (60 Hz по умолчанию).
//! Конфиг задаёт интервалы в секундах, внутри симуляции всё считается в целых тиках:
//! никакого накопления float ошибок, прогоны детерминированы.

use bevy::prelude::*;

/// Частота симуляции по умолчанию (тиков в секунду)
pub const DEFAULT_TICK_HZ: u32 = 60;

/// Глобальный счётчик тиков симуляции
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    pub tick: u64,
    pub tick_hz: u32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_HZ)
    }
}

impl SimClock {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            tick: 0,
            tick_hz: tick_hz.max(1),
        }
    }

    pub fn secs_to_ticks(&self, secs: f32) -> u64 {
        secs_to_ticks(secs, self.tick_hz)
    }

    /// Длительность одного тика (секунды)
    pub fn delta_secs(&self) -> f32 {
        1.0 / self.tick_hz as f32
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.tick as f32 / self.tick_hz as f32
    }
}

/// Секунды → тики (округление, минимум 1 тик)
pub fn secs_to_ticks(secs: f32, tick_hz: u32) -> u64 {
    let ticks = (secs * tick_hz as f32).round();
    if ticks.is_nan() || ticks < 1.0 {
        1
    } else {
        ticks as u64
    }
}

/// Повторяющийся таймер в тиках
///
/// Живёт компонентом на владельце (enemy entity): despawn/remove = отмена.
/// `tick()` возвращает true ровно один раз за период.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct TickTimer {
    period: u64,
    elapsed: u64,
}

impl TickTimer {
    pub fn new(period: u64) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
        }
    }

    pub fn from_secs(secs: f32, tick_hz: u32) -> Self {
        Self::new(secs_to_ticks(secs, tick_hz))
    }

    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    pub fn period(&self) -> u64 {
        self.period
    }
}

/// System: инкремент tick counter (запускается ПЕРВЫМ в каждом FixedUpdate)
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.tick = clock.tick.wrapping_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks_at_60hz() {
        assert_eq!(secs_to_ticks(0.2, 60), 12);
        assert_eq!(secs_to_ticks(0.1, 60), 6);
        assert_eq!(secs_to_ticks(20.0, 60), 1200);
        assert_eq!(secs_to_ticks(10.0, 60), 600);
    }

    #[test]
    fn test_secs_to_ticks_never_zero() {
        assert_eq!(secs_to_ticks(0.0, 60), 1);
        assert_eq!(secs_to_ticks(-3.0, 60), 1);
        assert_eq!(secs_to_ticks(0.001, 60), 1);
    }

    #[test]
    fn test_tick_timer_fires_once_per_period() {
        let mut timer = TickTimer::new(3);
        let fired: Vec<bool> = (0..7).map(|_| timer.tick()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false]);
    }

    #[test]
    fn test_tick_timer_reset() {
        let mut timer = TickTimer::new(2);
        assert!(!timer.tick());
        timer.reset();
        assert!(!timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn test_clock_delta() {
        let clock = SimClock::new(60);
        assert!((clock.delta_secs() - 1.0 / 60.0).abs() < f32::EPSILON);
        assert_eq!(SimClock::new(0).tick_hz, 1);
    }
}
