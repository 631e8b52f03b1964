//! Gaze dwell - locomotion без controller'а
//!
//! Пользователь держит взгляд в одном направлении `dwell_time` секунд →
//! режим Move (идём туда, куда смотрим). Поворот головы дальше
//! `angular_tolerance` сбрасывает dwell.

use bevy::prelude::*;

use crate::config::GazeConfig;

/// Режим gaze controller'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum GazeMode {
    /// Gaze не обновлялся (нет fallback или session)
    Hidden,
    /// Копим dwell time
    Dwelling,
    /// Dwell завершён - двигаемся
    Move,
}

/// Gaze dwell state (resource)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GazeDwell {
    mode: GazeMode,
    /// Направление, относительно которого меряем отклонение
    anchor: Option<Vec3>,
    elapsed: f32,
}

impl Default for GazeDwell {
    fn default() -> Self {
        Self {
            mode: GazeMode::Hidden,
            anchor: None,
            elapsed: 0.0,
        }
    }
}

impl GazeDwell {
    pub fn mode(&self) -> GazeMode {
        self.mode
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Обновить по текущему направлению головы (world forward)
    pub fn update(&mut self, head_forward: Vec3, delta: f32, config: &GazeConfig) -> GazeMode {
        let forward = head_forward.normalize_or_zero();
        if forward == Vec3::ZERO {
            return self.mode;
        }

        let steady = self
            .anchor
            .is_some_and(|anchor| anchor.angle_between(forward) <= config.angular_tolerance);

        if steady {
            self.elapsed += delta;
            if self.elapsed >= config.dwell_time {
                self.mode = GazeMode::Move;
            }
        } else {
            // Новый anchor: первый sample или голова ушла в сторону
            self.anchor = Some(forward);
            self.elapsed = 0.0;
            self.mode = GazeMode::Dwelling;
        }

        self.mode
    }
}
