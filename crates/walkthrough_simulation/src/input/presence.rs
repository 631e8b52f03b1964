//! Controller presence detection + gaze eligibility sampling
//!
//! Timers кооперативные: elapsed накапливается внутри тика,
//! "cancel" = переход в другое состояние (таймер больше не смотрим).

use bevy::prelude::*;

/// Режим presence detection для текущей session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresenceMode {
    /// Нет immersive session
    Inactive,

    /// Session стартовала, ждём `connected` (timer идёт)
    AwaitingController { elapsed: f32 },

    /// Controller подключился до timeout → timer отменён
    ControllerTracking,

    /// Timeout истёк → gaze fallback до конца session
    GazeFallback,
}

/// Controller presence state (resource)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ControllerPresence {
    mode: PresenceMode,
}

impl Default for ControllerPresence {
    fn default() -> Self {
        Self {
            mode: PresenceMode::Inactive,
        }
    }
}

impl ControllerPresence {
    pub fn mode(&self) -> PresenceMode {
        self.mode
    }

    /// Gaze fallback активирован в этой session
    pub fn use_gaze(&self) -> bool {
        self.mode == PresenceMode::GazeFallback
    }

    /// Вход в immersive: запускаем connect timeout
    pub fn start_session(&mut self) {
        self.mode = PresenceMode::AwaitingController { elapsed: 0.0 };
    }

    pub fn end_session(&mut self) {
        self.mode = PresenceMode::Inactive;
    }

    /// `connected` до timeout отменяет timer; после timeout fallback остаётся
    pub fn on_controller_connected(&mut self) {
        if let PresenceMode::AwaitingController { .. } = self.mode {
            self.mode = PresenceMode::ControllerTracking;
        }
    }

    /// Продвинуть timer. Возвращает true ровно в тик активации fallback.
    pub fn tick(&mut self, delta: f32, timeout: f32) -> bool {
        let PresenceMode::AwaitingController { elapsed } = self.mode else {
            return false;
        };

        let elapsed = elapsed + delta;
        if elapsed >= timeout {
            self.mode = PresenceMode::GazeFallback;
            true
        } else {
            self.mode = PresenceMode::AwaitingController { elapsed };
            false
        }
    }
}

/// Периодический re-sample количества input sources
///
/// Когда накопилось больше `interval` секунд: нет session или нет sources → gaze eligible,
/// есть хоть один source → gaze не eligible до следующего sample.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct InputSourceSampler {
    elapsed: f32,
    eligible: bool,
}

impl Default for InputSourceSampler {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            eligible: true,
        }
    }
}

impl InputSourceSampler {
    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    /// Новая session: eligible заново, окно sample с нуля
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `source_count`: None если immersive session нет
    pub fn tick(&mut self, delta: f32, interval: f32, source_count: Option<usize>) {
        self.elapsed += delta;
        if self.elapsed <= interval {
            return;
        }

        self.elapsed = 0.0;
        self.eligible = !matches!(source_count, Some(count) if count > 0);
    }
}
