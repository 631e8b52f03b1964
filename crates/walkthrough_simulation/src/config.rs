//! Конфигурация walkthrough engine
//!
//! Все параметры с Default значениями (как в college walkthrough),
//! опционально переопределяются JSON документом (`#[serde(default)]`
//! - можно указать только нужные поля).

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Ошибка загрузки конфигурации
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid walkthrough config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid walkthrough config: {0}")]
    Invalid(String),
}

/// Параметры Locomotion Solver
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Минимальная дистанция до стены (метры)
    pub wall_limit: f32,
    /// Скорость ходьбы (m/s)
    pub speed: f32,
    /// Высота ray origin над dolly для forward/lateral проверок
    pub eye_height: f32,
    /// Высота над ногами, откуда floor probe бьёт вниз
    pub floor_probe_height: f32,
    /// Caller clamp для dt (защита от скачков после паузы вкладки)
    pub max_dt: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            wall_limit: 1.3,
            speed: 2.0,
            eye_height: 1.0,
            floor_probe_height: 1.5,
            max_dt: 0.1,
        }
    }
}

/// Параметры controller presence detection
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Сколько ждать `connected` после входа в immersive (секунды)
    pub connect_timeout: f32,
    /// Период re-sampling количества input sources (секунды)
    pub sample_interval: f32,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 2.0,
            sample_interval: 1.0,
        }
    }
}

/// Параметры gaze dwell
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    /// Сколько держать взгляд до перехода в Move (секунды)
    pub dwell_time: f32,
    /// Допустимое отклонение взгляда от anchor (радианы)
    pub angular_tolerance: f32,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            dwell_time: 2.0,
            angular_tolerance: 0.2, // ~11.5°
        }
    }
}

/// Параметры Proximity Trigger
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Радиус срабатывания landmark (метры)
    pub threshold: f32,
    /// Панель висит над landmark на этой высоте
    pub panel_height_offset: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            threshold: 3.0,
            panel_height_offset: 1.3,
        }
    }
}

/// Полная конфигурация (Bevy resource)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct WalkthroughConfig {
    pub locomotion: LocomotionConfig,
    pub presence: PresenceConfig,
    pub gaze: GazeConfig,
    pub proximity: ProximityConfig,
}

impl WalkthroughConfig {
    /// Парсит JSON и проверяет что значения имеют смысл
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("locomotion.wall_limit", self.locomotion.wall_limit),
            ("locomotion.speed", self.locomotion.speed),
            ("locomotion.max_dt", self.locomotion.max_dt),
            ("presence.connect_timeout", self.presence.connect_timeout),
            ("presence.sample_interval", self.presence.sample_interval),
            ("gaze.dwell_time", self.gaze.dwell_time),
            ("proximity.threshold", self.proximity.threshold),
        ];

        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    field, value
                )));
            }
        }

        Ok(())
    }
}
