//! Input events
//!
//! XR platform collaborator пушит discrete события (одно на occurrence),
//! ECS хранит только текущее состояние, никаких callback closures.

use bevy::prelude::*;

use super::components::{DeviceId, DeviceKind};

/// События XR session и controllers
#[derive(Event, Debug, Clone, PartialEq)]
pub enum XrInputEvent {
    /// Вошли в immersive session (старт connect timeout)
    SessionStarted,

    /// Вышли из immersive session
    SessionEnded,

    /// Controller подключился
    ControllerConnected {
        device: DeviceId,
        /// Target ray mode (tracked-pointer / gaze / screen)
        kind: DeviceKind,
    },

    /// Controller отключился (сбрасывает selection + affordance)
    ControllerDisconnected { device: DeviceId },

    /// Select start (trigger нажат)
    SelectStart { device: DeviceId },

    /// Select end (trigger отпущен)
    SelectEnd { device: DeviceId },
}

/// Event: connect timeout истёк без controller → gaze fallback
///
/// Генерируется ровно один раз за session.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GazeFallbackActivated;
