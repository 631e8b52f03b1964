//! XR session + head pose resources (пишет platform collaborator)

use bevy::prelude::*;

/// Состояние immersive session
///
/// `immersive` переключают SessionStarted/SessionEnded,
/// `input_source_count` platform обновляет сама (polling inputSources).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XrSession {
    pub immersive: bool,
    pub input_source_count: usize,
}

impl XrSession {
    /// Количество sources, None если session нет
    pub fn active_source_count(&self) -> Option<usize> {
        self.immersive.then_some(self.input_source_count)
    }
}

/// World pose головы (камера HMD внутри dolly)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HeadPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for HeadPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 0.0), // Средний рост стоя
            rotation: Quat::IDENTITY,
        }
    }
}

impl HeadPose {
    /// Куда смотрит голова (-Z камеры)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}
