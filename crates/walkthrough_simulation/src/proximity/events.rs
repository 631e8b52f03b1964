//! Proximity events для UI collaborator (info panel show/hide)

use bevy::prelude::*;

/// Где и как повесить info panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    /// Landmark position + panel_height_offset по Y
    pub position: Vec3,
    /// Лицевая сторона панели (+Z) смотрит на голову пользователя
    pub rotation: Quat,
}

impl PanelPlacement {
    pub fn above(landmark_position: Vec3, height_offset: f32, viewer_head: Vec3) -> Self {
        let position = landmark_position + Vec3::Y * height_offset;

        // looking_at направляет -Z на target → целимся в точку за панелью
        let away_from_viewer = position * 2.0 - viewer_head;
        let rotation = Transform::from_translation(position)
            .looking_at(away_from_viewer, Vec3::Y)
            .rotation;

        Self { position, rotation }
    }
}

/// Event: показать панель landmark
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LandmarkEntered {
    pub key: String,
    pub display_name: String,
    pub info: String,
    pub panel: PanelPlacement,
}

/// Event: скрыть панель
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LandmarkLeft {
    pub key: String,
}
