//! Proximity domain - landmarks и info panel
//!
//! Содержит:
//! - LandmarkTable (загрузка из JSON, порядок документа)
//! - evaluate (чистый trigger: enter/leave, максимум один active)
//! - LandmarkEntered / LandmarkLeft (для UI collaborator)

use bevy::prelude::*;

pub mod events;
pub mod landmarks;
pub mod systems;
pub mod trigger;

pub use events::{LandmarkEntered, LandmarkLeft, PanelPlacement};
pub use landmarks::{Landmark, LandmarkTable, LandmarkTableError};
pub use systems::ActiveLandmark;
pub use trigger::{evaluate, LandmarkLocator, ProximityEvent, ProximityOutcome};

use crate::WalkthroughSet;

/// Proximity Plugin
///
/// LandmarkTable публикует data loader (insert_resource целиком).
pub struct ProximityPlugin;

impl Plugin for ProximityPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LandmarkEntered>()
            .add_event::<LandmarkLeft>()
            .init_resource::<ActiveLandmark>();

        app.add_systems(
            Update,
            systems::trigger_proximity.in_set(WalkthroughSet::Proximity),
        );
    }
}
