//! Input domain - arbitration между HMD pose, controllers, gaze и joystick
//!
//! # Архитектура
//!
//! ```text
//! XR platform / on-screen joystick (collaborators)
//!     ↓ XrInputEvent, XrSession, HeadPose, Joystick
//! process_xr_events → selection state, presence timer
//!     ↓
//! tick_controller_presence / sample_input_sources / update_gaze_dwell
//!     ↓
//! arbitrate_input → ArbitrationState (intent + should_evaluate)
//!     ↓
//! locomotion
//! ```

use bevy::prelude::*;

pub mod arbitration;
pub mod components;
pub mod events;
pub mod gaze;
pub mod presence;
pub mod session;
pub mod systems;

pub use arbitration::{
    arbitrate, Arbitration, ArbitrationInput, ArbitrationState, Joystick, MovementIntent,
    MovementSource,
};
pub use components::{
    Affordance, AffordanceKind, DeviceId, DeviceKind, SelectionState, XrController,
};
pub use events::{GazeFallbackActivated, XrInputEvent};
pub use gaze::{GazeDwell, GazeMode};
pub use presence::{ControllerPresence, InputSourceSampler, PresenceMode};
pub use session::{HeadPose, XrSession};

use crate::WalkthroughSet;

/// Input Plugin
///
/// Все системы в WalkthroughSet::Input, строго последовательно.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<XrInputEvent>()
            .add_event::<GazeFallbackActivated>()
            .init_resource::<XrSession>()
            .init_resource::<HeadPose>()
            .init_resource::<ControllerPresence>()
            .init_resource::<InputSourceSampler>()
            .init_resource::<GazeDwell>()
            .init_resource::<ArbitrationState>();

        app.add_systems(Startup, systems::spawn_controller_slots);

        app.add_systems(
            Update,
            (
                systems::process_xr_events,
                systems::tick_controller_presence,
                systems::sample_input_sources,
                systems::update_gaze_dwell,
                systems::arbitrate_input,
            )
                .chain()
                .in_set(WalkthroughSet::Input),
        );
    }
}
