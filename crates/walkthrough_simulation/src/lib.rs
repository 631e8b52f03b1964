//! Walkthrough Simulation Core
//!
//! Collision-aware locomotion + proximity engine для VR walkthrough на Bevy 0.16.
//!
//! Один тик = один кадр, строго последовательно:
//! - Input: какой источник двигает dolly (pose / joystick / gaze)
//! - Locomotion: collision-safe смещение dolly против CollisionProxy
//! - Interaction: pointer highlight
//! - Proximity: максимум один active landmark → info panel
//!
//! Rendering, asset loading, XR session negotiation - внешние collaborators,
//! они пишут events/resources между тиками и читают результат после.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod config;
pub mod input;
pub mod interaction;
pub mod locomotion;
pub mod logger;
pub mod proximity;

// Re-export для удобства
pub use config::{
    ConfigError, GazeConfig, LocomotionConfig, PresenceConfig, ProximityConfig, WalkthroughConfig,
};
pub use input::{
    ArbitrationState, DeviceId, DeviceKind, GazeFallbackActivated, HeadPose, InputPlugin, Joystick,
    MovementIntent, MovementSource, XrInputEvent, XrSession,
};
pub use interaction::{Highlight, HighlightChanged, Interactable, InteractionPlugin};
pub use locomotion::{advance, spawn_dolly, CollisionProxy, Dolly, LocomotionPlugin, SpatialQuery};
pub use logger::init_logger;
pub use proximity::{
    evaluate, ActiveLandmark, LandmarkEntered, LandmarkLeft, LandmarkTable, ProximityPlugin,
};

/// Фазы тика (Update, chained)
///
/// Viewer frame пишется только в Locomotion; Interaction и Proximity
/// читают уже обновлённую позу.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkthroughSet {
    Input,
    Locomotion,
    Interaction,
    Proximity,
}

/// Главный plugin (объединяет все подсистемы)
///
/// WalkthroughConfig: если host вставил свой до plugin'а, он сохраняется.
pub struct WalkthroughPlugin;

impl Plugin for WalkthroughPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WalkthroughConfig>()
            .configure_sets(
                Update,
                (
                    WalkthroughSet::Input,
                    WalkthroughSet::Locomotion,
                    WalkthroughSet::Interaction,
                    WalkthroughSet::Proximity,
                )
                    .chain(),
            )
            .add_plugins((InputPlugin, LocomotionPlugin, InteractionPlugin, ProximityPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// WalkthroughPlugin не добавляется - caller сам решает (и может
/// сначала вставить свой WalkthroughConfig).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = DeterministicRng::new(7);
        let mut b = DeterministicRng::new(7);

        for _ in 0..16 {
            assert_eq!(a.rng.gen::<u32>(), b.rng.gen::<u32>());
        }
    }

    #[test]
    fn test_plugin_registers_resources() {
        let mut app = create_headless_app(1);
        app.add_plugins(WalkthroughPlugin);
        app.update();

        assert!(app.world().get_resource::<WalkthroughConfig>().is_some());
        assert!(app.world().get_resource::<ArbitrationState>().is_some());
        assert!(app.world().get_resource::<ActiveLandmark>().is_some());
        assert!(app.world().get_resource::<Highlight>().is_some());
    }
}
