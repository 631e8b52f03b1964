//! Locomotion domain - collision-aware движение dolly
//!
//! Содержит:
//! - SpatialQuery + CollisionProxy (ray casts через rapier collider)
//! - advance / apply_yaw (чистый solver, без ECS)
//! - drive_locomotion (ECS adapter)

use bevy::prelude::*;

pub mod components;
pub mod query;
pub mod solver;
pub mod systems;

mod solver_tests;

pub use components::{spawn_dolly, Dolly, LocomotionTick};
pub use query::{CollisionProxy, InteractableSet, RayHit, SpatialQuery, MAX_RAY_DISTANCE};
pub use solver::{advance, apply_yaw, LocomotionStep};

use crate::WalkthroughSet;

/// Locomotion Plugin
///
/// CollisionProxy НЕ создаётся здесь - его публикует scene loader
/// (insert_resource целиком, между тиками).
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionTick>();

        app.add_systems(
            Update,
            systems::drive_locomotion.in_set(WalkthroughSet::Locomotion),
        );
    }
}
