//! Locomotion компоненты: dolly (viewer frame) и результат тика

use bevy::prelude::*;

/// Dolly - movable anchor пользователя (камера HMD внутри)
///
/// Transform dolly = Viewer Frame. Пишет только drive_locomotion,
/// один раз за тик; rendering и proximity только читают.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dolly;

/// Считался ли locomotion в этом тике (gate для proximity)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocomotionTick {
    pub moved: bool,
}

/// Spawn dolly в стартовой позиции
pub fn spawn_dolly(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((Dolly, Transform::from_translation(position)))
        .id()
}
