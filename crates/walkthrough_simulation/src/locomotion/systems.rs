//! Locomotion systems (Update, WalkthroughSet::Locomotion)

use bevy::prelude::*;

use super::components::{Dolly, LocomotionTick};
use super::query::{CollisionProxy, SpatialQuery};
use super::solver::{advance, apply_yaw, LocomotionStep};
use crate::config::WalkthroughConfig;
use crate::input::{ArbitrationState, HeadPose, MovementSource};
use crate::logger;

/// Система: двигает dolly по результату arbitration
///
/// dt clamp здесь (caller), solver получает уже ограниченный dt.
/// Нет CollisionProxy → advance возвращает frame как есть.
pub fn drive_locomotion(
    time: Res<Time>,
    config: Res<WalkthroughConfig>,
    arbitration: Res<ArbitrationState>,
    head: Res<HeadPose>,
    proxy: Option<Res<CollisionProxy>>,
    mut dolly: Query<&mut Transform, With<Dolly>>,
    mut tick: ResMut<LocomotionTick>,
) {
    tick.moved = false;

    let mut frame = match dolly.single_mut() {
        Ok(frame) => frame,
        Err(err) => {
            logger::log(&format!("drive_locomotion: no single dolly ({})", err));
            return;
        }
    };

    let current = arbitration.current;
    let dt = time.delta_secs().min(config.locomotion.max_dt);

    if current.should_evaluate {
        let step = LocomotionStep {
            intent: current.intent,
            dt,
            head_rotation: head.rotation,
        };
        let proxy = proxy.as_deref().map(|proxy| proxy as &dyn SpatialQuery);

        *frame = advance(*frame, &step, proxy, &config.locomotion);
        tick.moved = true;
    }

    // Joystick поворачивает и на месте (forward == 0)
    if current.intent.source == MovementSource::Joystick {
        *frame = apply_yaw(*frame, &current.intent, dt);
    }
}
