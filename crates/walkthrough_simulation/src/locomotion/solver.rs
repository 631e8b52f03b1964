//! Locomotion Solver - collision-aware перемещение dolly
//!
//! Алгоритм одного тика (только когда arbitration сказал should_evaluate):
//! 1. Направление: по голове (Pose/Gaze) или по dolly (Joystick, знак из forward)
//! 2. Forward ray с eye height: hit < wall_limit → вперёд не двигаемся вообще
//! 3. Lateral rays (left/right): жёсткая коррекция на wall_limit - distance
//! 4. Floor ray вниз с floor_probe_height над ногами: y = точка пола (snap)
//! 5. Pose/Gaze: rotation возвращается как было (ею владеет head tracking)
//!
//! Детерминизм: одинаковые входы → одинаковый Transform. Gravity нет.

use bevy::prelude::*;

use super::query::SpatialQuery;
use crate::config::LocomotionConfig;
use crate::input::{MovementIntent, MovementSource};

/// Входы одного шага solver'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStep {
    pub intent: MovementIntent,
    /// Уже clamped caller'ом
    pub dt: f32,
    /// World rotation головы (для Pose/Gaze)
    pub head_rotation: Quat,
}

/// Один шаг locomotion. Нет proxy → frame без изменений.
pub fn advance(
    frame: Transform,
    step: &LocomotionStep,
    proxy: Option<&dyn SpatialQuery>,
    config: &LocomotionConfig,
) -> Transform {
    let Some(proxy) = proxy else {
        return frame;
    };

    let original_rotation = frame.rotation;
    let mut frame = frame;

    // Signed speed вместо отрицательного dt: назад = отрицательная скорость
    let signed_speed = if step.intent.source.follows_head() {
        // Rotation временно от головы - только чтобы посчитать направления лучей
        frame.rotation = step.head_rotation;
        config.speed
    } else if step.intent.forward > 0.0 {
        config.speed
    } else {
        -config.speed
    };

    let forward = *frame.forward();
    let heading = if signed_speed >= 0.0 { forward } else { -forward };

    // 2. Forward: blocked целиком, без скольжения вдоль стены
    let blocked = proxy
        .raycast(eye_point(&frame, config), heading)
        .is_some_and(|hit| hit.distance < config.wall_limit);

    if !blocked {
        frame.translation += forward * signed_speed * step.dt;
    }

    // 3. Lateral: оба луча с eye height позиции после шага 2, коррекция даже без движения
    let origin = eye_point(&frame, config);
    let right = *frame.right();
    let left_hit = proxy.raycast(origin, -right);
    let right_hit = proxy.raycast(origin, right);

    if let Some(hit) = left_hit.filter(|hit| hit.distance < config.wall_limit) {
        frame.translation += right * (config.wall_limit - hit.distance);
    }
    if let Some(hit) = right_hit.filter(|hit| hit.distance < config.wall_limit) {
        frame.translation -= right * (config.wall_limit - hit.distance);
    }

    // 4. Floor snap: probe от ног, не от eye point
    let probe = frame.translation + Vec3::Y * config.floor_probe_height;
    if let Some(hit) = proxy.raycast(probe, Vec3::NEG_Y) {
        frame.translation.y = hit.point.y;
    }

    // 5. Rotation для Pose/Gaze принадлежит head tracking
    if step.intent.source.follows_head() {
        frame.rotation = original_rotation;
    }

    frame
}

/// Joystick yaw (turn × dt) - единственный случай когда solver вращает dolly
pub fn apply_yaw(frame: Transform, intent: &MovementIntent, dt: f32) -> Transform {
    if intent.source != MovementSource::Joystick || intent.turn == 0.0 {
        return frame;
    }

    let mut frame = frame;
    frame.rotate_local_y(intent.turn * dt);
    frame
}

/// Origin forward/lateral лучей: dolly + eye height
fn eye_point(frame: &Transform, config: &LocomotionConfig) -> Vec3 {
    frame.translation + Vec3::Y * config.eye_height
}
