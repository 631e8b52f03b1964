//! Tests for locomotion solver.
//!
//! Аналитические бесконечные плоскости вместо rapier - точные дистанции.
//! Rapier proxy только там, где нужен настоящий солид (перекрытие этажа).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use bevy_rapier3d::prelude::Collider;
    use std::f32::consts::FRAC_PI_2;

    use crate::config::LocomotionConfig;
    use crate::input::{MovementIntent, MovementSource};
    use crate::locomotion::query::{CollisionProxy, RayHit, SpatialQuery};
    use crate::locomotion::solver::{advance, apply_yaw, LocomotionStep};

    /// Плоскость: точка + нормаль (смотрит в сторону viewer'а)
    struct Plane {
        point: Vec3,
        normal: Vec3,
    }

    struct PlaneProxy {
        planes: Vec<Plane>,
    }

    impl PlaneProxy {
        fn new() -> Self {
            Self { planes: Vec::new() }
        }

        fn with(mut self, point: Vec3, normal: Vec3) -> Self {
            self.planes.push(Plane { point, normal });
            self
        }

        fn floor(self, y: f32) -> Self {
            self.with(Vec3::new(0.0, y, 0.0), Vec3::Y)
        }
    }

    impl SpatialQuery for PlaneProxy {
        fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
            let direction = direction.normalize_or_zero();
            self.planes
                .iter()
                .filter_map(|plane| {
                    let denom = plane.normal.dot(direction);
                    if denom >= -1e-6 {
                        return None; // Параллельно или с обратной стороны
                    }
                    let distance = plane.normal.dot(plane.point - origin) / denom;
                    (distance >= 0.0).then(|| RayHit {
                        distance,
                        point: origin + direction * distance,
                        entity: None,
                    })
                })
                .min_by(|a, b| a.distance.total_cmp(&b.distance))
        }
    }

    /// Отвечает только на лучи вниз, фиксированной высотой пола
    struct FixedFloor {
        height: f32,
    }

    impl SpatialQuery for FixedFloor {
        fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
            (direction.y < 0.0).then(|| RayHit {
                distance: origin.y - self.height,
                point: Vec3::new(origin.x, self.height, origin.z),
                entity: None,
            })
        }
    }

    fn joystick(forward: f32, turn: f32, dt: f32) -> LocomotionStep {
        LocomotionStep {
            intent: MovementIntent {
                forward,
                turn,
                source: MovementSource::Joystick,
            },
            dt,
            head_rotation: Quat::IDENTITY,
        }
    }

    fn pose(head_rotation: Quat, dt: f32) -> LocomotionStep {
        LocomotionStep {
            intent: MovementIntent::idle(MovementSource::Pose),
            dt,
            head_rotation,
        }
    }

    fn config() -> LocomotionConfig {
        LocomotionConfig::default() // wall_limit 1.3, speed 2.0, eye 1.0
    }

    #[test]
    fn test_no_proxy_is_noop() {
        let frame = Transform::from_xyz(1.0, 0.0, 3.0).with_rotation(Quat::from_rotation_y(0.7));

        let moved = advance(frame, &joystick(1.0, 2.0, 0.5), None, &config());
        assert_eq!(moved, frame);

        let moved = advance(frame, &pose(Quat::from_rotation_y(-1.0), 0.5), None, &config());
        assert_eq!(moved, frame);
    }

    #[test]
    fn test_wall_ahead_blocks_forward() {
        // Стена в 1.0 от глаз, wall_limit 1.3
        let proxy = PlaneProxy::new()
            .floor(0.0)
            .with(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);

        let moved = advance(Transform::IDENTITY, &joystick(1.0, 0.0, 0.5), Some(&proxy), &config());

        assert_eq!(moved.translation.z, 0.0);
        assert_eq!(moved.translation.x, 0.0);
    }

    #[test]
    fn test_free_path_moves_speed_times_dt() {
        let proxy = PlaneProxy::new()
            .floor(0.0)
            .with(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);

        let moved = advance(Transform::IDENTITY, &joystick(1.0, 0.0, 0.5), Some(&proxy), &config());

        assert!((moved.translation.z + 1.0).abs() < 1e-5, "z = {}", moved.translation.z);
        assert_eq!(moved.translation.y, 0.0);
    }

    #[test]
    fn test_joystick_backward_uses_signed_speed() {
        let proxy = PlaneProxy::new().floor(0.0);

        let moved = advance(Transform::IDENTITY, &joystick(-1.0, 0.0, 0.5), Some(&proxy), &config());

        assert!((moved.translation.z - 1.0).abs() < 1e-5, "z = {}", moved.translation.z);
        assert_eq!(moved.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_joystick_backward_checks_wall_behind() {
        let proxy = PlaneProxy::new()
            .floor(0.0)
            .with(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);

        let moved = advance(Transform::IDENTITY, &joystick(-1.0, 0.0, 0.5), Some(&proxy), &config());

        assert_eq!(moved.translation.z, 0.0);
    }

    #[test]
    fn test_lateral_push_from_left_wall() {
        let proxy = PlaneProxy::new()
            .floor(0.0)
            .with(Vec3::new(-1.0, 0.0, 0.0), Vec3::X);

        // dt = 0: коррекция работает и без движения
        let moved = advance(Transform::IDENTITY, &joystick(1.0, 0.0, 0.0), Some(&proxy), &config());

        assert!((moved.translation.x - 0.3).abs() < 1e-5, "x = {}", moved.translation.x);

        let eye = moved.translation + Vec3::Y;
        let after = proxy.raycast(eye, Vec3::NEG_X).unwrap();
        assert!(after.distance >= config().wall_limit - 1e-4, "distance = {}", after.distance);
    }

    #[test]
    fn test_lateral_push_from_right_wall() {
        let proxy = PlaneProxy::new()
            .floor(0.0)
            .with(Vec3::new(0.5, 0.0, 0.0), Vec3::NEG_X);

        let moved = advance(Transform::IDENTITY, &joystick(1.0, 0.0, 0.0), Some(&proxy), &config());

        assert!((moved.translation.x + 0.8).abs() < 1e-5, "x = {}", moved.translation.x);
    }

    #[test]
    fn test_lateral_invariant_for_rotated_dolly() {
        let proxy = PlaneProxy::new()
            .floor(0.0)
            .with(Vec3::new(-1.0, 0.0, 0.0), Vec3::X);

        for yaw in [-0.6_f32, -0.3, 0.0, 0.4, 0.8] {
            let frame = Transform::from_rotation(Quat::from_rotation_y(yaw));
            let moved = advance(frame, &joystick(1.0, 0.0, 0.0), Some(&proxy), &config());

            let left = -*moved.right();
            let after = proxy.raycast(moved.translation + Vec3::Y, left).unwrap();
            assert!(
                after.distance >= config().wall_limit - 1e-4,
                "yaw {}: distance {}",
                yaw,
                after.distance
            );
        }
    }

    #[test]
    fn test_floor_snap_is_exact() {
        let proxy = FixedFloor { height: 0.4321 };
        let frame = Transform::from_xyz(2.0, 0.9, -3.0);

        let moved = advance(frame, &joystick(1.0, 0.0, 0.1), Some(&proxy), &config());

        assert_eq!(moved.translation.y, 0.4321);
    }

    #[test]
    fn test_floor_snap_follows_step_up() {
        // Ступенька 0.2 над текущей высотой (probe стартует с +1.5)
        let proxy = PlaneProxy::new().floor(0.2);

        let moved = advance(Transform::IDENTITY, &joystick(1.0, 0.0, 0.1), Some(&proxy), &config());

        assert!((moved.translation.y - 0.2).abs() < 1e-5, "y = {}", moved.translation.y);
    }

    #[test]
    fn test_low_ceiling_does_not_capture_floor_snap() {
        // Пол (верх на y = 0) + перекрытие следующего этажа 2.4..2.7
        let proxy = CollisionProxy::at_origin(Collider::compound(vec![
            (Vec3::new(0.0, -0.05, 0.0), Quat::IDENTITY, Collider::cuboid(10.0, 0.05, 10.0)),
            (Vec3::new(0.0, 2.55, 0.0), Quat::IDENTITY, Collider::cuboid(10.0, 0.15, 10.0)),
        ]));

        let moved = advance(Transform::IDENTITY, &joystick(1.0, 0.0, 0.1), Some(&proxy), &config());

        assert!(moved.translation.y.abs() < 1e-4, "y = {}", moved.translation.y);
        assert!((moved.translation.z + 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_no_floor_keeps_height() {
        let proxy = PlaneProxy::new();
        let frame = Transform::from_xyz(0.0, 5.0, 0.0);

        let moved = advance(frame, &joystick(1.0, 0.0, 0.5), Some(&proxy), &config());

        assert_eq!(moved.translation.y, 5.0);
    }

    #[test]
    fn test_pose_moves_along_head_and_restores_rotation() {
        let proxy = PlaneProxy::new().floor(0.0);
        let dolly_rotation = Quat::from_rotation_y(0.25);
        let frame = Transform::from_rotation(dolly_rotation);

        // Голова повернута на 90° влево: forward = -X
        let head = Quat::from_rotation_y(FRAC_PI_2);
        let moved = advance(frame, &pose(head, 0.5), Some(&proxy), &config());

        assert!((moved.translation.x + 1.0).abs() < 1e-5, "x = {}", moved.translation.x);
        assert!(moved.translation.z.abs() < 1e-5);
        assert_eq!(moved.rotation, dolly_rotation);
    }

    #[test]
    fn test_pose_blocked_by_wall_in_gaze_direction() {
        let proxy = PlaneProxy::new()
            .floor(0.0)
            .with(Vec3::new(-1.2, 0.0, 0.0), Vec3::X);

        let head = Quat::from_rotation_y(FRAC_PI_2);
        let moved = advance(Transform::IDENTITY, &pose(head, 0.5), Some(&proxy), &config());

        // Не прошли вперёд (-X); lateral лучи смотрят вдоль ±Z и стену не видят
        assert_eq!(moved.translation.x, 0.0);
    }

    #[test]
    fn test_gaze_source_follows_head() {
        let proxy = PlaneProxy::new().floor(0.0);
        let step = LocomotionStep {
            intent: MovementIntent::idle(MovementSource::Gaze),
            dt: 0.5,
            head_rotation: Quat::from_rotation_y(-FRAC_PI_2), // forward = +X
        };

        let moved = advance(Transform::IDENTITY, &step, Some(&proxy), &config());

        assert!((moved.translation.x - 1.0).abs() < 1e-5);
        assert_eq!(moved.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_advance_is_deterministic() {
        let proxy = PlaneProxy::new()
            .floor(0.0)
            .with(Vec3::new(-1.0, 0.0, 0.0), Vec3::X)
            .with(Vec3::new(0.0, 0.0, -4.0), Vec3::Z);
        let step = joystick(1.0, 0.3, 0.016);

        let mut a = Transform::from_rotation(Quat::from_rotation_y(0.2));
        let mut b = a;
        for _ in 0..200 {
            a = apply_yaw(advance(a, &step, Some(&proxy), &config()), &step.intent, step.dt);
            b = apply_yaw(advance(b, &step, Some(&proxy), &config()), &step.intent, step.dt);
        }

        assert_eq!(a, b);
    }

    #[test]
    fn test_apply_yaw_only_for_joystick() {
        let frame = Transform::IDENTITY;

        let turned = apply_yaw(frame, &joystick(0.0, 1.0, 0.5).intent, 0.5);
        let expected = Quat::from_rotation_y(0.5);
        assert!(turned.rotation.angle_between(expected) < 1e-5);

        let pose_intent = MovementIntent {
            turn: 1.0,
            ..MovementIntent::idle(MovementSource::Pose)
        };
        assert_eq!(apply_yaw(frame, &pose_intent, 0.5), frame);
    }
}
