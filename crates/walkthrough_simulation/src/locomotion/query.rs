//! Spatial Query Service - ray casts против статической геометрии
//!
//! Сама геометрия пересечений живёт в rapier (parry) через `Collider::cast_ray`,
//! здесь только adapter'ы к одному интерфейсу `SpatialQuery`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

/// Дальность ray cast (Raycaster без far limit → просто большая константа)
pub const MAX_RAY_DISTANCE: f32 = 10_000.0;

/// Ближайшее пересечение луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Дистанция от origin (в единицах мира, direction нормализован)
    pub distance: f32,
    /// Точка пересечения (world coordinates)
    pub point: Vec3,
    /// Entity которую задел луч (None для proxy без identity)
    pub entity: Option<Entity>,
}

/// Ray cast capability (nearest-first, отдаём только ближайший hit)
///
/// Core никогда не считает пересечения сам - только спрашивает.
pub trait SpatialQuery {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit>;
}

/// Collision Proxy - невидимая упрощённая геометрия стен/пола
///
/// Публикуется scene loader'ом как resource целиком (replace между тиками).
/// Нет resource → locomotion выключен.
#[derive(Resource, Clone)]
pub struct CollisionProxy {
    pub collider: Collider,
    pub transform: Transform,
}

impl CollisionProxy {
    pub fn new(collider: Collider, transform: Transform) -> Self {
        Self { collider, transform }
    }

    /// Proxy в origin мира (типичный случай: geometry уже в world space)
    pub fn at_origin(collider: Collider) -> Self {
        Self::new(collider, Transform::IDENTITY)
    }
}

impl SpatialQuery for CollisionProxy {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        cast_collider(&self.collider, &self.transform, origin, direction).map(|(distance, point)| {
            RayHit {
                distance,
                point,
                entity: None,
            }
        })
    }
}

/// Набор interactable объектов (для pointer highlight)
///
/// В отличие от proxy, сообщает какую entity задел луч.
pub struct InteractableSet<'a> {
    items: Vec<(Entity, &'a Collider, Transform)>,
}

impl<'a> InteractableSet<'a> {
    pub fn new(items: impl IntoIterator<Item = (Entity, &'a Collider, Transform)>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SpatialQuery for InteractableSet<'_> {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        self.items
            .iter()
            .filter_map(|(entity, collider, transform)| {
                cast_collider(collider, transform, origin, direction).map(|(distance, point)| {
                    RayHit {
                        distance,
                        point,
                        entity: Some(*entity),
                    }
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Один ray cast через rapier collider
///
/// solid = true: origin внутри солида → hit на дистанции 0 (стоим в стене = blocked).
fn cast_collider(
    collider: &Collider,
    transform: &Transform,
    origin: Vec3,
    direction: Vec3,
) -> Option<(f32, Vec3)> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    collider
        .cast_ray(
            transform.translation,
            transform.rotation,
            origin,
            direction,
            MAX_RAY_DISTANCE,
            true,
        )
        .map(|distance| (distance, origin + direction * distance))
}
