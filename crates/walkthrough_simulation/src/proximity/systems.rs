//! Proximity systems (Update, WalkthroughSet::Proximity)

use bevy::prelude::*;
use std::collections::HashMap;

use super::events::{LandmarkEntered, LandmarkLeft, PanelPlacement};
use super::landmarks::LandmarkTable;
use super::trigger::{evaluate, ProximityEvent};
use crate::config::WalkthroughConfig;
use crate::input::HeadPose;
use crate::locomotion::{Dolly, LocomotionTick};
use crate::logger;

/// Текущий показанный landmark (максимум один)
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveLandmark {
    pub key: Option<String>,
}

/// Система: proximity check после движения
///
/// Только в тиках где locomotion реально считался.
/// Нет таблицы (ещё не загружена / load failed) → пропускаем.
pub fn trigger_proximity(
    config: Res<WalkthroughConfig>,
    tick: Res<LocomotionTick>,
    table: Option<Res<LandmarkTable>>,
    head: Res<HeadPose>,
    nodes: Query<(Entity, &Name), Without<Dolly>>,
    transforms: Query<(&Transform, Option<&ChildOf>)>,
    dolly: Query<&Transform, With<Dolly>>,
    mut active: ResMut<ActiveLandmark>,
    mut entered: EventWriter<LandmarkEntered>,
    mut left: EventWriter<LandmarkLeft>,
) {
    if !tick.moved {
        return;
    }
    let Some(table) = table else {
        return;
    };
    let Ok(viewer) = dolly.single() else {
        return;
    };

    // Scene lookup по имени node; при дублях имени побеждает первый
    let mut scene: HashMap<String, Vec3> = HashMap::new();
    for (entity, name) in nodes.iter() {
        if table.get(name.as_str()).is_none() || scene.contains_key(name.as_str()) {
            continue;
        }
        if let Some(position) = world_translation(entity, &transforms) {
            scene.insert(name.as_str().to_string(), position);
        }
    }

    let outcome = evaluate(
        viewer.translation,
        &table,
        &scene,
        active.key.as_deref(),
        config.proximity.threshold,
    );

    if outcome.contenders > 1 {
        logger::log(&format!(
            "Proximity: {} landmarks in range, showing first in table order ({:?})",
            outcome.contenders, outcome.active
        ));
    }

    match outcome.event {
        Some(ProximityEvent::Enter { key, position }) => {
            if let Some(landmark) = table.get(&key) {
                logger::log_info(&format!("Landmark entered: {} ({})", key, landmark.display_name));
                entered.write(LandmarkEntered {
                    key,
                    display_name: landmark.display_name.clone(),
                    info: landmark.info.clone(),
                    panel: PanelPlacement::above(
                        position,
                        config.proximity.panel_height_offset,
                        head.position,
                    ),
                });
            }
        }
        Some(ProximityEvent::Leave { key }) => {
            logger::log_info(&format!("Landmark left: {}", key));
            left.write(LandmarkLeft { key });
        }
        None => {}
    }

    active.key = outcome.active;
}

/// World position node: локальный Transform, поднятый по цепочке ChildOf
///
/// Landmarks обычно вложены в загруженную сцену, их Transform локальный.
/// Не зависит от TransformPlugin (headless app без GlobalTransform propagation).
pub fn world_translation(
    entity: Entity,
    transforms: &Query<(&Transform, Option<&ChildOf>)>,
) -> Option<Vec3> {
    let (transform, mut parent) = transforms.get(entity).ok()?;
    let mut world = *transform;

    while let Some(child_of) = parent {
        // Родитель без Transform = корень иерархии
        let Ok((parent_transform, next)) = transforms.get(child_of.parent()) else {
            break;
        };
        world = parent_transform.mul_transform(world);
        parent = next;
    }

    Some(world.translation)
}
