//! Interaction domain - pointer highlight
//!
//! Пока tracked-pointer controller держит select, луч из controller'а
//! (его -Z) подсвечивает ближайший Interactable. Отпустили / промах → гаснет.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use crate::input::{DeviceKind, SelectionState, XrController};
use crate::locomotion::{InteractableSet, SpatialQuery};
use crate::WalkthroughSet;

/// Маркер: объект можно подсветить (нужны Collider + Transform)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Interactable;

/// Текущая подсветка (resource)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    pub target: Option<Entity>,
}

/// Event: подсветка сменилась (None = скрыть)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightChanged {
    pub target: Option<Entity>,
}

/// Что подсвечивать для pointer pose (None pointer = никто не держит select)
pub fn pick_highlight(pointer: Option<&Transform>, scene: &dyn SpatialQuery) -> Option<Entity> {
    let pointer = pointer?;
    scene
        .raycast(pointer.translation, *pointer.forward())
        .and_then(|hit| hit.entity)
}

/// Система: pointer highlight
pub fn update_pointer_highlight(
    controllers: Query<(&XrController, &SelectionState, &Transform)>,
    interactables: Query<(Entity, &Collider, &Transform), With<Interactable>>,
    mut highlight: ResMut<Highlight>,
    mut changed: EventWriter<HighlightChanged>,
) {
    // Первый по device id pointer с зажатым select
    let pointer = controllers
        .iter()
        .filter(|(controller, selection, _)| {
            controller.connected
                && controller.kind == DeviceKind::TrackedPointer
                && selection.is_pressed()
        })
        .min_by_key(|(controller, ..)| controller.device)
        .map(|(_, _, transform)| transform);

    let scene = InteractableSet::new(
        interactables
            .iter()
            .map(|(entity, collider, transform)| (entity, collider, *transform)),
    );
    let target = pick_highlight(pointer, &scene);

    if highlight.target != target {
        highlight.target = target;
        changed.write(HighlightChanged { target });
    }
}

/// Interaction Plugin
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HighlightChanged>()
            .init_resource::<Highlight>();

        app.add_systems(
            Update,
            update_pointer_highlight.in_set(WalkthroughSet::Interaction),
        );
    }
}
