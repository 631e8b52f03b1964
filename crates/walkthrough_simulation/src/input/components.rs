//! Input device компоненты: controller slot, selection state, affordance

use bevy::prelude::*;

/// Индекс controller slot (XR API отдаёт 0 и 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct DeviceId(pub u8);

/// Target ray mode устройства (приходит с `connected`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DeviceKind {
    /// Hand controller с лучом (Quest, Vive)
    TrackedPointer,
    /// Gaze-only устройство (Cardboard-style)
    Gaze,
    /// Touch screen / mouse в immersive
    Screen,
}

/// Controller slot
///
/// Entity создаётся заранее для каждого slot (как getController(i)),
/// `connected` переключают XrInputEvent'ы.
/// Transform = world pose target ray (обновляет XR collaborator).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct XrController {
    pub device: DeviceId,
    pub kind: DeviceKind,
    pub connected: bool,
}

impl XrController {
    pub fn new(device: DeviceId) -> Self {
        Self {
            device,
            kind: DeviceKind::TrackedPointer,
            connected: false,
        }
    }
}

/// Selection state устройства (trigger / select button)
///
/// Два состояния, без очереди: важно только последнее.
/// - Idle → Pressed: select start
/// - Pressed → Idle: select end ИЛИ disconnect
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum SelectionState {
    Idle,
    Pressed,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl SelectionState {
    pub fn press(&mut self) {
        *self = Self::Pressed;
    }

    pub fn release(&mut self) {
        *self = Self::Idle;
    }

    /// Disconnect эквивалентен release (устройство пропало с зажатой кнопкой)
    pub fn disconnect(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self, Self::Pressed)
    }
}

/// Какой визуальный affordance висит на устройстве
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AffordanceKind {
    /// Фонарик: виден только пока select зажат
    Spotlight,
    /// Кольцо-прицел gaze устройства: виден пока подключено
    Reticle,
    None,
}

/// Визуальный affordance устройства (рисует rendering collaborator)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Affordance {
    pub kind: AffordanceKind,
    pub visible: bool,
}

impl Default for Affordance {
    fn default() -> Self {
        Self {
            kind: AffordanceKind::None,
            visible: false,
        }
    }
}

impl Affordance {
    /// Affordance сразу после `connected`
    pub fn for_kind(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::TrackedPointer => Self {
                kind: AffordanceKind::Spotlight,
                visible: false,
            },
            DeviceKind::Gaze => Self {
                kind: AffordanceKind::Reticle,
                visible: true,
            },
            DeviceKind::Screen => Self::default(),
        }
    }

    /// Синхронизировать с selection (spotlight следует за кнопкой)
    pub fn on_selection(&mut self, selection: SelectionState) {
        if self.kind == AffordanceKind::Spotlight {
            self.visible = selection.is_pressed();
        }
    }

    /// Disconnect снимает всё, что было прикреплено к устройству
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
