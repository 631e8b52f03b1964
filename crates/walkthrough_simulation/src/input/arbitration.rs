//! Input Arbitration - кто управляет движением в этом тике
//!
//! Приоритет:
//! 1. Joystick (desktop / on-screen stick) - intent как есть
//! 2. Immersive: select зажат / gaze Move / continuity → движение по голове
//! 3. Иначе нулевой intent, движение не считаем

use bevy::prelude::*;

use super::gaze::GazeMode;

/// Источник движения (он же владелец rotation в этом тике)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum MovementSource {
    /// Движение по направлению головы (HMD), rotation у head tracking
    Pose,
    /// On-screen joystick, solver сам применяет yaw
    Joystick,
    /// Gaze dwell, направление тоже по голове
    Gaze,
}

impl MovementSource {
    /// Направление берём из head pose (а не из dolly)
    pub fn follows_head(&self) -> bool {
        matches!(self, Self::Pose | Self::Gaze)
    }
}

/// Movement intent на один тик (не сохраняется между тиками)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct MovementIntent {
    /// [-1, 1]: > 0 вперёд, <= 0 назад (только joystick)
    pub forward: f32,
    /// Yaw rate (рад/сек), > 0 против часовой стрелки (только joystick)
    pub turn: f32,
    pub source: MovementSource,
}

impl MovementIntent {
    pub fn idle(source: MovementSource) -> Self {
        Self {
            forward: 0.0,
            turn: 0.0,
            source,
        }
    }
}

/// On-screen joystick (существует только вне immersive)
///
/// Resource есть → joystick подключен. Значения пишет UI collaborator.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Joystick {
    pub forward: f32,
    pub turn: f32,
}

/// Всё, что arbitration читает за тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitrationInput {
    pub joystick: Option<Joystick>,
    pub immersive: bool,
    /// Хоть один подключенный controller держит select
    pub any_controller_pressed: bool,
    /// Some только когда gaze fallback активен и eligible
    pub gaze_mode: Option<GazeMode>,
    /// Прошлый тик был запущен input'ом (press / gaze)
    pub continuity: bool,
}

/// Результат arbitration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arbitration {
    pub intent: MovementIntent,
    pub should_evaluate: bool,
    /// Движение запущено press/gaze (а не continuity) → continuity следующего тика
    pub triggered_by_input: bool,
}

impl Default for Arbitration {
    fn default() -> Self {
        Self {
            intent: MovementIntent::idle(MovementSource::Pose),
            should_evaluate: false,
            triggered_by_input: false,
        }
    }
}

/// Arbitration state между тиками (resource)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ArbitrationState {
    pub current: Arbitration,
    pub continuity: bool,
}

pub fn arbitrate(input: &ArbitrationInput) -> Arbitration {
    if let Some(joystick) = input.joystick {
        return Arbitration {
            intent: MovementIntent {
                forward: joystick.forward,
                turn: joystick.turn,
                source: MovementSource::Joystick,
            },
            should_evaluate: joystick.forward != 0.0,
            triggered_by_input: false,
        };
    }

    if !input.immersive {
        return Arbitration::default();
    }

    let gaze_move = input.gaze_mode == Some(GazeMode::Move);
    let triggered_by_input = input.any_controller_pressed || gaze_move;

    // Controller важнее gaze: при зажатом select источник - pose
    let source = if gaze_move && !input.any_controller_pressed {
        MovementSource::Gaze
    } else {
        MovementSource::Pose
    };

    Arbitration {
        intent: MovementIntent::idle(source),
        should_evaluate: triggered_by_input || input.continuity,
        triggered_by_input,
    }
}
