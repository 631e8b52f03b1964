//! Proximity Trigger - какой landmark показывать
//!
//! Правила:
//! - Идём по таблице в её порядке, первый landmark ближе threshold = candidate
//!   (первый по порядку, НЕ ближайший - при перекрытии радиусов решает таблица)
//! - candidate != active → Enter
//! - candidate == active → ничего (idempotent пока стоим рядом)
//! - candidate нет, active был → Leave
//! - Landmark без scene node пропускается

use bevy::prelude::*;
use std::collections::HashMap;

use super::landmarks::LandmarkTable;

/// Scene lookup: имя node → world position
pub trait LandmarkLocator {
    fn locate(&self, name: &str) -> Option<Vec3>;
}

impl LandmarkLocator for HashMap<String, Vec3> {
    fn locate(&self, name: &str) -> Option<Vec3> {
        self.get(name).copied()
    }
}

/// Переход active landmark
#[derive(Debug, Clone, PartialEq)]
pub enum ProximityEvent {
    Enter {
        key: String,
        /// World position landmark node (для размещения панели)
        position: Vec3,
    },
    Leave {
        key: String,
    },
}

/// Результат одного evaluate
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProximityOutcome {
    pub active: Option<String>,
    pub event: Option<ProximityEvent>,
    /// Сколько landmarks оказались в радиусе (> 1 = радиусы перекрываются)
    pub contenders: usize,
}

pub fn evaluate(
    viewer_position: Vec3,
    table: &LandmarkTable,
    locator: &impl LandmarkLocator,
    active: Option<&str>,
    threshold: f32,
) -> ProximityOutcome {
    let mut candidate: Option<(&str, Vec3)> = None;
    let mut contenders = 0;

    for landmark in table.iter() {
        let Some(position) = locator.locate(&landmark.key) else {
            continue;
        };

        if viewer_position.distance(position) < threshold {
            contenders += 1;
            if candidate.is_none() {
                candidate = Some((landmark.key.as_str(), position));
            }
        }
    }

    let event = match (candidate, active) {
        (Some((key, _)), Some(current)) if key == current => None,
        (Some((key, position)), _) => Some(ProximityEvent::Enter {
            key: key.to_string(),
            position,
        }),
        (None, Some(current)) => Some(ProximityEvent::Leave {
            key: current.to_string(),
        }),
        (None, None) => None,
    };

    ProximityOutcome {
        active: candidate.map(|(key, _)| key.to_string()),
        event,
        contenders,
    }
}
