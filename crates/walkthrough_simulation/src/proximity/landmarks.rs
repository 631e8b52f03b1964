//! Landmark Table - точки интереса с текстом для info panel
//!
//! JSON формат (ключ = имя scene node):
//! ```json
//! {
//!   "Lobby": { "name": "Main Lobby", "info": "Reception and visitor desk" },
//!   "Library": { "name": "Library", "info": "Open 8am - 10pm" }
//! }
//! ```
//! Порядок документа сохраняется (serde_json preserve_order),
//! proximity trigger берёт первый подходящий landmark в этом порядке.

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LandmarkTableError {
    #[error("landmark table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("landmark table must be a JSON object keyed by scene node name")]
    NotAnObject,

    #[error("landmark '{key}' has an invalid entry: {source}")]
    InvalidEntry {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Запись как она лежит в JSON
#[derive(Debug, Clone, Deserialize)]
struct LandmarkEntry {
    name: String,
    #[serde(default)]
    info: String,
}

/// Landmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landmark {
    /// Уникальный ключ = имя scene node (по нему ищем позицию)
    pub key: String,
    /// Заголовок панели
    pub display_name: String,
    /// Текст панели
    pub info: String,
}

impl Landmark {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            info: info.into(),
        }
    }
}

/// Таблица landmarks (resource, заменяется только целиком)
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct LandmarkTable {
    entries: Vec<Landmark>,
}

impl LandmarkTable {
    /// Повторный key заменяет прежнюю запись на её месте
    pub fn new(landmarks: impl IntoIterator<Item = Landmark>) -> Self {
        let mut entries: Vec<Landmark> = Vec::new();
        for landmark in landmarks {
            match entries.iter_mut().find(|existing| existing.key == landmark.key) {
                Some(existing) => *existing = landmark,
                None => entries.push(landmark),
            }
        }
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self, LandmarkTableError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(map) = value else {
            return Err(LandmarkTableError::NotAnObject);
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, raw) in map {
            let entry: LandmarkEntry = serde_json::from_value(raw).map_err(|source| {
                LandmarkTableError::InvalidEntry {
                    key: key.clone(),
                    source,
                }
            })?;
            entries.push(Landmark {
                key,
                display_name: entry.name,
                info: entry.info,
            });
        }

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Landmark> {
        self.entries.iter().find(|landmark| landmark.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
