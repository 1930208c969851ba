//! Durable storage for per-type guide placements.
//!
//! Placements are stored as one JSON object keyed by guide type:
//! `{"portrait": {"x": 50, "y": 50, "scale": 1}, "couple": {...}, ...}`.
//! Reading is lenient record by record so one bad entry never discards the
//! others.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::Result;
use crate::guide::{GuidePlacement, GuideType, SavedPlacements};

pub trait PlacementStore {
    fn load(&mut self) -> Result<SavedPlacements>;
    fn save(&mut self, placements: &SavedPlacements) -> Result<()>;
}

/// Decode a stored document. Missing or malformed records take the default
/// placement; out-of-range values are clamped.
pub fn decode(json: &str) -> SavedPlacements {
    let mut saved = SavedPlacements::default();
    let map = match serde_json::from_str::<Map<String, Value>>(json) {
        Ok(map) => map,
        Err(e) => {
            log::warn!("Discarding unreadable guide positions: {}", e);
            return saved;
        }
    };

    for guide in GuideType::ALL.into_iter().filter(GuideType::is_visible) {
        let Some(record) = map.get(guide.key()) else {
            continue;
        };
        match serde_json::from_value::<GuidePlacement>(record.clone()) {
            Ok(placement) => {
                saved.set(guide, placement);
            }
            Err(e) => log::warn!("Ignoring corrupt {} placement: {}", guide.key(), e),
        }
    }
    saved
}

pub fn encode(saved: &SavedPlacements) -> Result<String> {
    let mut map = Map::new();
    for guide in GuideType::ALL {
        if let Some(placement) = saved.get(guide) {
            map.insert(guide.key().to_owned(), serde_json::to_value(placement)?);
        }
    }
    Ok(serde_json::to_string_pretty(&Value::Object(map))?)
}

/// Placements kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlacementStore for JsonFileStore {
    /// A missing file is not an error: it yields the defaults.
    fn load(&mut self) -> Result<SavedPlacements> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                log::info!("Loaded guide positions from {:?}", self.path);
                Ok(decode(&content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No guide positions at {:?}, using defaults", self.path);
                Ok(SavedPlacements::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, placements: &SavedPlacements) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, encode(placements)?)?;
        log::debug!("Saved guide positions to {:?}", self.path);
        Ok(())
    }
}

/// In-process store; nothing outlives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    placements: SavedPlacements,
    writes: usize,
}

impl MemoryStore {
    pub fn new(placements: SavedPlacements) -> Self {
        Self {
            placements,
            writes: 0,
        }
    }

    pub fn placements(&self) -> &SavedPlacements {
        &self.placements
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PlacementStore for MemoryStore {
    fn load(&mut self) -> Result<SavedPlacements> {
        Ok(self.placements)
    }

    fn save(&mut self, placements: &SavedPlacements) -> Result<()> {
        self.placements = *placements;
        self.writes += 1;
        Ok(())
    }
}
