//! Seed data loaded from a JSON file at startup.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{LegKind, LocationId, NewLeg, NewLocation};

use super::error::StoreError;
use super::memory::Store;

/// Contents of a seed file.
///
/// Transportations name their endpoints rather than using ids, since ids
/// are only assigned on insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub locations: Vec<SeedLocation>,
    #[serde(default)]
    pub transportations: Vec<SeedTransportation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTransportation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LegKind,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration_in_minutes: Option<f64>,
}

impl SeedFile {
    /// Read and parse a seed file.
    pub fn read(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path).map_err(|e| StoreError::Seed {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&contents).map_err(|e| StoreError::Seed {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }
}

impl Store {
    /// Insert every record of a seed file, locations first.
    ///
    /// Returns the number of locations and transportations added. Stops at
    /// the first record the store rejects; records before it stay inserted.
    pub async fn apply_seed(&self, seed: SeedFile) -> Result<(usize, usize), StoreError> {
        let mut ids: HashMap<String, LocationId> = HashMap::new();

        for location in seed.locations {
            let stored = self
                .create_location(NewLocation::new(
                    location.name,
                    location.latitude,
                    location.longitude,
                ))
                .await?;
            ids.insert(stored.name.clone(), stored.id);
        }

        let resolve = |name: &str| {
            ids.get(name).copied().ok_or_else(|| StoreError::Seed {
                message: format!("transportation refers to unknown location {name:?}"),
            })
        };

        let mut legs = 0;
        for transportation in seed.transportations {
            let leg = NewLeg {
                origin: resolve(&transportation.from)?,
                destination: resolve(&transportation.to)?,
                name: transportation.name,
                kind: transportation.kind,
                price: transportation.price,
                duration_mins: transportation.duration_in_minutes,
            };
            self.create_leg(leg).await?;
            legs += 1;
        }

        Ok((ids.len(), legs))
    }

    /// Read a seed file from disk and insert its contents.
    pub async fn load_seed(&self, path: &Path) -> Result<(usize, usize), StoreError> {
        let seed = SeedFile::read(path)?;
        let (locations, legs) = self.apply_seed(seed).await?;

        info!(
            path = %path.display(),
            locations,
            transportations = legs,
            "loaded seed data"
        );
        Ok((locations, legs))
    }
}
