mod tle_loader;

use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use utoipa::ToSchema;

pub use tle_loader::load_tle_folder;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("TLE directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
}

/// A satellite as stored, with its element text kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegisteredSatellite {
    pub id: String,
    pub name: String,
    pub tle: String,
}

/// Read side of the satellite store, as seen by the propagation pipeline.
pub trait SatelliteRegistry {
    /// Every satellite, in a stable order.
    fn list(&self) -> Vec<RegisteredSatellite>;
}

impl SatelliteRegistry for [RegisteredSatellite] {
    fn list(&self) -> Vec<RegisteredSatellite> {
        self.to_vec()
    }
}

impl SatelliteRegistry for Vec<RegisteredSatellite> {
    fn list(&self) -> Vec<RegisteredSatellite> {
        self.clone()
    }
}

/// Insertion-ordered in-memory store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    satellites: RwLock<Vec<RegisteredSatellite>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, name: &str, tle: &str) -> RegisteredSatellite {
        let satellite = RegisteredSatellite {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            tle: tle.to_string(),
        };
        self.satellites
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(satellite.clone());
        satellite
    }

    pub fn get(&self, id: &str) -> Option<RegisteredSatellite> {
        self.satellites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut satellites = self
            .satellites
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = satellites.len();
        satellites.retain(|s| s.id != id);
        satellites.len() != before
    }

    pub fn len(&self) -> usize {
        self.satellites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SatelliteRegistry for InMemoryRegistry {
    fn list(&self) -> Vec<RegisteredSatellite> {
        self.satellites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
