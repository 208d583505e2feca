//! Species template loader.

use std::path::Path;

use battle_core::SpeciesTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Species list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bestiary {
    pub species: Vec<SpeciesTemplate>,
}

/// Loader for species templates from RON files.
pub struct SpeciesLoader;

impl SpeciesLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SpeciesTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses templates, rejecting capture rates above 100.
    pub fn parse(content: &str) -> LoadResult<Vec<SpeciesTemplate>> {
        let bestiary: Bestiary = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON: {}", e))?;

        for template in &bestiary.species {
            if template.capture_rate > 100 {
                anyhow::bail!(
                    "Species '{}' has capture_rate {} (expected 0-100)",
                    template.id,
                    template.capture_rate
                );
            }
        }

        Ok(bestiary.species)
    }
}
