//! Content factory for building a catalog from data files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, Catalog};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, SpeciesLoader, SpellLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml    (optional)
/// ├── species.ron
/// ├── spells.ron
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no battle.toml; using default config");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load species, spells and items into one catalog.
    ///
    /// Fails on duplicate ids within a file and on species that reference
    /// spells the spell book does not define.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let species = SpeciesLoader::load(&self.data_dir.join("species.ron"))?;
        let spells = SpellLoader::load(&self.data_dir.join("spells.ron"))?;
        let items = ItemLoader::load(&self.data_dir.join("items.ron"))?;

        ensure_unique("species", species.iter().map(|s| s.id.as_str()))?;
        ensure_unique("spell", spells.iter().map(|s| s.id.as_str()))?;
        ensure_unique("item", items.iter().map(|i| i.id.as_str()))?;

        let mut catalog = Catalog::new();
        for spell in spells {
            catalog.insert_spell(spell);
        }
        for item in items {
            catalog.insert_item(item);
        }
        for template in species {
            if let Some(missing) = template.spells.iter().find(|id| catalog.spell(id).is_none()) {
                anyhow::bail!(
                    "Species '{}' references unknown spell '{}'",
                    template.id,
                    missing
                );
            }
            catalog.insert_species(template);
        }

        tracing::debug!(
            data_dir = %self.data_dir.display(),
            entries = catalog.len(),
            "content catalog loaded"
        );
        Ok(catalog)
    }

    /// Load both the configuration and the catalog.
    pub fn load_all(&self) -> LoadResult<(BattleConfig, Catalog)> {
        Ok((self.load_config()?, self.load_catalog()?))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("Duplicate {} id '{}'", kind, id);
        }
    }
    Ok(())
}
