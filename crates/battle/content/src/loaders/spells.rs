//! Spell list loader.

use std::path::Path;

use battle_core::SpellDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Spell list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellBook {
    pub spells: Vec<SpellDefinition>,
}

/// Loader for spell definitions from RON files.
pub struct SpellLoader;

impl SpellLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SpellDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SpellDefinition>> {
        let book: SpellBook = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell book RON: {}", e))?;

        Ok(book.spells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{DamageKind, StatusEffectKind};

    #[test]
    fn optional_fields_take_defaults() {
        let spells = SpellLoader::parse(
            r#"(
                spells: [
                    (id: "spark", name: "Spark", mp_cost: 3),
                    (
                        id: "toxic",
                        name: "Toxic Cloud",
                        mp_cost: 6,
                        power: 60,
                        kind: magical,
                        inflicts: Some((kind: poison, duration: 3, chance: 40.0)),
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(spells[0].power, 100);
        assert_eq!(spells[0].kind, DamageKind::Magical);
        assert!(spells[0].inflicts.is_none());

        let inflicts = spells[1].inflicts.unwrap();
        assert_eq!(inflicts.kind, StatusEffectKind::Poison);
        assert_eq!(inflicts.duration, 3);
        assert_eq!(inflicts.magnitude, None);
        assert_eq!(inflicts.chance, 40.0);
    }
}
