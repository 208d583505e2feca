//! Read-only content the engine consumes.
//!
//! Species templates, spells and items are static data supplied by the
//! content layer. The [`Catalog`] bundles them so the session can resolve ids
//! without knowing where the data came from.
mod items;
mod species;
mod spells;

use std::collections::BTreeMap;

pub use items::{ItemDefinition, ItemEffect};
pub use species::{GrowthCurve, SpeciesTemplate};
pub use spells::{SpellDefinition, StatusInfliction};

/// Lookup tables for spells, items and species, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    species: BTreeMap<String, SpeciesTemplate>,
    spells: BTreeMap<String, SpellDefinition>,
    items: BTreeMap<String, ItemDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_species(mut self, template: SpeciesTemplate) -> Self {
        self.insert_species(template);
        self
    }

    pub fn with_spell(mut self, spell: SpellDefinition) -> Self {
        self.insert_spell(spell);
        self
    }

    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.insert_item(item);
        self
    }

    /// Registers a template, replacing any previous one with the same id.
    pub fn insert_species(&mut self, template: SpeciesTemplate) {
        self.species.insert(template.id.clone(), template);
    }

    pub fn insert_spell(&mut self, spell: SpellDefinition) {
        self.spells.insert(spell.id.clone(), spell);
    }

    pub fn insert_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn species(&self, id: &str) -> Option<&SpeciesTemplate> {
        self.species.get(id)
    }

    pub fn spell(&self, id: &str) -> Option<&SpellDefinition> {
        self.spells.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    pub fn species_ids(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.species.len() + self.spells.len() + self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
