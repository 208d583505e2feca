/// Item definition consumed by `use_item` and `attempt_capture`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub effect: ItemEffect,
}

impl ItemDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, effect: ItemEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect,
        }
    }

    /// True for items meant to be thrown during a capture attempt.
    pub fn is_capture_device(&self) -> bool {
        matches!(self.effect, ItemEffect::Capture { .. })
    }
}

/// What an item does when used.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemEffect {
    /// Restore HP.
    Heal { amount: u32 },

    /// Restore MP.
    RestoreMp { amount: u32 },

    /// Remove one status effect.
    Cure { status: crate::state::StatusEffectKind },

    /// Capture device adding a flat percentage bonus.
    Capture { bonus: f64 },
}
