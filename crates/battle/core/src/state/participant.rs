//! Battle participants and the per-side state they draw on.

use super::{CombatantId, Fighter, Inventory, Side};

/// Caller-provided entry for `start_battle`.
#[derive(Debug)]
pub struct ParticipantSpec {
    pub id: CombatantId,
    pub side: Side,
    /// Initiative. Defaults to the fighter's speed stat.
    pub speed: u32,
    pub fighter: Box<dyn Fighter>,
}

impl ParticipantSpec {
    pub fn new(id: CombatantId, side: Side, fighter: impl Fighter + 'static) -> Self {
        let speed = fighter.stats().speed;
        Self {
            id,
            side,
            speed,
            fighter: Box::new(fighter),
        }
    }

    /// Overrides the initiative taken from the stat block.
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }
}

/// A participant placed in the turn order.
#[derive(Debug)]
pub struct Participant {
    pub id: CombatantId,
    pub side: Side,
    pub speed: u32,
    pub fighter: Box<dyn Fighter>,
}

impl Participant {
    pub fn is_alive(&self) -> bool {
        self.fighter.is_alive()
    }
}

impl From<ParticipantSpec> for Participant {
    fn from(spec: ParticipantSpec) -> Self {
        Self {
            id: spec.id,
            side: spec.side,
            speed: spec.speed,
            fighter: spec.fighter,
        }
    }
}

/// A combatant taken out of battle by a successful capture.
#[derive(Debug)]
pub struct Captured {
    pub id: CombatantId,
    pub fighter: Box<dyn Fighter>,
}

/// Resources owned by one side across battles.
#[derive(Debug, Default)]
pub struct SideState {
    pub inventory: Inventory,
    /// Captured combatants, oldest first.
    pub storage: Vec<Captured>,
}

impl SideState {
    pub fn with_inventory(inventory: Inventory) -> Self {
        Self {
            inventory,
            storage: Vec::new(),
        }
    }
}
