use crate::state::Stats;

/// Species or class template a combatant is instantiated from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesTemplate {
    pub id: String,
    pub name: String,
    /// Stats at level 1.
    pub base: Stats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub growth: GrowthCurve,
    /// 0-100, higher is easier to capture.
    pub capture_rate: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<String>,
    /// Key of the AI policy driving this species when it is not player-controlled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: Option<String>,
}

/// Per-level stat gains above level 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthCurve {
    pub hp: u32,
    pub mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic_attack: u32,
    pub magic_defense: u32,
    pub speed: u32,
    pub accuracy: u32,
}

impl SpeciesTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base: Stats) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capture_rate: base.capture_rate,
            base,
            growth: GrowthCurve::default(),
            spells: Vec::new(),
            ai: None,
        }
    }

    pub fn with_growth(mut self, growth: GrowthCurve) -> Self {
        self.growth = growth;
        self
    }

    pub fn with_capture_rate(mut self, capture_rate: u32) -> Self {
        self.capture_rate = capture_rate;
        self
    }

    pub fn with_ai(mut self, policy: impl Into<String>) -> Self {
        self.ai = Some(policy.into());
        self
    }

    /// Stat block at `level`. Levels below 1 are treated as 1.
    pub fn stats_at(&self, level: u32) -> Stats {
        let level = level.max(1);
        let gained = level - 1;
        let grow = |base: u32, per_level: u32| base.saturating_add(per_level.saturating_mul(gained));

        Stats {
            max_hp: grow(self.base.max_hp, self.growth.hp),
            max_mp: grow(self.base.max_mp, self.growth.mp),
            attack: grow(self.base.attack, self.growth.attack),
            defense: grow(self.base.defense, self.growth.defense),
            magic_attack: grow(self.base.magic_attack, self.growth.magic_attack),
            magic_defense: grow(self.base.magic_defense, self.growth.magic_defense),
            speed: grow(self.base.speed, self.growth.speed),
            accuracy: grow(self.base.accuracy, self.growth.accuracy),
            capture_rate: self.capture_rate.min(100),
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_grow_linearly_from_level_one() {
        let template = SpeciesTemplate::new(
            "wisp",
            "Wisp",
            Stats {
                max_hp: 30,
                attack: 8,
                speed: 20,
                ..Stats::default()
            },
        )
        .with_growth(GrowthCurve {
            hp: 5,
            attack: 2,
            ..GrowthCurve::default()
        })
        .with_capture_rate(140);

        let level_one = template.stats_at(0);
        assert_eq!(level_one.level, 1);
        assert_eq!(level_one.max_hp, 30);

        let level_five = template.stats_at(5);
        assert_eq!(level_five.max_hp, 50);
        assert_eq!(level_five.attack, 16);
        assert_eq!(level_five.speed, 20);
        assert_eq!(level_five.capture_rate, 100);
    }
}
