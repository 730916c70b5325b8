use crate::{Card, CardType};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SUPPLY_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostRule {
    Any,
    Exact { cost: u32 },
    Range { min: u32, max: u32 },
    AtLeast { min: u32 },
    AtMost { max: u32 },
}

impl CostRule {
    pub fn admits(self, cost: u32) -> bool {
        match self {
            Self::Any => true,
            Self::Exact { cost: wanted } => cost == wanted,
            Self::Range { min, max } => min <= cost && cost <= max,
            Self::AtLeast { min } => cost >= min,
            Self::AtMost { max } => cost <= max,
        }
    }
}

impl fmt::Display for CostRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any cost"),
            Self::Exact { cost } => write!(f, "cost {cost}"),
            Self::Range { min, max } => write!(f, "cost {min}-{max}"),
            Self::AtLeast { min } => write!(f, "cost {min}+"),
            Self::AtMost { max } => write!(f, "cost <= {max}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotSpec {
    pub types: Vec<CardType>,
    pub cost: CostRule,
}

impl SlotSpec {
    pub fn new(card_type: CardType, cost: CostRule) -> Self {
        Self {
            types: vec![card_type],
            cost,
        }
    }

    pub fn any_of(types: impl IntoIterator<Item = CardType>, cost: CostRule) -> Self {
        Self {
            types: types.into_iter().collect(),
            cost,
        }
    }

    pub fn admits(&self, card: &Card) -> bool {
        self.types.contains(&card.card_type) && self.cost.admits(card.cost)
    }
}

impl fmt::Display for SlotSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<&str> = self.types.iter().map(|kind| kind.label()).collect();
        write!(f, "{} ({})", types.join("/"), self.cost)
    }
}

/// The six official supply constructions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub enum PatternId {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl PatternId {
    pub const ALL: [PatternId; 6] = [
        PatternId::One,
        PatternId::Two,
        PatternId::Three,
        PatternId::Four,
        PatternId::Five,
        PatternId::Six,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
        }
    }

    pub fn from_number(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.number() == value)
    }

    /// Built-in slot table for this pattern.
    pub fn slots(self) -> [SlotSpec; SUPPLY_SIZE] {
        use CardType::{Gem, Relic, Spell};
        use CostRule::{Any, AtLeast, AtMost, Exact, Range};
        let slot = SlotSpec::new;
        match self {
            Self::One => [
                slot(Gem, AtMost { max: 3 }),
                slot(Gem, Exact { cost: 4 }),
                slot(Relic, Any),
                slot(Spell, AtMost { max: 4 }),
                slot(Spell, AtMost { max: 4 }),
                slot(Spell, AtLeast { min: 6 }),
            ],
            Self::Two => [
                slot(Gem, AtLeast { min: 4 }),
                slot(Gem, AtLeast { min: 4 }),
                slot(Relic, AtLeast { min: 5 }),
                slot(Spell, AtMost { max: 5 }),
                slot(Spell, AtMost { max: 5 }),
                slot(Spell, AtLeast { min: 7 }),
            ],
            Self::Three => [
                slot(Gem, AtMost { max: 3 }),
                slot(Gem, Range { min: 4, max: 5 }),
                slot(Relic, Any),
                slot(Spell, Exact { cost: 3 }),
                slot(Spell, Exact { cost: 4 }),
                slot(Spell, AtLeast { min: 6 }),
            ],
            Self::Four => [
                slot(Gem, AtLeast { min: 5 }),
                slot(Gem, Any),
                slot(Relic, AtMost { max: 3 }),
                slot(Relic, AtLeast { min: 5 }),
                slot(Spell, AtMost { max: 4 }),
                slot(Spell, AtLeast { min: 6 }),
            ],
            Self::Five => [
                slot(Gem, Exact { cost: 2 }),
                slot(Gem, Exact { cost: 3 }),
                slot(Relic, Any),
                slot(Spell, Exact { cost: 4 }),
                slot(Spell, Exact { cost: 5 }),
                slot(Spell, AtLeast { min: 7 }),
            ],
            Self::Six => [
                slot(Gem, Exact { cost: 3 }),
                slot(Relic, AtMost { max: 3 }),
                slot(Relic, AtLeast { min: 5 }),
                slot(Spell, Range { min: 3, max: 4 }),
                slot(Spell, Range { min: 5, max: 6 }),
                slot(Spell, AtLeast { min: 7 }),
            ],
        }
    }
}

impl From<PatternId> for u8 {
    fn from(value: PatternId) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for PatternId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or_else(|| format!("pattern id {value} out of range 1..=6"))
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern {}", self.number())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplyPattern {
    pub id: PatternId,
    pub slots: [SlotSpec; SUPPLY_SIZE],
}

impl SupplyPattern {
    pub fn builtin(id: PatternId) -> Self {
        Self {
            id,
            slots: id.slots(),
        }
    }

    pub fn slot(&self, index: usize) -> Option<&SlotSpec> {
        self.slots.get(index)
    }
}

pub fn builtin_patterns() -> Vec<SupplyPattern> {
    PatternId::ALL.into_iter().map(SupplyPattern::builtin).collect()
}
