use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Gem,
    Relic,
    Spell,
}

impl CardType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Gem => "gem",
            Self::Relic => "relic",
            Self::Spell => "spell",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    DestroyCard,
    FocusBreach,
    GainCharge,
    GainGraveholdLife,
    GainLife,
    DrawCard,
    MultipleDamage,
    PulseToken,
    SilentToken,
}

impl Ability {
    pub const ALL: [Ability; 9] = [
        Ability::DestroyCard,
        Ability::FocusBreach,
        Ability::GainCharge,
        Ability::GainGraveholdLife,
        Ability::GainLife,
        Ability::DrawCard,
        Ability::MultipleDamage,
        Ability::PulseToken,
        Ability::SilentToken,
    ];

    /// Column name used by the catalog files and the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::DestroyCard => "destroy_card",
            Self::FocusBreach => "focus_breach",
            Self::GainCharge => "gain_charge",
            Self::GainGraveholdLife => "gain_gravehold_life",
            Self::GainLife => "gain_life",
            Self::DrawCard => "draw_card",
            Self::MultipleDamage => "multiple_damage",
            Self::PulseToken => "pulse_token",
            Self::SilentToken => "silent_token",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ability| ability.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::DestroyCard => "card destruction",
            Self::FocusBreach => "focus breach",
            Self::GainCharge => "gain charge",
            Self::GainGraveholdLife => "heal Gravehold",
            Self::GainLife => "heal player",
            Self::DrawCard => "card draw",
            Self::MultipleDamage => "multi-target damage",
            Self::PulseToken => "pulse token",
            Self::SilentToken => "silence token",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wave {
    One,
    Two,
}

impl Wave {
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub fn from_number(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }
}

/// Which expansion sets a request may draw from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExpansionFilter {
    #[default]
    All,
    Wave(Wave),
    Sets(BTreeSet<String>),
}

impl ExpansionFilter {
    /// Builds a set filter; an empty selection means every set.
    pub fn sets<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sets: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if sets.is_empty() {
            Self::All
        } else {
            Self::Sets(sets)
        }
    }

    pub fn admits(&self, expansion: &str, wave: Wave) -> bool {
        match self {
            Self::All => true,
            Self::Wave(wanted) => *wanted == wave,
            Self::Sets(sets) => sets.contains(expansion),
        }
    }
}

impl fmt::Display for ExpansionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all sets"),
            Self::Wave(wave) => write!(f, "wave {}", wave.number()),
            Self::Sets(sets) => {
                let names: Vec<&str> = sets.iter().map(String::as_str).collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}

/// Identity of a card: its name within an expansion set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId {
    pub name: String,
    pub expansion: String,
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.expansion)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub expansion: String,
    pub wave: Wave,
    pub card_type: CardType,
    pub cost: u32,
    #[serde(default)]
    pub abilities: BTreeSet<Ability>,
}

impl Card {
    pub fn new(
        name: impl Into<String>,
        expansion: impl Into<String>,
        wave: Wave,
        card_type: CardType,
        cost: u32,
    ) -> Self {
        Self {
            name: name.into(),
            expansion: expansion.into(),
            wave,
            card_type,
            cost,
            abilities: BTreeSet::new(),
        }
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.insert(ability);
        self
    }

    pub fn id(&self) -> CardId {
        CardId {
            name: self.name.clone(),
            expansion: self.expansion.clone(),
        }
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn in_filter(&self, filter: &ExpansionFilter) -> bool {
        filter.admits(&self.expansion, self.wave)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.expansion)
    }
}
