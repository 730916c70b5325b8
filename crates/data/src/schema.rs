use aeon_supply_core::{Ability, Card, CardType, NemesisCard, NemesisCardKind, Wave};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

pub const WAVE_ONE_SETS: &[&str] = &[
    "Aeon's End",
    "Depths",
    "Nameless",
    "War Eternal",
    "The Void",
    "Outer Dark",
    "基本セット",
    "深層",
    "名なき者",
    "終わりなき戦い",
    "虚空",
    "外より来たりし闇",
];

pub const WAVE_TWO_SETS: &[&str] = &[
    "Legacy",
    "Buried Secrets",
    "New Age",
    "Outcasts",
    "レガシー",
    "埋もれた秘密",
    "新たな時代",
    "追放されしもの",
];

/// Wave of a known expansion set, by English or Japanese name.
pub fn wave_for_set(name: &str) -> Option<Wave> {
    if WAVE_ONE_SETS.contains(&name) {
        Some(Wave::One)
    } else if WAVE_TWO_SETS.contains(&name) {
        Some(Wave::Two)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum RawCardType {
    #[serde(rename = "gem", alias = "Gem", alias = "宝石")]
    Gem,
    #[serde(rename = "relic", alias = "Relic", alias = "遺物")]
    Relic,
    #[serde(rename = "spell", alias = "Spell", alias = "呪文")]
    Spell,
}

impl From<RawCardType> for CardType {
    fn from(value: RawCardType) -> Self {
        match value {
            RawCardType::Gem => CardType::Gem,
            RawCardType::Relic => CardType::Relic,
            RawCardType::Spell => CardType::Spell,
        }
    }
}

/// One row of `cardlist.json`. Ability flags are columns keyed by
/// [`Ability::key`], set to `"applicable"` (or `true`) when the card has it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
    pub name: String,
    pub card_set: String,
    #[serde(rename = "type")]
    pub card_type: RawCardType,
    pub cost: u32,
    #[serde(default)]
    pub wave: Option<u8>,
    #[serde(flatten)]
    pub columns: HashMap<String, Value>,
}

impl RawCard {
    pub fn abilities(&self) -> BTreeSet<Ability> {
        Ability::ALL
            .into_iter()
            .filter(|ability| match self.columns.get(ability.key()) {
                Some(Value::String(flag)) => flag == "applicable",
                Some(Value::Bool(flag)) => *flag,
                _ => false,
            })
            .collect()
    }

    pub fn into_card(self) -> Result<Card, String> {
        let wave = resolve_wave(&self.name, &self.card_set, self.wave)?;
        let abilities = self.abilities();
        Ok(Card {
            name: self.name,
            expansion: self.card_set,
            wave,
            card_type: self.card_type.into(),
            cost: self.cost,
            abilities,
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum RawNemesisKind {
    #[serde(rename = "attack", alias = "Attack", alias = "アタック")]
    Attack,
    #[serde(rename = "power", alias = "Power", alias = "パワー")]
    Power,
    #[serde(rename = "minion", alias = "Minion", alias = "ミニオン")]
    Minion,
}

impl From<RawNemesisKind> for NemesisCardKind {
    fn from(value: RawNemesisKind) -> Self {
        match value {
            RawNemesisKind::Attack => NemesisCardKind::Attack,
            RawNemesisKind::Power => NemesisCardKind::Power,
            RawNemesisKind::Minion => NemesisCardKind::Minion,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNemesisCard {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RawNemesisKind,
    pub tier: u8,
    pub card_set: String,
    #[serde(default)]
    pub wave: Option<u8>,
    #[serde(default)]
    pub hp: Option<u32>,
}

impl RawNemesisCard {
    pub fn into_card(self) -> Result<NemesisCard, String> {
        if !(1..=3).contains(&self.tier) {
            return Err(format!("{}: tier {} out of range 1-3", self.name, self.tier));
        }
        let wave = resolve_wave(&self.name, &self.card_set, self.wave)?;
        Ok(NemesisCard {
            name: self.name,
            kind: self.kind.into(),
            tier: self.tier,
            expansion: self.card_set,
            wave,
            hp: self.hp,
        })
    }
}

fn resolve_wave(name: &str, card_set: &str, explicit: Option<u8>) -> Result<Wave, String> {
    match explicit {
        Some(number) => Wave::from_number(number)
            .ok_or_else(|| format!("{name}: wave {number} out of range 1-2")),
        None => wave_for_set(card_set)
            .ok_or_else(|| format!("{name}: unknown set '{card_set}' and no wave given")),
    }
}
