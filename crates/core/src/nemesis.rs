use crate::{Event, EventBus, ExpansionFilter, RandomSource, Wave};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NemesisCardKind {
    Attack,
    Power,
    Minion,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NemesisCard {
    pub name: String,
    pub kind: NemesisCardKind,
    pub tier: u8,
    pub expansion: String,
    pub wave: Wave,
    #[serde(default)]
    pub hp: Option<u32>,
}

impl fmt::Display for NemesisCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.hp) {
            (NemesisCardKind::Minion, Some(hp)) => write!(f, "{} (HP: {hp})", self.name),
            _ => f.write_str(&self.name),
        }
    }
}

/// Basic cards per tier for a given player count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierDistribution {
    pub tier_1: usize,
    pub tier_2: usize,
    pub tier_3: usize,
}

impl TierDistribution {
    pub fn for_players(players: u8) -> Result<Self, NemesisError> {
        let (tier_1, tier_2, tier_3) = match players {
            1 => (1, 3, 7),
            2 => (3, 5, 7),
            3 => (5, 6, 7),
            4 => (8, 7, 7),
            other => return Err(NemesisError::UnsupportedPlayerCount(other)),
        };
        Ok(Self {
            tier_1,
            tier_2,
            tier_3,
        })
    }

    pub fn tiers(&self) -> [(u8, usize); 3] {
        [(1, self.tier_1), (2, self.tier_2), (3, self.tier_3)]
    }

    pub fn total(&self) -> usize {
        self.tier_1 + self.tier_2 + self.tier_3
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NemesisError {
    #[error("unsupported player count {0} (expected 1-4)")]
    UnsupportedPlayerCount(u8),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NemesisDeck {
    pub players: u8,
    pub distribution: TierDistribution,
    pub cards: Vec<NemesisCard>,
}

impl NemesisDeck {
    pub fn tier(&self, tier: u8) -> impl Iterator<Item = &NemesisCard> + '_ {
        self.cards.iter().filter(move |card| card.tier == tier)
    }
}

/// Draws each tier's quota without replacement and shuffles the result.
/// A tier with too few cards contributes what it has.
pub fn generate_nemesis_deck<R: RandomSource + ?Sized>(
    cards: &[NemesisCard],
    filter: &ExpansionFilter,
    players: u8,
    rng: &mut R,
    events: &mut EventBus,
) -> Result<NemesisDeck, NemesisError> {
    let distribution = TierDistribution::for_players(players)?;
    let mut deck = Vec::with_capacity(distribution.total());
    for (tier, wanted) in distribution.tiers() {
        let mut pool: Vec<&NemesisCard> = cards
            .iter()
            .filter(|card| card.tier == tier && filter.admits(&card.expansion, card.wave))
            .collect();
        let mut drawn = 0;
        while drawn < wanted {
            let Some(idx) = rng.pick_index(pool.len()) else {
                break;
            };
            deck.push(pool.swap_remove(idx).clone());
            drawn += 1;
        }
        if drawn < wanted {
            events.push(Event::NemesisTierShort {
                tier,
                wanted,
                drawn,
            });
        }
    }
    deck.shuffle(rng);
    Ok(NemesisDeck {
        players,
        distribution,
        cards: deck,
    })
}
