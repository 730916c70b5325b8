use crate::{
    eligible, Ability, Card, CardId, CardStore, Event, EventBus, ExpansionFilter,
    GenerationError, PatternId, PatternStore, RandomSource, SupplyPattern, SUPPLY_SIZE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Six cards laid out according to one pattern.
///
/// A `Supply` can only be built through [`Supply::new`], which rejects
/// duplicates and cards that break their slot's rule, so every value of this
/// type is a legal supply. Deserializing goes through the same check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "SupplyRecord")]
pub struct Supply {
    pattern: SupplyPattern,
    filter: ExpansionFilter,
    cards: [Card; SUPPLY_SIZE],
}

impl Supply {
    pub fn new(
        pattern: SupplyPattern,
        filter: ExpansionFilter,
        cards: Vec<Card>,
    ) -> Result<Self, GenerationError> {
        let count = cards.len();
        let cards: [Card; SUPPLY_SIZE] = cards.try_into().map_err(|_| {
            GenerationError::Inconsistent(format!("expected {SUPPLY_SIZE} cards, got {count}"))
        })?;
        let supply = Self {
            pattern,
            filter,
            cards,
        };
        supply.validate()?;
        Ok(supply)
    }

    pub fn pattern_id(&self) -> PatternId {
        self.pattern.id
    }

    pub fn pattern(&self) -> &SupplyPattern {
        &self.pattern
    }

    pub fn filter(&self) -> &ExpansionFilter {
        &self.filter
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, slot: usize) -> Option<&Card> {
        self.cards.get(slot)
    }

    /// (slot index, card) pairs in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &Card)> + '_ {
        self.cards.iter().enumerate()
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.cards.iter().any(|card| card.has_ability(ability))
    }

    pub fn missing_abilities(&self, requested: &[Ability]) -> Vec<Ability> {
        requested
            .iter()
            .copied()
            .filter(|ability| !self.has_ability(*ability))
            .collect()
    }

    /// Identities of every card except the one in `keep_slot`.
    pub fn identities_except(&self, keep_slot: Option<usize>) -> HashSet<CardId> {
        self.slots()
            .filter(|(slot, _)| Some(*slot) != keep_slot)
            .map(|(_, card)| card.id())
            .collect()
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        let mut seen = HashSet::with_capacity(SUPPLY_SIZE);
        for ((slot, card), spec) in self.slots().zip(self.pattern.slots.iter()) {
            if !seen.insert(card.id()) {
                return Err(GenerationError::Inconsistent(format!(
                    "{card} appears twice"
                )));
            }
            if !spec.admits(card) {
                return Err(GenerationError::Inconsistent(format!(
                    "{card} violates slot {} ({spec})",
                    slot + 1
                )));
            }
            if !card.in_filter(&self.filter) {
                return Err(GenerationError::Inconsistent(format!(
                    "{card} is outside {}",
                    self.filter
                )));
            }
        }
        Ok(())
    }

    /// Swaps the occupant of `slot`. Callers hand in a card already checked
    /// against the slot and the rest of the supply.
    pub(crate) fn replace(&mut self, slot: usize, card: Card) -> Card {
        std::mem::replace(&mut self.cards[slot], card)
    }
}

#[derive(Deserialize)]
struct SupplyRecord {
    pattern: SupplyPattern,
    filter: ExpansionFilter,
    cards: Vec<Card>,
}

impl TryFrom<SupplyRecord> for Supply {
    type Error = GenerationError;

    fn try_from(record: SupplyRecord) -> Result<Self, Self::Error> {
        Supply::new(record.pattern, record.filter, record.cards)
    }
}

/// Picks a pattern uniformly and fills it.
pub fn generate<P, S, R>(
    filter: &ExpansionFilter,
    patterns: &P,
    cards: &S,
    rng: &mut R,
    events: &mut EventBus,
) -> Result<Supply, GenerationError>
where
    P: PatternStore + ?Sized,
    S: CardStore + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut patterns = patterns.all_patterns()?;
    let choices = patterns.len();
    let idx = rng
        .pick_index(choices)
        .ok_or(GenerationError::NoPatternAvailable)?;
    let pattern = patterns.swap_remove(idx);
    events.push(Event::PatternSelected {
        pattern: pattern.id,
        choices,
    });
    generate_with_pattern(pattern, filter, cards, rng, events)
}

/// Fills `pattern` left to right from the filtered catalog. The first slot
/// with no candidate abandons the attempt.
pub fn generate_with_pattern<S, R>(
    pattern: SupplyPattern,
    filter: &ExpansionFilter,
    cards: &S,
    rng: &mut R,
    events: &mut EventBus,
) -> Result<Supply, GenerationError>
where
    S: CardStore + ?Sized,
    R: RandomSource + ?Sized,
{
    let pool = cards.query_cards(filter)?;
    let mut chosen: Vec<Card> = Vec::with_capacity(SUPPLY_SIZE);
    let mut excluded: HashSet<CardId> = HashSet::with_capacity(SUPPLY_SIZE);
    for (slot, spec) in pattern.slots.iter().enumerate() {
        let candidates = eligible(&pool, spec, &excluded);
        let Some(card) = rng
            .pick_index(candidates.len())
            .and_then(|idx| candidates.get(idx))
        else {
            events.push(Event::SlotUnfillable {
                pattern: pattern.id,
                slot,
            });
            return Err(GenerationError::SlotUnfillable {
                pattern: pattern.id,
                slot,
            });
        };
        let card = (*card).clone();
        events.push(Event::SlotFilled {
            slot,
            card: card.id(),
            candidates: candidates.len(),
        });
        excluded.insert(card.id());
        chosen.push(card);
    }
    Supply::new(pattern, filter.clone(), chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardType, CostRule, SlotSpec, Wave};

    fn gem(name: &str, cost: u32) -> Card {
        Card::new(name, "Aeon's End", Wave::One, CardType::Gem, cost)
    }

    fn all_gems_pattern() -> SupplyPattern {
        SupplyPattern {
            id: PatternId::One,
            slots: std::array::from_fn(|_| SlotSpec::new(CardType::Gem, CostRule::Any)),
        }
    }

    fn six_gems() -> Vec<Card> {
        (1..=6).map(|cost| gem(&format!("Gem {cost}"), cost)).collect()
    }

    #[test]
    fn new_rejects_short_supply() {
        let mut cards = six_gems();
        cards.pop();
        let err = Supply::new(all_gems_pattern(), ExpansionFilter::All, cards)
            .expect_err("five cards");
        assert!(matches!(err, GenerationError::Inconsistent(_)));
    }

    #[test]
    fn new_rejects_duplicates() {
        let mut cards = six_gems();
        cards[5] = cards[0].clone();
        let err = Supply::new(all_gems_pattern(), ExpansionFilter::All, cards)
            .expect_err("duplicate");
        assert!(matches!(err, GenerationError::Inconsistent(_)));
    }

    #[test]
    fn new_rejects_slot_violation() {
        let mut cards = six_gems();
        cards[2] = Card::new("Ignite", "Aeon's End", Wave::One, CardType::Spell, 4);
        let err = Supply::new(all_gems_pattern(), ExpansionFilter::All, cards)
            .expect_err("spell in gem slot");
        assert!(matches!(err, GenerationError::Inconsistent(_)));
    }

    #[test]
    fn deserializing_revalidates_cards() {
        let supply =
            Supply::new(all_gems_pattern(), ExpansionFilter::All, six_gems()).expect("supply");
        let mut value = serde_json::to_value(&supply).expect("encode");
        let back: Supply = serde_json::from_value(value.clone()).expect("decode");
        assert_eq!(back, supply);

        value["cards"][3] = serde_json::to_value(Card::new(
            "Ignite",
            "Aeon's End",
            Wave::One,
            CardType::Spell,
            4,
        ))
        .expect("encode card");
        let err = serde_json::from_value::<Supply>(value).expect_err("spell in gem slot");
        assert!(err.to_string().contains("violates slot 4"), "{err}");
    }

    #[test]
    fn identities_except_keeps_named_slot_out() {
        let supply =
            Supply::new(all_gems_pattern(), ExpansionFilter::All, six_gems()).expect("supply");
        let ids = supply.identities_except(Some(0));
        assert_eq!(ids.len(), 5);
        assert!(!ids.contains(&supply.cards()[0].id()));
    }
}
