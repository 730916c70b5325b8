use crate::{
    builtin_patterns, Ability, Card, CardStore, CardType, CostRule, ExpansionFilter, NemesisCard,
    PatternStore, StoreError, SupplyPattern,
};

/// In-memory snapshot serving both store traits.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub cards: Vec<Card>,
    pub nemesis_cards: Vec<NemesisCard>,
    pub patterns: Vec<SupplyPattern>,
}

impl Catalog {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            nemesis_cards: Vec::new(),
            patterns: builtin_patterns(),
        }
    }

    pub fn with_patterns(mut self, patterns: Vec<SupplyPattern>) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_nemesis_cards(mut self, nemesis_cards: Vec<NemesisCard>) -> Self {
        self.nemesis_cards = nemesis_cards;
        self
    }

    fn select(&self, filter: &ExpansionFilter, keep: impl Fn(&Card) -> bool) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| card.in_filter(filter) && keep(card))
            .cloned()
            .collect()
    }
}

impl CardStore for Catalog {
    fn query_cards(&self, filter: &ExpansionFilter) -> Result<Vec<Card>, StoreError> {
        Ok(self.select(filter, |_| true))
    }

    fn query_cards_by_type_and_cost(
        &self,
        card_type: CardType,
        cost: CostRule,
        filter: &ExpansionFilter,
    ) -> Result<Vec<Card>, StoreError> {
        Ok(self.select(filter, |card| {
            card.card_type == card_type && cost.admits(card.cost)
        }))
    }

    fn query_cards_by_ability(
        &self,
        ability: Ability,
        filter: &ExpansionFilter,
    ) -> Result<Vec<Card>, StoreError> {
        Ok(self.select(filter, |card| card.has_ability(ability)))
    }
}

impl PatternStore for Catalog {
    fn all_patterns(&self) -> Result<Vec<SupplyPattern>, StoreError> {
        Ok(self.patterns.clone())
    }
}
