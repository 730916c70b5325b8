use crate::{Ability, Card, CardType, CostRule, ExpansionFilter, SupplyPattern};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view of the card catalog.
///
/// Every query made during one generation call must answer from the same
/// snapshot.
pub trait CardStore {
    fn query_cards(&self, filter: &ExpansionFilter) -> Result<Vec<Card>, StoreError>;

    fn query_cards_by_type_and_cost(
        &self,
        card_type: CardType,
        cost: CostRule,
        filter: &ExpansionFilter,
    ) -> Result<Vec<Card>, StoreError>;

    fn query_cards_by_ability(
        &self,
        ability: Ability,
        filter: &ExpansionFilter,
    ) -> Result<Vec<Card>, StoreError>;
}

pub trait PatternStore {
    fn all_patterns(&self) -> Result<Vec<SupplyPattern>, StoreError>;
}
