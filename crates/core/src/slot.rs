use crate::{
    Card, CardId, CardStore, ExpansionFilter, SlotSpec, StoreError, SupplyPattern, SUPPLY_SIZE,
};
use std::collections::HashSet;

/// Cards from `pool` that may occupy `slot`, minus the `excluded` identities.
///
/// Order follows `pool`, so a scripted random source picks deterministically.
pub fn eligible<'a>(
    pool: &'a [Card],
    slot: &SlotSpec,
    excluded: &HashSet<CardId>,
) -> Vec<&'a Card> {
    pool.iter()
        .filter(|card| slot.admits(card))
        .filter(|card| !excluded.contains(&card.id()))
        .collect()
}

/// Per-slot candidate counts for a pattern, ignoring uniqueness between slots.
pub fn slot_report<S: CardStore + ?Sized>(
    pattern: &SupplyPattern,
    store: &S,
    filter: &ExpansionFilter,
) -> Result<[usize; SUPPLY_SIZE], StoreError> {
    let mut counts = [0usize; SUPPLY_SIZE];
    for (count, slot) in counts.iter_mut().zip(pattern.slots.iter()) {
        for card_type in &slot.types {
            *count += store
                .query_cards_by_type_and_cost(*card_type, slot.cost, filter)?
                .len();
        }
    }
    Ok(counts)
}
