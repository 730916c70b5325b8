use crate::{
    eligible, Ability, Card, CardStore, Event, EventBus, GenerationError, RandomSource,
    SlotSelection, StoreError, Supply, SUPPLY_SIZE,
};

/// Outcome of one ability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityOutcome {
    AlreadyPresent,
    Substituted { slot: usize },
    Unsatisfied,
}

/// Works through `requested` in order, swapping in ability cards where a slot
/// can take one. Requests that no slot can serve are left out silently;
/// store failures still propagate.
pub fn apply_abilities<S, R>(
    mut supply: Supply,
    requested: &[Ability],
    cards: &S,
    selection: SlotSelection,
    rng: &mut R,
    events: &mut EventBus,
) -> Result<Supply, GenerationError>
where
    S: CardStore + ?Sized,
    R: RandomSource + ?Sized,
{
    for ability in requested {
        apply_ability(&mut supply, *ability, cards, selection, rng, events)?;
    }
    supply.validate()?;
    Ok(supply)
}

pub fn apply_ability<S, R>(
    supply: &mut Supply,
    ability: Ability,
    cards: &S,
    selection: SlotSelection,
    rng: &mut R,
    events: &mut EventBus,
) -> Result<AbilityOutcome, StoreError>
where
    S: CardStore + ?Sized,
    R: RandomSource + ?Sized,
{
    if supply.has_ability(ability) {
        events.push(Event::AbilityAlreadyPresent { ability });
        return Ok(AbilityOutcome::AlreadyPresent);
    }

    let pool = cards.query_cards_by_ability(ability, supply.filter())?;
    let choice = match selection {
        SlotSelection::InOrder => (0..SUPPLY_SIZE).find_map(|slot| {
            let candidates = replacement_candidates(supply, &pool, slot);
            (!candidates.is_empty()).then_some((slot, candidates))
        }),
        SlotSelection::Random => {
            let mut open: Vec<(usize, Vec<&Card>)> = (0..SUPPLY_SIZE)
                .map(|slot| (slot, replacement_candidates(supply, &pool, slot)))
                .filter(|(_, candidates)| !candidates.is_empty())
                .collect();
            rng.pick_index(open.len()).map(|idx| open.swap_remove(idx))
        }
    };

    let picked = choice.and_then(|(slot, candidates)| {
        rng.pick_index(candidates.len())
            .and_then(|idx| candidates.get(idx))
            .map(|card| (slot, (*card).clone()))
    });
    let Some((slot, card)) = picked else {
        events.push(Event::AbilityUnsatisfied { ability });
        return Ok(AbilityOutcome::Unsatisfied);
    };

    let card_id = card.id();
    let replaced = supply.replace(slot, card);
    events.push(Event::AbilitySubstituted {
        ability,
        slot,
        replaced: replaced.id(),
        card: card_id,
    });
    Ok(AbilityOutcome::Substituted { slot })
}

/// Cards from `pool` that could take over `slot`: legal for the slot's rule
/// and not already elsewhere in the supply. The slot's own occupant is not
/// excluded.
pub fn replacement_candidates<'a>(
    supply: &Supply,
    pool: &'a [Card],
    slot: usize,
) -> Vec<&'a Card> {
    let Some(spec) = supply.pattern().slot(slot) else {
        return Vec::new();
    };
    let excluded = supply.identities_except(Some(slot));
    eligible(pool, spec, &excluded)
}
