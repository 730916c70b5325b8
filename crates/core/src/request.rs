use crate::{
    apply_abilities, generate, Ability, CardStore, Event, EventBus, ExpansionFilter,
    GenerationError, GeneratorConfig, PatternStore, RandomSource, Supply,
};

/// One generation attempt followed by ability substitution.
pub fn request_supply<P, S, R>(
    filter: &ExpansionFilter,
    abilities: &[Ability],
    patterns: &P,
    cards: &S,
    config: &GeneratorConfig,
    rng: &mut R,
    events: &mut EventBus,
) -> Result<Supply, GenerationError>
where
    P: PatternStore + ?Sized,
    S: CardStore + ?Sized,
    R: RandomSource + ?Sized,
{
    let supply = generate(filter, patterns, cards, rng, events)?;
    apply_abilities(supply, abilities, cards, config.slot_selection, rng, events)
}

/// Re-invokes [`request_supply`] after a dead-end slot, up to
/// `config.max_attempts` times. Other errors return at once.
pub fn request_supply_with_retries<P, S, R>(
    filter: &ExpansionFilter,
    abilities: &[Ability],
    patterns: &P,
    cards: &S,
    config: &GeneratorConfig,
    rng: &mut R,
    events: &mut EventBus,
) -> Result<Supply, GenerationError>
where
    P: PatternStore + ?Sized,
    S: CardStore + ?Sized,
    R: RandomSource + ?Sized,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match request_supply(filter, abilities, patterns, cards, config, rng, events) {
            Ok(supply) => return Ok(supply),
            Err(err) if err.is_retryable() && attempt < attempts => {
                events.push(Event::AttemptFailed {
                    attempt,
                    reason: err.to_string(),
                });
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
