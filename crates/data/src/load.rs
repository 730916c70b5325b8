use crate::schema::{RawCard, RawNemesisCard};
use aeon_supply_core::{
    builtin_patterns, Card, CardId, Catalog, CostRule, GeneratorConfig, NemesisCard, PatternId,
    SupplyPattern,
};
use anyhow::{anyhow, bail, Context};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const CARDLIST_FILE: &str = "cardlist.json";
pub const NEMESIS_FILE: &str = "nemesis_basic_cards.json";
pub const PATTERNS_FILE: &str = "patterns.json";
pub const CONFIG_FILE: &str = "supply.json";

#[derive(Debug)]
pub struct AssetReport {
    pub catalog: Catalog,
    pub config: GeneratorConfig,
    pub warnings: Vec<String>,
}

/// Loads everything the engine reads from an assets directory. Only the card
/// list is required; the rest fall back to built-in defaults with a warning
/// where that changes behavior.
pub fn load_assets(dir: &Path) -> anyhow::Result<AssetReport> {
    let mut warnings = Vec::new();

    let (cards, card_warnings) = load_cards(&dir.join(CARDLIST_FILE))?;
    warnings.extend(card_warnings);

    let nemesis_path = dir.join(NEMESIS_FILE);
    let nemesis_cards = if nemesis_path.exists() {
        load_nemesis_cards(&nemesis_path)?
    } else {
        warnings.push(format!("{} not found", nemesis_path.display()));
        Vec::new()
    };

    let patterns_path = dir.join(PATTERNS_FILE);
    let patterns = if patterns_path.exists() {
        load_patterns(&patterns_path)?
    } else {
        builtin_patterns()
    };

    let config_path = dir.join(CONFIG_FILE);
    let config = if config_path.exists() {
        load_generator_config(&config_path)?
    } else {
        GeneratorConfig::default()
    };

    let catalog = Catalog::new(cards)
        .with_patterns(patterns)
        .with_nemesis_cards(nemesis_cards);
    Ok(AssetReport {
        catalog,
        config,
        warnings,
    })
}

/// Reads the card list. Repeated identities keep the first row and produce a
/// warning.
pub fn load_cards(path: &Path) -> anyhow::Result<(Vec<Card>, Vec<String>)> {
    let raw: Vec<RawCard> = load_json(path)?;
    let mut seen: HashSet<CardId> = HashSet::with_capacity(raw.len());
    let mut cards = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    for (row, item) in raw.into_iter().enumerate() {
        let card = item
            .into_card()
            .map_err(|err| anyhow!(err))
            .with_context(|| format!("{} row {}", path.display(), row + 1))?;
        if !seen.insert(card.id()) {
            warnings.push(format!("duplicate card {card} ignored"));
            continue;
        }
        cards.push(card);
    }
    Ok((cards, warnings))
}

pub fn load_nemesis_cards(path: &Path) -> anyhow::Result<Vec<NemesisCard>> {
    let raw: Vec<RawNemesisCard> = load_json(path)?;
    raw.into_iter()
        .enumerate()
        .map(|(row, item)| {
            item.into_card()
                .map_err(|err| anyhow!(err))
                .with_context(|| format!("{} row {}", path.display(), row + 1))
        })
        .collect()
}

/// Reads a pattern table override. It must define each of the six patterns
/// exactly once, and every slot must admit some card.
pub fn load_patterns(path: &Path) -> anyhow::Result<Vec<SupplyPattern>> {
    let patterns: Vec<SupplyPattern> = load_json(path)?;
    let mut seen: HashSet<PatternId> = HashSet::new();
    for pattern in &patterns {
        if !seen.insert(pattern.id) {
            bail!("{}: {} defined twice", path.display(), pattern.id);
        }
        for (slot, spec) in pattern.slots.iter().enumerate() {
            if spec.types.is_empty() {
                bail!(
                    "{}: {} slot {} allows no card type",
                    path.display(),
                    pattern.id,
                    slot + 1
                );
            }
            if let CostRule::Range { min, max } = spec.cost {
                if min > max {
                    bail!(
                        "{}: {} slot {} has empty cost range {min}-{max}",
                        path.display(),
                        pattern.id,
                        slot + 1
                    );
                }
            }
        }
    }
    let missing: Vec<String> = PatternId::ALL
        .into_iter()
        .filter(|id| !seen.contains(id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        bail!("{}: missing {}", path.display(), missing.join(", "));
    }
    Ok(patterns)
}

pub fn load_generator_config(path: &Path) -> anyhow::Result<GeneratorConfig> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_supply_core::{Ability, CardType, CostRule, SlotSelection, Wave};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn reads_cards_with_japanese_types_and_ability_columns() {
        let file = unique_temp_file("cards");
        let body = r#"
[
  {"name":"Jade","card_set":"基本セット","type":"宝石","cost":2,"gain_charge":null},
  {"name":"Ignite","card_set":"Aeon's End","type":"spell","cost":4,
   "multiple_damage":"applicable","draw_card":"not applicable"},
  {"name":"Cairn Compass","card_set":"Homebrew","wave":2,"type":"relic","cost":4,
   "gain_charge":true}
]
"#;
        fs::write(&file, body).expect("write");
        let (cards, warnings) = load_cards(&file).expect("load");
        assert!(warnings.is_empty());
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].card_type, CardType::Gem);
        assert_eq!(cards[0].wave, Wave::One);
        assert!(cards[0].abilities.is_empty());
        assert_eq!(
            cards[1].abilities.iter().copied().collect::<Vec<_>>(),
            vec![Ability::MultipleDamage]
        );
        assert_eq!(cards[2].wave, Wave::Two);
        assert!(cards[2].has_ability(Ability::GainCharge));
        let _ = fs::remove_file(file);
    }

    #[test]
    fn duplicate_cards_are_dropped_with_warning() {
        let file = unique_temp_file("dupes");
        let body = r#"
[
  {"name":"Jade","card_set":"Aeon's End","type":"gem","cost":2},
  {"name":"Jade","card_set":"Aeon's End","type":"gem","cost":3},
  {"name":"Jade","card_set":"Legacy","type":"gem","cost":2}
]
"#;
        fs::write(&file, body).expect("write");
        let (cards, warnings) = load_cards(&file).expect("load");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].cost, 2);
        assert_eq!(warnings.len(), 1);
        let _ = fs::remove_file(file);
    }

    #[test]
    fn unknown_set_without_wave_is_rejected() {
        let file = unique_temp_file("unknown");
        let body = r#"[{"name":"Mystery","card_set":"Prototype","type":"gem","cost":1}]"#;
        fs::write(&file, body).expect("write");
        let err = load_cards(&file).expect_err("unknown set");
        assert!(format!("{err:#}").contains("Prototype"));
        let _ = fs::remove_file(file);
    }

    #[test]
    fn nemesis_tier_must_be_in_range() {
        let file = unique_temp_file("nemesis");
        let body = r#"[{"name":"Cataclysm","type":"power","tier":4,"card_set":"Depths"}]"#;
        fs::write(&file, body).expect("write");
        let err = load_nemesis_cards(&file).expect_err("tier 4");
        assert!(format!("{err:#}").contains("tier 4"));
        let _ = fs::remove_file(file);
    }

    #[test]
    fn pattern_override_round_trips_cost_rules() {
        let file = unique_temp_file("patterns");
        let mut table = serde_json::to_value(builtin_patterns()).expect("encode");
        table[1]["slots"] = serde_json::from_str(
            r#"[
    {"types":["gem"],"cost":{"kind":"exact","cost":1}},
    {"types":["gem","relic"],"cost":{"kind":"any"}},
    {"types":["relic"],"cost":{"kind":"range","min":3,"max":5}},
    {"types":["spell"],"cost":{"kind":"at_least","min":6}},
    {"types":["spell"],"cost":{"kind":"at_most","max":4}},
    {"types":["spell"],"cost":{"kind":"any"}}
]"#,
        )
        .expect("slots");
        fs::write(&file, table.to_string()).expect("write");
        let patterns = load_patterns(&file).expect("load");
        assert_eq!(patterns.len(), 6);
        assert_eq!(patterns[1].id, PatternId::Two);
        assert_eq!(patterns[1].slots[0].cost, CostRule::Exact { cost: 1 });
        assert_eq!(patterns[1].slots[1].types, vec![CardType::Gem, CardType::Relic]);
        assert_eq!(patterns[1].slots[2].cost, CostRule::Range { min: 3, max: 5 });
        assert_eq!(patterns[0], SupplyPattern::builtin(PatternId::One));
        let _ = fs::remove_file(file);
    }

    #[test]
    fn partial_pattern_table_is_rejected() {
        let file = unique_temp_file("partial_patterns");
        let patterns = vec![SupplyPattern::builtin(PatternId::Two)];
        fs::write(&file, serde_json::to_string(&patterns).expect("encode")).expect("write");
        let err = load_patterns(&file).expect_err("five patterns missing");
        let message = err.to_string();
        assert!(message.contains("missing pattern 1, pattern 3"), "{message}");
        assert!(!message.contains("pattern 2,"), "{message}");
        let _ = fs::remove_file(file);
    }

    #[test]
    fn inverted_cost_range_is_rejected() {
        let file = unique_temp_file("inverted_range");
        let mut patterns = builtin_patterns();
        patterns[4].slots[3].cost = CostRule::Range { min: 6, max: 4 };
        fs::write(&file, serde_json::to_string(&patterns).expect("encode")).expect("write");
        let err = load_patterns(&file).expect_err("empty range");
        assert!(
            err.to_string().contains("pattern 5 slot 4 has empty cost range 6-4"),
            "{err}"
        );
        let _ = fs::remove_file(file);
    }

    #[test]
    fn pattern_with_five_slots_fails_to_parse() {
        let file = unique_temp_file("short_pattern");
        let slot = r#"{"types":["gem"],"cost":{"kind":"any"}}"#;
        let body = format!(r#"[{{"id":1,"slots":[{slot},{slot},{slot},{slot},{slot}]}}]"#);
        fs::write(&file, body).expect("write");
        assert!(load_patterns(&file).is_err());
        let _ = fs::remove_file(file);
    }

    #[test]
    fn repeated_pattern_id_is_rejected() {
        let file = unique_temp_file("repeat_pattern");
        let patterns = vec![
            SupplyPattern::builtin(PatternId::One),
            SupplyPattern::builtin(PatternId::One),
        ];
        fs::write(&file, serde_json::to_string(&patterns).expect("encode")).expect("write");
        let err = load_patterns(&file).expect_err("duplicate id");
        assert!(err.to_string().contains("pattern 1 defined twice"));
        let _ = fs::remove_file(file);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let file = unique_temp_file("config");
        fs::write(&file, r#"{"slot_selection":"random"}"#).expect("write");
        let config = load_generator_config(&file).expect("load");
        assert_eq!(config.slot_selection, SlotSelection::Random);
        assert_eq!(config.max_attempts, GeneratorConfig::default().max_attempts);
        let _ = fs::remove_file(file);
    }

    fn unique_temp_file(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "aeon_supply_{label}_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
