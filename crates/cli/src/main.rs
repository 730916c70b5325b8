use aeon_supply_core::{
    generate_nemesis_deck, request_supply_with_retries, slot_report, Ability, Card, EventBus,
    ExpansionFilter, GenerationError, GeneratorConfig, NemesisCardKind, NemesisDeck, PatternId,
    PatternStore, RngState, SlotSelection, Supply, Wave,
};
use aeon_supply_data::{load_assets, AssetReport};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_ASSETS_DIR: &str = "assets";
const DEFAULT_PLAYERS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Supply,
    Nemesis,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    assets: PathBuf,
    wave: Option<Wave>,
    sets: Vec<String>,
    abilities: Vec<Ability>,
    players: u8,
    seed: Option<u64>,
    random_slot: bool,
    verbose: bool,
    json: bool,
}

/// Values read from `AEON_SUPPLY_*` before flags are applied.
#[derive(Debug, Clone, Default)]
struct EnvDefaults {
    assets: Option<String>,
    seed: Option<String>,
}

impl EnvDefaults {
    fn from_env() -> Self {
        Self {
            assets: std::env::var("AEON_SUPPLY_ASSETS").ok(),
            seed: std::env::var("AEON_SUPPLY_SEED").ok(),
        }
    }
}

impl CliOptions {
    fn filter(&self) -> ExpansionFilter {
        match self.wave {
            Some(wave) => ExpansionFilter::Wave(wave),
            None => ExpansionFilter::sets(self.sets.iter().cloned()),
        }
    }

    fn generator_config(&self, base: &GeneratorConfig) -> GeneratorConfig {
        let mut config = base.clone();
        if self.random_slot {
            config.slot_selection = SlotSelection::Random;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

fn parse_cli_options(args: &[String], env: EnvDefaults) -> Result<CliOptions, String> {
    let mut command = Command::Supply;
    let mut assets = PathBuf::from(env.assets.unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()));
    let mut wave = None;
    let mut sets = Vec::new();
    let mut abilities = Vec::new();
    let mut players = DEFAULT_PLAYERS;
    let mut seed = match env.seed {
        Some(value) => Some(parse_seed(&value)?),
        None => None,
    };
    let mut random_slot = false;
    let mut verbose = false;
    let mut json = false;
    let mut idx = 0usize;
    while idx < args.len() {
        let arg = args[idx].as_str();
        match arg {
            "supply" if idx == 0 => command = Command::Supply,
            "nemesis" if idx == 0 => command = Command::Nemesis,
            "help" | "--help" | "-h" => command = Command::Help,
            "--assets" => {
                assets = PathBuf::from(flag_value(args, idx, arg)?);
                idx += 1;
            }
            "--wave" => {
                let value = flag_value(args, idx, arg)?;
                let parsed = value
                    .parse::<u8>()
                    .ok()
                    .and_then(Wave::from_number)
                    .ok_or_else(|| format!("--wave expects 1 or 2, got '{value}'"))?;
                wave = Some(parsed);
                idx += 1;
            }
            "--set" => {
                sets.push(flag_value(args, idx, arg)?.to_string());
                idx += 1;
            }
            "--ability" => {
                let value = flag_value(args, idx, arg)?;
                let ability = Ability::from_key(value).ok_or_else(|| {
                    let keys: Vec<&str> = Ability::ALL.iter().map(|item| item.key()).collect();
                    format!("unknown ability '{value}' (one of {})", keys.join(", "))
                })?;
                if !abilities.contains(&ability) {
                    abilities.push(ability);
                }
                idx += 1;
            }
            "--players" => {
                let value = flag_value(args, idx, arg)?;
                players = value
                    .parse::<u8>()
                    .map_err(|_| format!("--players expects a number, got '{value}'"))?;
                idx += 1;
            }
            "--seed" => {
                seed = Some(parse_seed(flag_value(args, idx, arg)?)?);
                idx += 1;
            }
            "--random-slot" => random_slot = true,
            "--verbose" | "-v" => verbose = true,
            "--json" => json = true,
            other => return Err(format!("unrecognized argument '{other}'")),
        }
        idx += 1;
    }
    if wave.is_some() && !sets.is_empty() {
        return Err("use either --wave or --set, not both".to_string());
    }
    Ok(CliOptions {
        command,
        assets,
        wave,
        sets,
        abilities,
        players,
        seed,
        random_slot,
        verbose,
        json,
    })
}

fn flag_value<'a>(args: &'a [String], idx: usize, flag: &str) -> Result<&'a str, String> {
    args.get(idx + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn parse_seed(value: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("seed must be an unsigned integer, got '{value}'"))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args, EnvDefaults::from_env()) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("run with --help for usage");
            std::process::exit(1);
        }
    };
    let result = match options.command {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Supply => load(&options.assets).and_then(|report| run_supply(&options, report)),
        Command::Nemesis => {
            load(&options.assets).and_then(|report| run_nemesis(&options, report))
        }
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load(dir: &Path) -> Result<AssetReport, String> {
    let report = load_assets(dir).map_err(|err| format!("{err:#}"))?;
    for warning in &report.warnings {
        eprintln!("asset warning: {warning}");
    }
    Ok(report)
}

fn run_supply(options: &CliOptions, report: AssetReport) -> Result<(), String> {
    let config = options.generator_config(&report.config);
    let seed = config.seed.unwrap_or_else(clock_seed);
    let filter = options.filter();
    let mut rng = RngState::from_seed(seed);
    let mut events = EventBus::default();
    let result = request_supply_with_retries(
        &filter,
        &options.abilities,
        &report.catalog,
        &report.catalog,
        &config,
        &mut rng,
        &mut events,
    );
    flush_events(&mut events, options.verbose);
    match result {
        Ok(supply) => {
            if options.json {
                let text = serde_json::to_string_pretty(&supply).map_err(|err| err.to_string())?;
                println!("{text}");
            } else {
                print_supply(&supply, seed, &options.abilities);
            }
            Ok(())
        }
        Err(err) => {
            if let GenerationError::SlotUnfillable { pattern, .. } = &err {
                print_slot_report(&report, *pattern, &filter);
            }
            Err(err.to_string())
        }
    }
}

fn run_nemesis(options: &CliOptions, report: AssetReport) -> Result<(), String> {
    let config = options.generator_config(&report.config);
    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut rng = RngState::from_seed(seed);
    let mut events = EventBus::default();
    let deck = generate_nemesis_deck(
        &report.catalog.nemesis_cards,
        &options.filter(),
        options.players,
        &mut rng,
        &mut events,
    )
    .map_err(|err| err.to_string())?;
    flush_events(&mut events, options.verbose);
    if options.json {
        let text = serde_json::to_string_pretty(&deck).map_err(|err| err.to_string())?;
        println!("{text}");
    } else {
        print_nemesis_deck(&deck, seed);
    }
    Ok(())
}

fn flush_events(events: &mut EventBus, verbose: bool) {
    for event in events.drain() {
        if event.is_warning() {
            eprintln!("warning: {event}");
        } else if verbose {
            eprintln!("event: {event}");
        }
    }
}

fn print_supply(supply: &Supply, seed: u64, requested: &[Ability]) {
    println!(
        "== Supply: {} | {} | seed {seed} ==",
        supply.pattern_id(),
        supply.filter()
    );
    for (slot, card) in supply.slots() {
        let spec = &supply.pattern().slots[slot];
        println!("  {}. {:<24} {}", slot + 1, spec.to_string(), format_card(card));
    }
    let missing = supply.missing_abilities(requested);
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        println!("unsatisfied: {}", names.join(", "));
    }
}

fn format_card(card: &Card) -> String {
    let mut line = format!("{card} cost {}", card.cost);
    if !card.abilities.is_empty() {
        let names: Vec<&str> = card.abilities.iter().map(|item| item.display_name()).collect();
        line.push_str(&format!(" [{}]", names.join(", ")));
    }
    line
}

fn print_slot_report(report: &AssetReport, pattern: PatternId, filter: &ExpansionFilter) {
    let Ok(patterns) = report.catalog.all_patterns() else {
        return;
    };
    let Some(pattern) = patterns.iter().find(|item| item.id == pattern) else {
        return;
    };
    let Ok(counts) = slot_report(pattern, &report.catalog, filter) else {
        return;
    };
    eprintln!("candidates per slot for {} under {filter}:", pattern.id);
    for (slot, count) in counts.iter().enumerate() {
        eprintln!("  {}. {:<24} {count}", slot + 1, pattern.slots[slot].to_string());
    }
}

fn kind_label(kind: NemesisCardKind) -> &'static str {
    match kind {
        NemesisCardKind::Attack => "attack",
        NemesisCardKind::Power => "power",
        NemesisCardKind::Minion => "minion",
    }
}

fn print_nemesis_deck(deck: &NemesisDeck, seed: u64) {
    let dist = deck.distribution;
    println!(
        "== Nemesis basic deck: {} players | tiers {}/{}/{} | seed {seed} ==",
        deck.players, dist.tier_1, dist.tier_2, dist.tier_3
    );
    for (idx, card) in deck.cards.iter().enumerate() {
        println!(
            "  {:>2}. T{} {:<7} {} ({})",
            idx + 1,
            card.tier,
            kind_label(card.kind),
            card,
            card.expansion
        );
    }
}

fn print_help() {
    println!("usage: aeon-supply [supply|nemesis] [options]");
    println!();
    println!("Commands:");
    println!("  supply                   draw a six-card market (default)");
    println!("  nemesis                  draw a basic nemesis deck");
    println!();
    println!("Options:");
    println!("  --assets DIR             asset directory (env AEON_SUPPLY_ASSETS)");
    println!("  --wave 1|2               only use sets from one wave");
    println!("  --set NAME               only use the named set (repeatable)");
    println!("  --ability KEY            require a card with this ability (repeatable)");
    println!("  --players N              player count for nemesis decks (1-4)");
    println!("  --seed N                 random seed (env AEON_SUPPLY_SEED)");
    println!("  --random-slot            place ability cards in a random eligible slot");
    println!("  --json                   print the result as JSON");
    println!("  --verbose|-v             print every generation event");
    println!();
    let keys: Vec<&str> = Ability::ALL.iter().map(|item| item.key()).collect();
    println!("Ability keys: {}", keys.join(", "));
}
