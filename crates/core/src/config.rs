use serde::{Deserialize, Serialize};

/// How the substitution step chooses among slots that could take an
/// ability card.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotSelection {
    /// First slot in pattern order with a candidate.
    #[default]
    InOrder,
    /// Uniformly among every slot with a candidate.
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub max_attempts: u32,
    pub slot_selection: SlotSelection,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            slot_selection: SlotSelection::InOrder,
            seed: None,
        }
    }
}
