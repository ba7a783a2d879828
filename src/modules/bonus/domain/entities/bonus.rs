use serde::{Deserialize, Serialize};
use specta::Type;

/// A bonus line exactly as the ingestion job captured it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct RawBonus {
    pub bonus_name: String,
    #[serde(default)]
    pub bonus_value: Option<String>,
}

impl RawBonus {
    pub fn new(bonus_name: impl Into<String>) -> Self {
        Self {
            bonus_name: bonus_name.into(),
            bonus_value: None,
        }
    }
}

/// A bonus line with its derived max-roll flag. Computed on read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ClassifiedBonus {
    pub bonus_name: String,
    pub bonus_value: Option<String>,
    pub is_max_roll: bool,
}
