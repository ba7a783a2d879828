use serde::{Deserialize, Serialize};
use specta::Type;

/// One bonus category and the best value it can roll (inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct BonusDefinition {
    pub category: String,
    pub max_value: u64,
}

impl BonusDefinition {
    pub fn new(category: impl Into<String>, max_value: u64) -> Self {
        Self {
            category: category.into(),
            max_value,
        }
    }

    /// A rolled value reaches the category maximum
    pub fn is_max_roll(&self, value: u64) -> bool {
        value >= self.max_value
    }
}
