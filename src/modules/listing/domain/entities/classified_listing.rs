use super::listing::Listing;
use crate::modules::bonus::domain::ClassifiedBonus;
use crate::modules::listing::domain::value_objects::UpgradeBucket;
use serde::{Deserialize, Serialize};
use specta::Type;

/// Read-side view of a listing with derived labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ClassifiedListing {
    pub listing: Listing,
    /// Same order as `listing.bonuses`
    pub bonuses: Vec<ClassifiedBonus>,
    pub upgrade_level: Option<u32>,
    pub bucket: UpgradeBucket,
    pub max_roll_count: u32,
}

impl ClassifiedListing {
    pub fn has_max_roll(&self) -> bool {
        self.max_roll_count > 0
    }
}
