#[cfg(feature = "desktop")]
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use domain::{
    BonusClassifier, BonusDefinition, BonusTaxonomy, CaseFolding, ClassifiedBonus, RawBonus,
};
pub use infrastructure::TaxonomyLoader;
