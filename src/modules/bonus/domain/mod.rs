pub mod entities;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{BonusTaxonomy, ClassifiedBonus, RawBonus, TaxonomyEntry};
pub use services::BonusClassifier;
pub use value_objects::{BonusDefinition, CaseFolding};
