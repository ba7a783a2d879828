pub mod bonus;
pub mod bonus_taxonomy;

pub use bonus::{ClassifiedBonus, RawBonus};
pub use bonus_taxonomy::{BonusTaxonomy, TaxonomyEntry};
