pub mod bonus_definition;
pub mod case_folding;

pub use bonus_definition::BonusDefinition;
pub use case_folding::{fold_turkish, fold_unicode, CaseFolding};
