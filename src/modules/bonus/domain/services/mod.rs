pub mod bonus_classifier;

pub use bonus_classifier::BonusClassifier;
