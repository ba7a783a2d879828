use crate::modules::bonus::domain::value_objects::{BonusDefinition, CaseFolding};
use crate::shared::errors::{AppError, AppResult};
use std::collections::HashSet;

/// Built-in maximum rolls (40 categories), as shown on the market dashboard
const METIN2_MAX_BONUSES: &[(&str, u64)] = &[
    // Stats
    ("Zeka", 12),
    ("Güç", 12),
    ("Çeviklik", 12),
    ("Canlılık", 12),
    ("Yaşam Enerjisi", 12),
    // Defenses
    ("Kılıç Savunması", 15),
    ("Çift El Savunması", 15),
    ("Bıçak Savunması", 15),
    ("Çan Savunması", 15),
    ("Yelpaze Savunması", 15),
    ("Ok Savunması", 15),
    ("Büyüye Karşı Dayanıklılık", 15),
    ("Şimşeğe Karşı Dayanıklılık", 15),
    ("Rüzgara Karşı Dayanıklılık", 15),
    ("Ateşe Karşı Dayanıklılık", 15),
    // Strong against
    // Common ceiling; some items roll higher. Applied as a uniform floor.
    ("Yarı İnsanlara Karşı Güçlü", 10),
    ("Ölümsüzlere karşı güçlü", 20),
    ("Şeytanlara karşı güçlü", 20),
    ("Hayvanlara karşı güçlü", 20),
    ("Mistiklere karşı güçlü", 20),
    ("Orklara karşı güçlü", 20),
    // Combat
    ("Kritik Vuruş Şansı", 10),
    ("Delici Vuruş Şansı", 10),
    ("Zehirleme şansı", 8),
    ("Sersemletme şansı", 8),
    ("Yavaşlatma şansı", 8),
    ("Büyü Hızı", 20),
    ("Saldırı Değeri", 50),
    ("Saldırı Hızı", 8),
    // Special
    ("Max HP", 2000),
    ("EXP Bonus Şansı", 20),
    ("İki kat eşya düşürme şansı", 20),
    ("HP Üretimi", 30),
    ("SP Üretimi", 30),
    ("Hasar HP Tarafından Emilecek", 10),
    ("Hasar SP Tarafından Emilecek", 10),
    ("Vücut darbelerini yansıtma şansı", 15),
    ("Beden karşısındaki atakların bloklanması", 15),
    ("Ortalama Zarar", 50),
    ("Beceri Hasarı", 20),
];

/// A taxonomy entry together with its key pre-folded for matching
#[derive(Debug, Clone)]
pub struct TaxonomyEntry {
    pub definition: BonusDefinition,
    pub folded_key: String,
}

/// Immutable table of bonus categories and their maximum rolls.
///
/// Keys are unique under Turkish case folding. Built once at startup and
/// shared by reference; there is no mutating API.
#[derive(Debug, Clone)]
pub struct BonusTaxonomy {
    entries: Vec<TaxonomyEntry>,
}

impl BonusTaxonomy {
    pub fn from_definitions(definitions: Vec<BonusDefinition>) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(definitions.len());
        let mut entries = Vec::with_capacity(definitions.len());

        for definition in definitions {
            if definition.category.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Bonus category cannot be empty".to_string(),
                ));
            }

            let folded_key = CaseFolding::Turkish.fold(&definition.category);
            if !seen.insert(folded_key.clone()) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate bonus category '{}'",
                    definition.category
                )));
            }

            entries.push(TaxonomyEntry {
                definition,
                folded_key,
            });
        }

        Ok(Self { entries })
    }

    /// The table the dashboard ships with
    pub fn metin2_default() -> Self {
        let entries = METIN2_MAX_BONUSES
            .iter()
            .map(|(category, max_value)| TaxonomyEntry {
                definition: BonusDefinition::new(*category, *max_value),
                folded_key: CaseFolding::Turkish.fold(category),
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn definitions(&self) -> impl Iterator<Item = &BonusDefinition> {
        self.entries.iter().map(|e| &e.definition)
    }

    /// Threshold for a category, compared under Turkish folding
    pub fn threshold_for(&self, category: &str) -> Option<u64> {
        let folded = CaseFolding::Turkish.fold(category);
        self.entries
            .iter()
            .find(|e| e.folded_key == folded)
            .map(|e| e.definition.max_value)
    }

    /// Categories whose folded form differs between two strategies.
    ///
    /// A category listed here will match differently depending on which
    /// folding the classifier uses.
    pub fn keys_sensitive_to_folding(&self, a: CaseFolding, b: CaseFolding) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| a.fold(&e.definition.category) != b.fold(&e.definition.category))
            .map(|e| e.definition.category.as_str())
            .collect()
    }
}

impl Default for BonusTaxonomy {
    fn default() -> Self {
        Self::metin2_default()
    }
}
