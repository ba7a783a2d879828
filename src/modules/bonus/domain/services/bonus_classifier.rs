use crate::modules::bonus::domain::entities::{BonusTaxonomy, ClassifiedBonus, RawBonus};
use crate::modules::bonus::domain::value_objects::{BonusDefinition, CaseFolding};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"));

/// Decides whether free-form bonus text is a maximum roll for its category.
///
/// Matching is substring containment of the folded category inside the folded
/// text; numbers are read from the original text. Any matching category with
/// any number at or above its threshold makes the bonus a max roll.
pub struct BonusClassifier<'a> {
    taxonomy: &'a BonusTaxonomy,
    folding: CaseFolding,
}

impl<'a> BonusClassifier<'a> {
    pub fn new(taxonomy: &'a BonusTaxonomy) -> Self {
        Self::with_folding(taxonomy, CaseFolding::Turkish)
    }

    pub fn with_folding(taxonomy: &'a BonusTaxonomy, folding: CaseFolding) -> Self {
        Self { taxonomy, folding }
    }

    pub fn folding(&self) -> CaseFolding {
        self.folding
    }

    pub fn classify(&self, text: &str) -> bool {
        let matches = self.matching_definitions(text);
        if matches.is_empty() {
            return false;
        }

        let numbers = Self::extract_numbers(text);
        let is_max = matches
            .iter()
            .any(|def| numbers.iter().any(|&n| def.is_max_roll(n)));

        log::trace!(
            "classify '{}': {} categories, numbers {:?} -> {}",
            text,
            matches.len(),
            numbers,
            is_max
        );

        is_max
    }

    /// Every taxonomy entry whose folded key occurs in the folded text
    pub fn matching_definitions(&self, text: &str) -> Vec<&'a BonusDefinition> {
        let folded_text = self.folding.fold(text);

        self.taxonomy
            .entries()
            .iter()
            .filter(|entry| {
                let key = match self.folding {
                    CaseFolding::Turkish => Cow::Borrowed(entry.folded_key.as_str()),
                    other => Cow::Owned(other.fold(&entry.definition.category)),
                };
                folded_text.contains(key.as_ref())
            })
            .map(|entry| &entry.definition)
            .collect()
    }

    /// All maximal runs of ASCII digits, in order. Runs too long for `u64` saturate.
    pub fn extract_numbers(text: &str) -> Vec<u64> {
        DIGIT_RUN
            .find_iter(text)
            .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
            .collect()
    }

    pub fn classify_bonus(&self, bonus: &RawBonus) -> ClassifiedBonus {
        ClassifiedBonus {
            bonus_name: bonus.bonus_name.clone(),
            bonus_value: bonus.bonus_value.clone(),
            is_max_roll: self.classify(&bonus.bonus_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(taxonomy: &BonusTaxonomy) -> BonusClassifier<'_> {
        BonusClassifier::new(taxonomy)
    }

    #[test]
    fn test_max_roll_at_threshold() {
        let taxonomy = BonusTaxonomy::metin2_default();
        let c = classifier(&taxonomy);

        assert!(c.classify("Ölümsüzlere karşı güçlü +%20"));
        assert!(c.classify("Saldırı Değeri +50"));
        assert!(c.classify("Kritik Vuruş Şansı: +%10"));
    }

    #[test]
    fn test_below_threshold() {
        let taxonomy = BonusTaxonomy::metin2_default();
        let c = classifier(&taxonomy);

        assert!(!c.classify("Mistiklere karşı güçlü +%6"));
        assert!(!c.classify("Zehirleme şansı %2"));
        assert!(!c.classify("Hayvanlara karşı güçlü (Toplam değerin +%6 oranında)"));
    }

    #[test]
    fn test_dotted_capital_key_matches_lowercase_text() {
        let taxonomy = BonusTaxonomy::metin2_default();
        assert!(classifier(&taxonomy).classify("Yarı insanlara karşı güçlü +%10"));
    }

    #[test]
    fn test_generic_folding_misses_dotted_capital_key() {
        let taxonomy = BonusTaxonomy::metin2_default();
        let text = "Yarı insanlara karşı güçlü +%10";

        let turkish = BonusClassifier::with_folding(&taxonomy, CaseFolding::Turkish);
        let unicode = BonusClassifier::with_folding(&taxonomy, CaseFolding::Unicode);

        assert!(turkish.classify(text));
        assert!(!unicode.classify(text));
    }

    #[test]
    fn test_ortalama_zarar_below_threshold() {
        let taxonomy = BonusTaxonomy::metin2_default();
        assert!(!classifier(&taxonomy).classify("Ortalama Zarar %45"));
        assert!(classifier(&taxonomy).classify("Ortalama Zarar %55"));
    }

    #[test]
    fn test_no_error_on_degenerate_input() {
        let taxonomy = BonusTaxonomy::metin2_default();
        let c = classifier(&taxonomy);

        assert!(!c.classify(""));
        assert!(!c.classify("   "));
        assert!(!c.classify("Kritik Vuruş Şansı"));
        assert!(!c.classify("+%99"));
        assert!(!c.classify("💎💎💎"));
    }

    #[test]
    fn test_any_number_counts() {
        let taxonomy = BonusTaxonomy::metin2_default();
        // 6 is below, 25 reaches 20
        assert!(classifier(&taxonomy).classify("Orklara karşı güçlü +%6 (25)"));
    }

    #[test]
    fn test_any_matching_entry_counts() {
        let taxonomy = BonusTaxonomy::from_definitions(vec![
            BonusDefinition::new("Saldırı Hızı", 8),
            BonusDefinition::new("Saldırı", 50),
        ])
        .unwrap();
        let c = classifier(&taxonomy);

        assert_eq!(c.matching_definitions("Saldırı Hızı +%8").len(), 2);
        assert!(c.classify("Saldırı Hızı +%8"));
    }

    #[test]
    fn test_uppercase_input_folds() {
        let taxonomy = BonusTaxonomy::metin2_default();
        let c = classifier(&taxonomy);

        assert!(c.classify("KILIÇ SAVUNMASI %15"));
        assert!(c.classify("İKİ KAT EŞYA DÜŞÜRME ŞANSI %20"));
    }

    #[test]
    fn test_extract_numbers() {
        assert_eq!(
            BonusClassifier::extract_numbers("Max HP +2000 (12%)"),
            vec![2000, 12]
        );
        assert_eq!(BonusClassifier::extract_numbers("no digits"), Vec::<u64>::new());
        assert_eq!(BonusClassifier::extract_numbers("+%007"), vec![7]);
        assert_eq!(
            BonusClassifier::extract_numbers("99999999999999999999999"),
            vec![u64::MAX]
        );
    }

    #[test]
    fn test_non_ascii_digits_ignored() {
        // Arabic-indic digits are not decimal runs for the scraper's format
        assert!(BonusClassifier::extract_numbers("٢٠").is_empty());
    }

    #[test]
    fn test_classify_bonus_uses_name() {
        let taxonomy = BonusTaxonomy::metin2_default();
        let raw = RawBonus {
            bonus_name: "Büyü Hızı +%20".to_string(),
            bonus_value: Some(String::new()),
        };

        let classified = classifier(&taxonomy).classify_bonus(&raw);
        assert!(classified.is_max_roll);
        assert_eq!(classified.bonus_name, "Büyü Hızı +%20");
    }

    #[test]
    fn test_every_default_entry_reaches_max_at_threshold() {
        let taxonomy = BonusTaxonomy::metin2_default();
        let c = classifier(&taxonomy);

        for def in taxonomy.definitions() {
            let at = format!("{} +{}", def.category, def.max_value);
            assert!(c.classify(&at), "expected max roll for '{}'", at);

            let lower = format!("{} +{}", def.category.to_lowercase(), def.max_value);
            // Generic lowercase of the key is also accepted unless it contains İ
            if !def.category.contains('İ') {
                assert!(c.classify(&lower), "expected max roll for '{}'", lower);
            }
        }
    }
}
