//! Case folding for bonus text matching
//!
//! Bonus categories are Turkish. Turkish has two distinct letters `i`/`İ`
//! (dotted) and `ı`/`I` (dotless), so the generic Unicode lowercase mapping
//! folds them wrong: `İ` becomes `i` + U+0307 and `I` becomes `i`. Matching
//! keys such as "Yarı İnsanlara Karşı Güçlü" against scraped text needs the
//! Turkish mapping, applied identically to both sides.

use serde::{Deserialize, Serialize};
use specta::Type;
use unicode_normalization::UnicodeNormalization;

const CAPITAL_DOTTED_I: char = '\u{0130}'; // İ
const CAPITAL_DOTLESS_I: char = 'I';
const SMALL_DOTLESS_I: char = '\u{0131}'; // ı

/// Strategy used to fold text before substring comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, Default)]
pub enum CaseFolding {
    /// Explicit Turkish remapping of the I-family, Unicode lowercase for the rest
    #[default]
    Turkish,
    /// Locale-independent `str::to_lowercase`. Kept for regression comparison only.
    Unicode,
}

impl CaseFolding {
    pub fn fold(&self, text: &str) -> String {
        match self {
            CaseFolding::Turkish => fold_turkish(text),
            CaseFolding::Unicode => fold_unicode(text),
        }
    }
}

/// Fold text with the Turkish I-family table.
///
/// Input is NFC-composed first so that `I` followed by a combining dot above
/// (as some scraped pages emit it) is treated as `İ`.
pub fn fold_turkish(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());

    for ch in text.nfc() {
        match ch {
            CAPITAL_DOTTED_I => folded.push('i'),
            CAPITAL_DOTLESS_I => folded.push(SMALL_DOTLESS_I),
            other => folded.extend(other.to_lowercase()),
        }
    }

    folded
}

/// Generic Unicode lowercase after NFC composition
pub fn fold_unicode(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.to_lowercase()
}
