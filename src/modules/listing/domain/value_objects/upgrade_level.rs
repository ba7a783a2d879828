use crate::shared::errors::AppError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use specta::Type;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static PLUS_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+([0-9]+)").expect("plus level pattern is valid"));

/// Refinement value of an item name: the digits right after the first `+`
/// that is immediately followed by digits. `None` means a raw material.
pub fn extract_plus_level(item_name: &str) -> Option<u32> {
    PLUS_LEVEL
        .captures(item_name)
        .and_then(|caps| caps.get(1))
        .map(|digits| digits.as_str().parse::<u32>().unwrap_or(u32::MAX))
}

/// Refinement tier used to filter listings. Mutually exclusive and exhaustive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpgradeBucket {
    Material,
    #[serde(rename = "TIER_0_6")]
    Tier0To6,
    #[serde(rename = "TIER_7_8")]
    Tier7To8,
    #[serde(rename = "TIER_9")]
    Tier9,
    #[serde(rename = "TIER_10_PLUS")]
    Tier10Plus,
}

impl UpgradeBucket {
    pub fn from_level(level: Option<u32>) -> Self {
        match level {
            None => UpgradeBucket::Material,
            Some(0..=6) => UpgradeBucket::Tier0To6,
            Some(7..=8) => UpgradeBucket::Tier7To8,
            Some(9) => UpgradeBucket::Tier9,
            Some(_) => UpgradeBucket::Tier10Plus,
        }
    }

    pub fn for_item_name(item_name: &str) -> Self {
        Self::from_level(extract_plus_level(item_name))
    }

    pub fn all() -> [UpgradeBucket; 5] {
        [
            UpgradeBucket::Material,
            UpgradeBucket::Tier0To6,
            UpgradeBucket::Tier7To8,
            UpgradeBucket::Tier9,
            UpgradeBucket::Tier10Plus,
        ]
    }

    /// Wire name, also accepted by `FromStr`
    pub fn code(&self) -> &'static str {
        match self {
            UpgradeBucket::Material => "MATERIAL",
            UpgradeBucket::Tier0To6 => "TIER_0_6",
            UpgradeBucket::Tier7To8 => "TIER_7_8",
            UpgradeBucket::Tier9 => "TIER_9",
            UpgradeBucket::Tier10Plus => "TIER_10_PLUS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UpgradeBucket::Material => "Material",
            UpgradeBucket::Tier0To6 => "+0 - +6",
            UpgradeBucket::Tier7To8 => "+7 - +8",
            UpgradeBucket::Tier9 => "+9",
            UpgradeBucket::Tier10Plus => "+10 and above",
        }
    }
}

impl fmt::Display for UpgradeBucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for UpgradeBucket {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|b| b.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown upgrade bucket '{}'", s)))
    }
}

/// Bucket selection for listing views; `All` passes everything through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, Default)]
#[serde(tag = "kind", content = "bucket")]
pub enum BucketFilter {
    #[default]
    All,
    Only(UpgradeBucket),
}

impl BucketFilter {
    pub fn matches(&self, bucket: UpgradeBucket) -> bool {
        match self {
            BucketFilter::All => true,
            BucketFilter::Only(wanted) => *wanted == bucket,
        }
    }
}

impl From<UpgradeBucket> for BucketFilter {
    fn from(bucket: UpgradeBucket) -> Self {
        BucketFilter::Only(bucket)
    }
}

impl FromStr for BucketFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            Ok(BucketFilter::All)
        } else {
            s.parse::<UpgradeBucket>().map(BucketFilter::Only)
        }
    }
}
