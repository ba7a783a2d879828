use crate::modules::bonus::domain::{BonusClassifier, BonusTaxonomy};
use crate::modules::listing::domain::entities::{ClassifiedListing, Listing};
use crate::modules::listing::domain::value_objects::{
    extract_plus_level, BucketFilter, UpgradeBucket,
};
use crate::shared::utils::LogContext;
use serde::{Deserialize, Serialize};
use specta::Type;
use std::collections::BTreeMap;

/// Listing counts per upgrade bucket, for filter tabs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct BucketCounts {
    pub total: u32,
    pub material: u32,
    pub tier_0_6: u32,
    pub tier_7_8: u32,
    pub tier_9: u32,
    pub tier_10_plus: u32,
}

impl BucketCounts {
    pub fn get(&self, bucket: UpgradeBucket) -> u32 {
        match bucket {
            UpgradeBucket::Material => self.material,
            UpgradeBucket::Tier0To6 => self.tier_0_6,
            UpgradeBucket::Tier7To8 => self.tier_7_8,
            UpgradeBucket::Tier9 => self.tier_9,
            UpgradeBucket::Tier10Plus => self.tier_10_plus,
        }
    }

    fn increment(&mut self, bucket: UpgradeBucket) {
        let slot = match bucket {
            UpgradeBucket::Material => &mut self.material,
            UpgradeBucket::Tier0To6 => &mut self.tier_0_6,
            UpgradeBucket::Tier7To8 => &mut self.tier_7_8,
            UpgradeBucket::Tier9 => &mut self.tier_9,
            UpgradeBucket::Tier10Plus => &mut self.tier_10_plus,
        };
        *slot += 1;
        self.total += 1;
    }
}

/// Read-side queries over an already fetched listing collection.
///
/// Nothing here touches the network or mutates listings; every view is
/// recomputed from the listings and the taxonomy.
pub struct ListingAggregator<'a> {
    classifier: BonusClassifier<'a>,
}

impl<'a> ListingAggregator<'a> {
    pub fn new(taxonomy: &'a BonusTaxonomy) -> Self {
        Self {
            classifier: BonusClassifier::new(taxonomy),
        }
    }

    /// Stable filter by the bucket derived from each item name
    pub fn filter(listings: &[Listing], filter: BucketFilter) -> Vec<Listing> {
        match filter {
            BucketFilter::All => listings.to_vec(),
            BucketFilter::Only(_) => listings
                .iter()
                .filter(|l| filter.matches(UpgradeBucket::for_item_name(&l.item.name)))
                .cloned()
                .collect(),
        }
    }

    /// Group listings by bucket; each group keeps the original relative order
    pub fn partition(listings: &[Listing]) -> BTreeMap<UpgradeBucket, Vec<Listing>> {
        let mut groups: BTreeMap<UpgradeBucket, Vec<Listing>> = BTreeMap::new();
        for listing in listings {
            groups
                .entry(UpgradeBucket::for_item_name(&listing.item.name))
                .or_default()
                .push(listing.clone());
        }
        groups
    }

    pub fn bucket_counts(listings: &[Listing]) -> BucketCounts {
        let mut counts = BucketCounts::default();
        for listing in listings {
            counts.increment(UpgradeBucket::for_item_name(&listing.item.name));
        }
        counts
    }

    pub fn classify_listing(&self, listing: &Listing) -> ClassifiedListing {
        let bonuses: Vec<_> = listing
            .bonuses
            .iter()
            .map(|b| self.classifier.classify_bonus(b))
            .collect();
        let max_roll_count = bonuses.iter().filter(|b| b.is_max_roll).count() as u32;
        let upgrade_level = extract_plus_level(&listing.item.name);

        ClassifiedListing {
            listing: listing.clone(),
            bonuses,
            upgrade_level,
            bucket: UpgradeBucket::from_level(upgrade_level),
            max_roll_count,
        }
    }

    /// Classified listings of the selected bucket, original order
    pub fn view(&self, listings: &[Listing], filter: BucketFilter) -> Vec<ClassifiedListing> {
        let view: Vec<ClassifiedListing> = listings
            .iter()
            .map(|l| self.classify_listing(l))
            .filter(|cl| filter.matches(cl.bucket))
            .collect();

        LogContext::classification_summary(
            view.len(),
            view.iter().map(|cl| cl.bonuses.len()).sum(),
            view.iter().map(|cl| cl.max_roll_count as usize).sum(),
        );

        view
    }

    /// Classified listings carrying at least one max-roll bonus, original order
    pub fn with_max_roll(&self, listings: &[Listing]) -> Vec<ClassifiedListing> {
        listings
            .iter()
            .map(|l| self.classify_listing(l))
            .filter(ClassifiedListing::has_max_roll)
            .collect()
    }
}
