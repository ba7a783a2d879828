/// Test data factories using builder pattern
use chrono::{DateTime, TimeZone, Utc};
use pazar_lib::modules::bonus::RawBonus;
use pazar_lib::modules::listing::{ListedItem, Listing, ServerRef};

pub struct ListingFactory {
    id: i64,
    item_name: String,
    server: String,
    quantity: i64,
    price_won: i64,
    price_yang: i64,
    seen_at: DateTime<Utc>,
    bonuses: Vec<RawBonus>,
}

impl Default for ListingFactory {
    fn default() -> Self {
        Self {
            id: 1,
            item_name: "Kılıç +9".to_string(),
            server: "Marmara".to_string(),
            quantity: 1,
            price_won: 0,
            price_yang: 1_000_000,
            seen_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
            bonuses: Vec::new(),
        }
    }
}

impl ListingFactory {
    pub fn new(id: i64, item_name: &str) -> Self {
        Self {
            id,
            item_name: item_name.to_string(),
            ..Self::default()
        }
    }

    pub fn server(mut self, server: &str) -> Self {
        self.server = server.to_string();
        self
    }

    pub fn price(mut self, won: i64, yang: i64) -> Self {
        self.price_won = won;
        self.price_yang = yang;
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn bonus(mut self, text: &str) -> Self {
        self.bonuses.push(RawBonus::new(text));
        self
    }

    pub fn build(self) -> Listing {
        Listing {
            id: self.id,
            item: ListedItem {
                name: self.item_name,
                category: None,
                image_url: None,
            },
            server: ServerRef { name: self.server },
            seller_name: format!("satici{}", self.id),
            quantity: self.quantity,
            price_won: self.price_won,
            price_yang: self.price_yang,
            total_price_yang: self.price_won * 100_000_000 + self.price_yang,
            seen_at: self.seen_at,
            bonuses: self.bonuses,
        }
    }
}

/// A mixed market page covering every upgrade bucket
pub fn sample_market() -> Vec<Listing> {
    vec![
        ListingFactory::new(1, "Kılıç +9")
            .bonus("Ölümsüzlere karşı güçlü +%20")
            .build(),
        ListingFactory::new(2, "İksir").quantity(200).build(),
        ListingFactory::new(3, "Zırh +12")
            .bonus("Mistiklere karşı güçlü +%6")
            .build(),
        ListingFactory::new(4, "Kalkan +7")
            .bonus("Max HP +2000")
            .build(),
        ListingFactory::new(5, "Dolunay Kılıcı+9")
            .bonus("Yarı insanlara karşı güçlü +%10")
            .bonus("Ortalama Zarar %45")
            .build(),
        ListingFactory::new(6, "Ejderha Taşı").build(),
        ListingFactory::new(7, "Yelpaze +0")
            .bonus("Hayvanlara karşı güçlü (Toplam değerin +%6 oranında)")
            .build(),
        ListingFactory::new(8, "Kılıç +9").server("Ege").build(),
        ListingFactory::new(9, "Zen Fasulyesi").build(),
    ]
}
