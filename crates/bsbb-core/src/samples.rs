//! Static sample directory used when nothing is persisted or a provider
//! search fails.

use chrono::NaiveDate;

use crate::business::{BusinessRecord, Category, Deal, Review};

struct Sample {
    id: &'static str,
    name: &'static str,
    category: Category,
    address: &'static str,
    phone: &'static str,
    description: &'static str,
    deal: (&'static str, &'static str),
    reviews: &'static [(&'static str, u8, &'static str, (i32, u32, u32))],
}

const SAMPLE_DEAL_EXPIRY: &str = "2024-12-31";

const SAMPLES: &[Sample] = &[
    Sample {
        id: "joescoffee",
        name: "Joe's Coffee House",
        category: Category::Food,
        address: "123 Main St, Downtown",
        phone: "555-0101",
        description: "Cozy local coffee shop with artisanal brews and fresh pastries.",
        deal: ("Buy 2 Get 1 Free", "Any coffee drinks"),
        reviews: &[
            ("Ava", 5, "Best latte in town!", (2024, 1, 12)),
            ("Liam", 4, "Great vibe and friendly staff.", (2024, 2, 3)),
        ],
    },
    Sample {
        id: "greenthumb",
        name: "Green Thumb Garden Center",
        category: Category::Retail,
        address: "456 Oak Ave, Garden District",
        phone: "555-0102",
        description: "Family-owned garden center with expert advice and quality plants.",
        deal: ("20% Off All Seeds", "Valid this month"),
        reviews: &[],
    },
    Sample {
        id: "quickfix",
        name: "Quick Fix Auto Repair",
        category: Category::Services,
        address: "789 Industrial Blvd",
        phone: "555-0103",
        description: "Honest and reliable auto repair service, serving the community for over 20 years.",
        deal: ("Free Oil Change", "With any major service"),
        reviews: &[],
    },
    Sample {
        id: "mamasitalian",
        name: "Mama's Italian Kitchen",
        category: Category::Food,
        address: "321 Elm St, Little Italy",
        phone: "555-0104",
        description: "Authentic Italian cuisine made from recipes passed down through generations.",
        deal: ("10% Off Dinner", "Monday-Thursday"),
        reviews: &[],
    },
    Sample {
        id: "booknook",
        name: "The Book Nook",
        category: Category::Retail,
        address: "654 Pine St, Arts Quarter",
        phone: "555-0105",
        description: "Independent bookstore with a curated selection of new and used books.",
        deal: ("Buy 2 Get 1 Free", "All paperback books"),
        reviews: &[],
    },
];

/// Returns a fresh copy of the sample directory.
#[must_use]
pub fn sample_businesses() -> Vec<BusinessRecord> {
    SAMPLES.iter().map(Sample::to_record).collect()
}

impl Sample {
    fn to_record(&self) -> BusinessRecord {
        let reviews = self
            .reviews
            .iter()
            .filter_map(|&(user, rating, comment, (y, m, d))| {
                let date = NaiveDate::from_ymd_opt(y, m, d)?;
                Review::new(user, rating, comment, date).ok()
            })
            .collect();

        BusinessRecord {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            address: self.address.to_string(),
            phone: self.phone.to_string(),
            description: self.description.to_string(),
            rating: None,
            review_count: None,
            reviews,
            deals: vec![Deal {
                title: self.deal.0.to_string(),
                description: self.deal.1.to_string(),
                expires: SAMPLE_DEAL_EXPIRY.to_string(),
            }],
            latitude: None,
            longitude: None,
            website: None,
            opening_hours: None,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sample_ids_are_unique() {
        let samples = sample_businesses();
        let ids: HashSet<_> = samples.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), samples.len());
    }

    #[test]
    fn coffee_house_carries_its_reviews() {
        let samples = sample_businesses();
        let joes = samples.iter().find(|b| b.id == "joescoffee").unwrap();
        assert_eq!(joes.total_reviews(), 2);
        assert!((joes.average_rating() - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn every_sample_has_a_deal() {
        assert!(sample_businesses().iter().all(|b| b.deals.len() == 1));
    }
}
