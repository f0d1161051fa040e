//! Built-in demo assortment.

use premium_core::{Price, Product};

struct Seed {
    id: &'static str,
    name: &'static str,
    cents: i64,
    original_cents: Option<i64>,
    category: &'static str,
    description: &'static str,
    rating: f32,
    reviews: u32,
    flash_deal: bool,
    trending: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        name: "Wireless Noise-Cancelling Headphones",
        cents: 14_999,
        original_cents: Some(19_999),
        category: "Electronics",
        description: "Over-ear headphones with 30-hour battery life and adaptive noise cancelling.",
        rating: 4.7,
        reviews: 1_284,
        flash_deal: true,
        trending: true,
    },
    Seed {
        id: "2",
        name: "Smart Fitness Watch",
        cents: 8_999,
        original_cents: Some(11_999),
        category: "Electronics",
        description: "Heart-rate, sleep and step tracking with a week-long battery.",
        rating: 4.4,
        reviews: 856,
        flash_deal: true,
        trending: false,
    },
    Seed {
        id: "3",
        name: "Portable Bluetooth Speaker",
        cents: 4_999,
        original_cents: None,
        category: "Electronics",
        description: "Waterproof speaker with deep bass and 12 hours of playtime.",
        rating: 4.5,
        reviews: 642,
        flash_deal: false,
        trending: true,
    },
    Seed {
        id: "4",
        name: "Mechanical Keyboard",
        cents: 11_900,
        original_cents: None,
        category: "Electronics",
        description: "Hot-swappable switches, aluminium frame and per-key lighting.",
        rating: 4.6,
        reviews: 311,
        flash_deal: false,
        trending: false,
    },
    Seed {
        id: "5",
        name: "Classic Denim Jacket",
        cents: 6_500,
        original_cents: Some(8_500),
        category: "Fashion",
        description: "Stonewashed cotton denim with a relaxed fit.",
        rating: 4.3,
        reviews: 198,
        flash_deal: true,
        trending: false,
    },
    Seed {
        id: "6",
        name: "Linen Summer Shirt",
        cents: 3_900,
        original_cents: None,
        category: "Fashion",
        description: "Breathable linen shirt for warm days.",
        rating: 4.1,
        reviews: 87,
        flash_deal: false,
        trending: true,
    },
    Seed {
        id: "7",
        name: "Leather Crossbody Bag",
        cents: 7_900,
        original_cents: None,
        category: "Accessories",
        description: "Full-grain leather bag with an adjustable strap.",
        rating: 4.8,
        reviews: 423,
        flash_deal: false,
        trending: true,
    },
    Seed {
        id: "8",
        name: "Polarized Sunglasses",
        cents: 2_999,
        original_cents: Some(3_999),
        category: "Accessories",
        description: "UV400 polarized lenses in a lightweight frame.",
        rating: 4.2,
        reviews: 265,
        flash_deal: true,
        trending: false,
    },
    Seed {
        id: "9",
        name: "Minimalist Wrist Watch",
        cents: 9_500,
        original_cents: None,
        category: "Accessories",
        description: "Sapphire glass, stainless steel case and a mesh strap.",
        rating: 4.6,
        reviews: 174,
        flash_deal: false,
        trending: false,
    },
    Seed {
        id: "10",
        name: "Ceramic Pour-Over Set",
        cents: 3_400,
        original_cents: None,
        category: "Home",
        description: "Hand-glazed dripper and carafe for slow coffee.",
        rating: 4.7,
        reviews: 92,
        flash_deal: false,
        trending: true,
    },
    Seed {
        id: "11",
        name: "Aromatherapy Diffuser",
        cents: 2_500,
        original_cents: Some(3_200),
        category: "Home",
        description: "Ultrasonic diffuser with ambient light and auto shut-off.",
        rating: 4.0,
        reviews: 141,
        flash_deal: true,
        trending: false,
    },
    Seed {
        id: "12",
        name: "Yoga Mat",
        cents: 2_800,
        original_cents: None,
        category: "Sports",
        description: "Non-slip 6mm mat with carrying strap.",
        rating: 4.5,
        reviews: 389,
        flash_deal: false,
        trending: false,
    },
];

/// Discount percentage between an original and a sale price, in whole percent.
fn discount_percent(original_cents: i64, cents: i64) -> Option<u8> {
    if original_cents <= cents || original_cents <= 0 {
        return None;
    }
    let percent = (original_cents - cents) * 100 / original_cents;
    u8::try_from(percent).ok()
}

pub(super) fn demo_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: seed.id.into(),
            name: seed.name.to_string(),
            price: Price::from_cents(seed.cents),
            category: seed.category.to_string(),
            image: format!("/images/products/{}.jpg", seed.id),
            description: seed.description.to_string(),
            original_price: seed.original_cents.map(Price::from_cents),
            discount: seed
                .original_cents
                .and_then(|original| discount_percent(original, seed.cents)),
            rating: Some(seed.rating),
            review_count: Some(seed.reviews),
            is_flash_deal: seed.flash_deal,
            is_trending: seed.trending,
        })
        .collect()
}
