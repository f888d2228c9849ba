//! Sample catalog for demos and tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use retaildesk_core::ItemId;

use crate::catalog::Catalog;
use crate::item::{InventoryItem, ItemFields};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn entry(
    name: &str,
    sku: &str,
    barcode: &str,
    category: &str,
    stock: u32,
    reorder_point: u32,
    price: i64,
    unit: &str,
    supplier: &str,
    incoming: u32,
    last_restock: NaiveDate,
    description: &str,
) -> InventoryItem {
    InventoryItem::new(
        ItemId::new(),
        ItemFields {
            name: name.to_string(),
            sku: sku.to_string(),
            barcode: barcode.to_string(),
            category: category.to_string(),
            stock,
            reorder_point,
            price: Decimal::from(price),
            unit: unit.to_string(),
            supplier: supplier.to_string(),
            incoming,
            last_restock,
            description: description.to_string(),
        },
    )
}

/// Five-item store catalog with a mix of healthy and low stock.
pub fn sample_catalog() -> Catalog {
    Catalog::with_items(vec![
        entry(
            "Premium Tulsi Honey",
            "HN-TL-001",
            "8901234000017",
            "Groceries",
            42,
            20,
            349,
            "bottle",
            "Raw Bliss Naturals",
            50,
            date(2024, 3, 12),
            "Organic honey infused with tulsi for immunity support.",
        ),
        entry(
            "Artisan Ceramic Cup Set",
            "CR-CP-114",
            "8901234000024",
            "Home & Living",
            12,
            10,
            1299,
            "set",
            "Studio Clayworks",
            24,
            date(2024, 4, 2),
            "Hand-crafted ceramic cups with matte glaze finish, set of four.",
        ),
        entry(
            "Cold Brew Coffee Mix",
            "CF-CB-078",
            "8901234000031",
            "Beverages",
            8,
            15,
            499,
            "pack",
            "Karma Beans Collective",
            60,
            date(2024, 2, 24),
            "Instant cold brew mix with chicory and single-origin beans.",
        ),
        entry(
            "Eco Smart Notebook",
            "ST-NB-210",
            "8901234000048",
            "Stationery",
            76,
            25,
            249,
            "piece",
            "Papyrus & Ink",
            120,
            date(2024, 3, 29),
            "Reusable synthetic paper notebook compatible with erasable pens.",
        ),
        entry(
            "Aura Soy Candle",
            "HM-CD-054",
            "8901234000055",
            "Home & Living",
            4,
            8,
            599,
            "piece",
            "Calm Co.",
            30,
            date(2024, 3, 5),
            "Hand-poured soy candle with lavender and sandalwood notes.",
        ),
    ])
}
