//! # Starter Data
//!
//! The catalog a new store opens with: five categories, a dozen everyday
//! products and three regular customers. Prices are whole rupiah.

use chrono::{DateTime, TimeZone, Utc};

use kelontong_core::{Customer, Money, Product, ProductCategory};

/// `(id, name, description, color)`
const CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("makanan", "Makanan", "Makanan ringan, mi instan, biskuit", "#ef4444"),
    ("minuman", "Minuman", "Minuman kemasan, jus, kopi", "#3b82f6"),
    ("kebutuhan-harian", "Kebutuhan Harian", "Sabun, shampoo, pasta gigi", "#10b981"),
    ("bumbu-dapur", "Bumbu Dapur", "Garam, gula, minyak goreng", "#f59e0b"),
    ("rokok", "Rokok", "Berbagai merk rokok", "#6b7280"),
];

struct ProductRow {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: i64,
    cost: i64,
    stock: u32,
    min_stock: u32,
    category: usize,
    barcode: &'static str,
    supplier: &'static str,
}

const PRODUCTS: &[ProductRow] = &[
    ProductRow { id: "p001", name: "Indomie Goreng", description: "Mi instan rasa ayam goreng 85g", price: 3500, cost: 2800, stock: 150, min_stock: 20, category: 0, barcode: "8992388888881", supplier: "PT Indofood" },
    ProductRow { id: "p002", name: "Chitato Sapi Panggang", description: "Keripik kentang rasa sapi panggang 68g", price: 8500, cost: 6800, stock: 80, min_stock: 15, category: 0, barcode: "8992388123456", supplier: "PT Indofood" },
    ProductRow { id: "p003", name: "Biskuit Roma Kelapa", description: "Biskuit kelapa 300g", price: 12000, cost: 9500, stock: 45, min_stock: 10, category: 0, barcode: "8992761234567", supplier: "PT Mayora" },
    ProductRow { id: "p004", name: "Aqua Botol 600ml", description: "Air mineral dalam kemasan botol 600ml", price: 3000, cost: 2200, stock: 200, min_stock: 50, category: 1, barcode: "8992761111111", supplier: "PT Aqua Golden Mississippi" },
    ProductRow { id: "p005", name: "Teh Botol Sosro", description: "Teh dalam kemasan botol 450ml", price: 4500, cost: 3400, stock: 120, min_stock: 25, category: 1, barcode: "8992822222222", supplier: "PT Sinar Sosro" },
    ProductRow { id: "p006", name: "Kopi Kapal Api Mix", description: "Kopi instan 3in1 per sachet", price: 1500, cost: 1100, stock: 300, min_stock: 50, category: 1, barcode: "8992833333333", supplier: "PT Santos Jaya Abadi" },
    ProductRow { id: "p007", name: "Sabun Lifebuoy", description: "Sabun mandi batangan 110g", price: 5500, cost: 4200, stock: 60, min_stock: 12, category: 2, barcode: "8992844444444", supplier: "PT Unilever Indonesia" },
    ProductRow { id: "p008", name: "Shampoo Pantene 170ml", description: "Shampoo rambut anti rontok 170ml", price: 18500, cost: 15000, stock: 35, min_stock: 8, category: 2, barcode: "8992855555555", supplier: "PT Procter & Gamble" },
    ProductRow { id: "p009", name: "Minyak Goreng Bimoli 1L", description: "Minyak goreng kelapa sawit 1 liter", price: 16000, cost: 13500, stock: 25, min_stock: 5, category: 3, barcode: "8992866666666", supplier: "PT Salim Ivomas Pratama" },
    ProductRow { id: "p010", name: "Gula Pasir Gulaku 1kg", description: "Gula pasir putih premium 1kg", price: 15000, cost: 12800, stock: 40, min_stock: 8, category: 3, barcode: "8992877777777", supplier: "PT Sugar Group Companies" },
    ProductRow { id: "p011", name: "Gudang Garam Filter", description: "Rokok kretek filter isi 12 batang", price: 22000, cost: 19500, stock: 80, min_stock: 15, category: 4, barcode: "8992888888888", supplier: "PT Gudang Garam" },
    ProductRow { id: "p012", name: "Djarum Super", description: "Rokok kretek isi 12 batang", price: 20500, cost: 18200, stock: 65, min_stock: 12, category: 4, barcode: "8992899999999", supplier: "PT Djarum" },
];

/// Midnight UTC; out-of-range dates fall back to the epoch.
fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn sample_categories() -> Vec<ProductCategory> {
    CATEGORIES
        .iter()
        .map(|(id, name, description, color)| ProductCategory {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
        })
        .collect()
}

pub fn sample_products() -> Vec<Product> {
    let categories = sample_categories();
    PRODUCTS
        .iter()
        .filter_map(|row| {
            let category = categories.get(row.category)?.clone();
            Some(Product {
                id: row.id.to_string(),
                name: row.name.to_string(),
                description: row.description.to_string(),
                price: Money::from_rupiah(row.price),
                cost: Money::from_rupiah(row.cost),
                stock: row.stock,
                min_stock: row.min_stock,
                category,
                barcode: Some(row.barcode.to_string()),
                image: format!("/images/products/{}.png", row.id),
                supplier: Some(row.supplier.to_string()),
                created_at: date(2024, 1, 1),
                updated_at: date(2024, 1, 15),
            })
        })
        .collect()
}

pub fn sample_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "c001".into(),
            name: "Bu Sari".into(),
            phone: "08123456789".into(),
            email: Some("sari@email.com".into()),
            address: Some("Jl. Mawar No. 15".into()),
            loyalty_points: 150,
            total_spent: Money::from_rupiah(1_500_000),
            last_visit: date(2024, 1, 20),
            created_at: date(2024, 1, 1),
        },
        Customer {
            id: "c002".into(),
            name: "Pak Budi".into(),
            phone: "08234567890".into(),
            email: None,
            address: Some("Jl. Melati No. 8".into()),
            loyalty_points: 89,
            total_spent: Money::from_rupiah(890_000),
            last_visit: date(2024, 1, 19),
            created_at: date(2024, 1, 5),
        },
        Customer {
            id: "c003".into(),
            name: "Ibu Rina".into(),
            phone: "08345678901".into(),
            email: Some("rina@email.com".into()),
            address: Some("Jl. Kenanga No. 22".into()),
            loyalty_points: 234,
            total_spent: Money::from_rupiah(2_340_000),
            last_visit: date(2024, 1, 21),
            created_at: date(2024, 1, 3),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use kelontong_core::StockStatus;

    #[test]
    fn test_every_product_has_a_category() {
        assert_eq!(sample_products().len(), PRODUCTS.len());
    }

    #[test]
    fn test_starter_stock_is_healthy() {
        assert!(sample_products()
            .iter()
            .all(|p| p.stock_status() == StockStatus::Ok));
    }

    #[test]
    fn test_prices_are_whole_rupiah() {
        let indomie = &sample_products()[0];
        assert_eq!(indomie.price.to_string(), "Rp3.500");
        assert_eq!(indomie.category.name, "Makanan");
    }
}
