use super::Product;

/// The built-in product set loaded at startup when no seed file is configured.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new("P-1001", "12mm Hex Bolt", "HEX-12-100", "BLR-A", 180, 120),
        Product::new("P-1002", "Steel Washer", "WSR-08-500", "BLR-A", 50, 80),
        Product::new("P-1003", "M8 Nut", "NUT-08-200", "PNQ-C", 80, 80),
        Product::new("P-1004", "Bearing 608ZZ", "BRG-608-50", "DEL-B", 24, 120),
    ]
}
