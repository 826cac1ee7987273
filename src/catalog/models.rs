use serde::{Deserialize, Serialize};

/// A stored product with its default cost, list price and discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub name: String,
    pub cost: f64,
    /// List price, 0 when the catalog has none
    pub price: f64,
    /// Discount percentage, 0 when the catalog has none
    pub discount: f64,
}

/// The product list, in file order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
}

impl Catalog {
    /// Build a catalog; a later row with the same name replaces the earlier one
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        let mut deduped: Vec<CatalogProduct> = Vec::with_capacity(products.len());
        for product in products {
            match deduped.iter_mut().find(|p| p.name == product.name) {
                Some(existing) => *existing = product,
                None => deduped.push(product),
            }
        }
        Self { products: deduped }
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn find(&self, name: &str) -> Option<&CatalogProduct> {
        let name = name.trim();
        self.products.iter().find(|p| p.name == name)
    }

    /// Case-insensitive substring match on the product name
    pub fn search(&self, query: &str) -> Vec<&CatalogProduct> {
        let query = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
