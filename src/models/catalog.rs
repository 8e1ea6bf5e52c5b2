use rust_decimal::Decimal;
use serde::Serialize;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct Product {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom = "validate_name")]
    pub name: String,

    #[validate(custom = "validate_unit_price")]
    pub unit_price: Decimal,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    Ok(())
}

/// Highest unit price a product may carry. Keeps a full cart of every
/// product at the maximum quantity far inside `Decimal` range.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000;

fn validate_unit_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("Unit price must be positive"));
    }
    if *price > Decimal::from(MAX_UNIT_PRICE) {
        return Err(ValidationError::new("Unit price is too large"));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Product '{name}' is not in the catalog")]
    NotFound { name: String },

    #[error("Product '{name}' is listed more than once")]
    DuplicateProduct { name: String },

    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] validator::ValidationErrors),
}

impl Product {
    pub fn new(name: impl Into<String>, unit_price: Decimal) -> Result<Self, CatalogError> {
        let product = Self {
            name: name.into().trim().to_string(),
            unit_price,
        };
        product.validate()?;
        Ok(product)
    }
}

/// The fixed price list of the shop, ordered by product name.
///
/// Ordering is plain byte order on the name, so lowercase names sort after
/// every capitalised one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut products = products;
        for product in &products {
            product.validate()?;
        }
        products.sort_by(|a, b| a.name.cmp(&b.name));

        if let Some(pair) = products.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(CatalogError::DuplicateProduct {
                name: pair[0].name.clone(),
            });
        }

        tracing::debug!("Catalog built with {} products", products.len());
        Ok(Self { products })
    }

    /// Price list of the Artemisa shop, in MXN.
    pub fn artemisa() -> Result<Self, CatalogError> {
        let prices: [(&str, i64); 22] = [
            ("Rosa", 30),
            ("Lisianthus", 40),
            ("Clavel", 20),
            ("Margarita", 20),
            ("Mini rosa", 35),
            ("Tulipan", 100),
            ("Hortencia", 200),
            ("Gerbera", 40),
            ("Mini gerbera", 45),
            ("Ranunculos", 120),
            ("Anemona", 120),
            ("delphinum", 75),
            ("Perrito", 25),
            ("Roxana", 30),
            ("Eucalipto", 10),
            ("Miller", 25),
            ("Encaje", 30),
            ("Escabriosa", 30),
            ("Craspedia", 30),
            ("Girasol", 75),
            ("Rosa Inglesa", 75),
            ("Rosa Ohara", 35),
        ];

        let products = prices
            .iter()
            .map(|(name, price)| Product::new(*name, Decimal::from(*price)))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(products)
    }

    /// Skips validation so cart tests can price lines at the edge of `Decimal`.
    #[cfg(test)]
    pub(crate) fn unchecked(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products
            .binary_search_by(|product| product.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.products[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn price_of(&self, name: &str) -> Result<Decimal, CatalogError> {
        self.find(name)
            .map(|product| product.unit_price)
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_name_is_trimmed() {
        let product = Product::new("  Rosa  ", Decimal::from(30)).unwrap();
        assert_eq!(product.name, "Rosa");
    }

    #[test]
    fn test_product_rejects_blank_name() {
        assert!(Product::new("   ", Decimal::from(30)).is_err());
    }

    #[test]
    fn test_product_rejects_non_positive_price() {
        assert!(Product::new("Rosa", Decimal::ZERO).is_err());
        assert!(Product::new("Rosa", Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_product_rejects_price_above_limit() {
        assert!(Product::new("Rosa", Decimal::from(MAX_UNIT_PRICE)).is_ok());
        assert!(Product::new("Rosa", Decimal::from(MAX_UNIT_PRICE + 1)).is_err());
        assert!(Product::new("Rosa", Decimal::MAX).is_err());
    }

    #[test]
    fn test_artemisa_catalog_is_sorted_bytewise() {
        let catalog = Catalog::artemisa().unwrap();
        let names: Vec<&str> = catalog.list().iter().map(|p| p.name.as_str()).collect();

        assert_eq!(catalog.len(), 22);
        assert_eq!(names.first(), Some(&"Anemona"));
        assert_eq!(names.last(), Some(&"delphinum"));
        assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let products = vec![
            Product::new("Rosa", Decimal::from(30)).unwrap(),
            Product::new("Rosa", Decimal::from(35)).unwrap(),
        ];
        let result = Catalog::new(products);
        assert!(matches!(result, Err(CatalogError::DuplicateProduct { name }) if name == "Rosa"));
    }
}
