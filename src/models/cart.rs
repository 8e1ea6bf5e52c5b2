use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::catalog::Catalog;

/// Largest quantity a single line may hold.
pub const MAX_QUANTITY: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Product '{name}' is not in the catalog")]
    ProductNotFound { name: String },

    #[error("Quantity {quantity} is out of range (0-{max})")]
    InvalidQuantity { quantity: i64, max: i64 },

    #[error("Amount for {quantity} x '{name}' is too large to quote")]
    AmountOverflow { name: String, quantity: i64 },
}

/// One shopper's order, priced against a shared catalog.
///
/// A product is present only while its quantity is positive; there are no
/// zero-quantity lines.
#[derive(Debug, Clone)]
pub struct Cart {
    catalog: Arc<Catalog>,
    items: BTreeMap<String, LineItem>,
}

impl Cart {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            items: BTreeMap::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Sets the quantity for a product. Zero removes the line.
    ///
    /// Unknown products, quantities outside `0..=MAX_QUANTITY` and lines that
    /// would push the total past `Decimal` range are rejected before anything
    /// is touched.
    pub fn set_quantity(&mut self, product_name: &str, quantity: i64) -> Result<(), CartError> {
        let unit_price = self
            .catalog
            .price_of(product_name)
            .map_err(|_| CartError::ProductNotFound {
                name: product_name.to_string(),
            })?;

        if !(0..=MAX_QUANTITY).contains(&quantity) {
            return Err(CartError::InvalidQuantity {
                quantity,
                max: MAX_QUANTITY,
            });
        }

        if quantity == 0 {
            if self.items.remove(product_name).is_some() {
                tracing::debug!("Removed '{}' from cart", product_name);
            }
            return Ok(());
        }

        let overflow = || CartError::AmountOverflow {
            name: product_name.to_string(),
            quantity,
        };
        let subtotal = unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(overflow)?;
        self.items
            .values()
            .filter(|line| line.product_name != product_name)
            .try_fold(subtotal, |acc, line| acc.checked_add(line.subtotal()))
            .ok_or_else(overflow)?;

        let line = LineItem {
            product_name: product_name.to_string(),
            quantity: quantity as u32,
            unit_price,
        };
        tracing::debug!(
            "Set '{}' to {} x {} in cart",
            product_name,
            quantity,
            unit_price
        );
        self.items.insert(product_name.to_string(), line);
        Ok(())
    }

    pub fn remove(&mut self, product_name: &str) {
        self.items.remove(product_name);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.values()
    }

    pub fn get(&self, product_name: &str) -> Option<&LineItem> {
        self.items.get(product_name)
    }

    pub fn quantity_of(&self, product_name: &str) -> u32 {
        self.get(product_name).map(|line| line.quantity).unwrap_or(0)
    }

    pub fn total(&self) -> Decimal {
        self.items().map(LineItem::subtotal).sum()
    }

    /// Number of stems across all lines.
    pub fn item_count(&self) -> u32 {
        self.items().map(|line| line.quantity).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Product;

    fn small_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                Product::new("Rosa", Decimal::from(30)).unwrap(),
                Product::new("Clavel", Decimal::from(20)).unwrap(),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_line_subtotal_follows_quantity() {
        let mut cart = Cart::new(small_catalog());
        cart.set_quantity("Rosa", 3).unwrap();
        assert_eq!(cart.get("Rosa").unwrap().subtotal(), Decimal::from(90));

        cart.set_quantity("Rosa", 4).unwrap();
        assert_eq!(cart.get("Rosa").unwrap().subtotal(), Decimal::from(120));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_zero_quantity_on_absent_product_is_noop() {
        let mut cart = Cart::new(small_catalog());
        cart.set_quantity("Clavel", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_product_checked_before_quantity() {
        let mut cart = Cart::new(small_catalog());
        let err = cart.set_quantity("Orquidea", 500).unwrap_err();
        assert_eq!(
            err,
            CartError::ProductNotFound {
                name: "Orquidea".to_string()
            }
        );
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new(small_catalog());
        cart.set_quantity("Rosa", 3).unwrap();
        cart.set_quantity("Clavel", 5).unwrap();
        assert_eq!(cart.item_count(), 8);
        assert_eq!(cart.quantity_of("Rosa"), 3);
        assert_eq!(cart.quantity_of("Girasol"), 0);
    }

    #[test]
    fn test_line_too_large_to_price_is_rejected() {
        let catalog = Catalog::unchecked(vec![Product {
            name: "Rosa".to_string(),
            unit_price: Decimal::MAX,
        }]);
        let mut cart = Cart::new(Arc::new(catalog));

        cart.set_quantity("Rosa", 1).unwrap();
        let err = cart.set_quantity("Rosa", 2).unwrap_err();

        assert_eq!(
            err,
            CartError::AmountOverflow {
                name: "Rosa".to_string(),
                quantity: 2
            }
        );
        assert_eq!(cart.quantity_of("Rosa"), 1);
        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn test_total_too_large_to_price_is_rejected() {
        let catalog = Catalog::unchecked(vec![
            Product {
                name: "Clavel".to_string(),
                unit_price: Decimal::from_i128_with_scale(40_000_000_000_000_000_000_000_000_000, 0),
            },
            Product {
                name: "Rosa".to_string(),
                unit_price: Decimal::from_i128_with_scale(79_000_000_000_000_000_000_000_000_000, 0),
            },
        ]);
        let mut cart = Cart::new(Arc::new(catalog));

        cart.set_quantity("Clavel", 1).unwrap();
        let err = cart.set_quantity("Rosa", 1).unwrap_err();

        assert!(matches!(err, CartError::AmountOverflow { .. }));
        assert!(cart.get("Rosa").is_none());
        assert_eq!(cart.len(), 1);

        // fits once the other line is gone
        cart.set_quantity("Clavel", 0).unwrap();
        cart.set_quantity("Rosa", 1).unwrap();
        assert_eq!(cart.len(), 1);
    }
}
