use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    cart::{Cart, CartError},
    catalog::Catalog,
    quote::QuoteSummary,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuoteServiceError {
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Selection {index} ('{product_name}') rejected: {source}")]
    InvalidSelection {
        index: usize,
        product_name: String,
        #[source]
        source: CartError,
    },
}

/// A requested quantity for one product, before it reaches a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub product_name: String,
    pub quantity: i64,
}

impl Selection {
    pub fn new(product_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
        }
    }
}

pub struct QuoteService {
    catalog: Arc<Catalog>,
    currency: String,
}

impl QuoteService {
    pub fn new(catalog: Arc<Catalog>, currency: impl Into<String>) -> Self {
        Self {
            catalog,
            currency: currency.into(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Start a fresh, empty cart for one shopper
    pub fn open_cart(&self) -> Cart {
        debug!("Opening cart over {} products", self.catalog.len());
        Cart::new(Arc::clone(&self.catalog))
    }

    /// Set a single quantity, logging the outcome
    pub fn set_quantity(
        &self,
        cart: &mut Cart,
        product_name: &str,
        quantity: i64,
    ) -> Result<(), QuoteServiceError> {
        match cart.set_quantity(product_name, quantity) {
            Ok(()) => {
                info!(
                    "Quantity for '{}' set to {}; cart total now {}",
                    product_name,
                    quantity,
                    cart.total()
                );
                Ok(())
            }
            Err(e) => {
                warn!("Rejected quantity {} for '{}': {}", quantity, product_name, e);
                Err(e.into())
            }
        }
    }

    /// Apply a batch of selections. Either every selection lands or the cart
    /// is left exactly as it was.
    pub fn apply_selections(
        &self,
        cart: &mut Cart,
        selections: &[Selection],
    ) -> Result<(), QuoteServiceError> {
        let mut staged = cart.clone();

        for (index, selection) in selections.iter().enumerate() {
            staged
                .set_quantity(&selection.product_name, selection.quantity)
                .map_err(|source| {
                    warn!(
                        "Selection {} for '{}' rejected: {}",
                        index, selection.product_name, source
                    );
                    QuoteServiceError::InvalidSelection {
                        index,
                        product_name: selection.product_name.clone(),
                        source,
                    }
                })?;
        }

        *cart = staged;
        info!(
            "Applied {} selections; cart holds {} lines",
            selections.len(),
            cart.len()
        );
        Ok(())
    }

    pub fn clear(&self, cart: &mut Cart) {
        let removed = cart.len();
        cart.clear();
        info!("Cleared cart ({} lines removed)", removed);
    }

    pub fn summarize(&self, cart: &Cart, promotions: Option<&str>) -> QuoteSummary {
        QuoteSummary::from_cart(cart, &self.currency, promotions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn service() -> QuoteService {
        QuoteService::new(Arc::new(Catalog::artemisa().unwrap()), "MXN")
    }

    #[test]
    fn test_apply_selections_success() {
        let service = service();
        let mut cart = service.open_cart();

        let selections = vec![Selection::new("Rosa", 12), Selection::new("Eucalipto", 3)];
        service.apply_selections(&mut cart, &selections).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Decimal::from(390));
    }

    #[test]
    fn test_apply_selections_is_all_or_nothing() {
        let service = service();
        let mut cart = service.open_cart();
        service.set_quantity(&mut cart, "Girasol", 2).unwrap();

        let selections = vec![Selection::new("Rosa", 12), Selection::new("Orquidea", 1)];
        let err = service.apply_selections(&mut cart, &selections).unwrap_err();

        assert!(matches!(
            err,
            QuoteServiceError::InvalidSelection { index: 1, .. }
        ));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("Rosa"), 0);
        assert_eq!(cart.total(), Decimal::from(150));
    }

    #[test]
    fn test_later_selection_overrides_earlier() {
        let service = service();
        let mut cart = service.open_cart();

        let selections = vec![Selection::new("Rosa", 12), Selection::new("Rosa", 0)];
        service.apply_selections(&mut cart, &selections).unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_summary_drops_blank_promotions() {
        let service = service();
        let mut cart = service.open_cart();
        service.set_quantity(&mut cart, "Tulipan", 2).unwrap();

        let summary = service.summarize(&cart, Some("   \n"));
        assert!(summary.promotions.is_none());
        assert_eq!(summary.total, Decimal::from(200));
        assert_eq!(summary.currency, "MXN");

        let summary = service.summarize(&cart, Some(" Ramo de 12 rosas por $300 "));
        assert_eq!(summary.promotions.as_deref(), Some("Ramo de 12 rosas por $300"));
    }

    #[test]
    fn test_clear_empties_cart() {
        let service = service();
        let mut cart = service.open_cart();
        service.set_quantity(&mut cart, "Tulipan", 2).unwrap();

        service.clear(&mut cart);
        service.clear(&mut cart);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }
}
