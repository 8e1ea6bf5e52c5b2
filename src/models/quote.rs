use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::cart::{Cart, LineItem};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteLine {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl From<&LineItem> for QuoteLine {
    fn from(line: &LineItem) -> Self {
        Self {
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line.subtotal(),
        }
    }
}

/// Snapshot of a cart as shown to the customer.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteSummary {
    pub lines: Vec<QuoteLine>,
    pub item_count: u32,
    pub total: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotions: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl QuoteSummary {
    pub fn from_cart(cart: &Cart, currency: &str, promotions: Option<&str>) -> Self {
        let promotions = promotions
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Self {
            lines: cart.items().map(QuoteLine::from).collect(),
            item_count: cart.item_count(),
            total: cart.total(),
            currency: currency.to_string(),
            promotions,
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
