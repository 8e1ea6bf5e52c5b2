use chrono::Local;
use console::style;
use rust_decimal::Decimal;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{catalog::Product, quote::QuoteSummary};

#[derive(Tabled)]
struct CatalogTableRow {
    #[tabled(rename = "Flower")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct QuoteTableRow {
    #[tabled(rename = "Flower")]
    name: String,
    #[tabled(rename = "Quantity")]
    quantity: u32,
    #[tabled(rename = "Unit price")]
    unit_price: String,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

/// `$1,234.50` style: dollar sign, thousands separators, two decimals.
pub fn format_currency(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (negative, digits) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, fraction)
}

/// Label used in the product picker, e.g. `Rosa (MXN 30)`.
pub fn product_label(product: &Product, currency: &str) -> String {
    format!("{} ({} {})", product.name, currency, product.unit_price.normalize())
}

pub fn format_catalog_table(products: &[Product], currency: &str) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<CatalogTableRow> = products
        .iter()
        .map(|product| CatalogTableRow {
            name: product.name.clone(),
            price: format!("{} {}", format_currency(product.unit_price), currency),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_quote_table(summary: &QuoteSummary) -> String {
    if summary.is_empty() {
        return String::new();
    }

    let rows: Vec<QuoteTableRow> = summary
        .lines
        .iter()
        .map(|line| QuoteTableRow {
            name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: format_currency(line.unit_price),
            subtotal: format_currency(line.subtotal),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_total(summary: &QuoteSummary) -> String {
    format!(
        "{}: {} {}",
        style("Total").bold(),
        style(format_currency(summary.total)).green().bold(),
        summary.currency
    )
}

/// Full printable quote: promotions, line table, total and timestamp.
pub fn format_quote(summary: &QuoteSummary) -> String {
    let mut output = String::new();

    if let Some(promotions) = &summary.promotions {
        output.push_str(&format!("{}\n", style("Promotions & bundles").bold().magenta()));
        output.push_str(&format!("{}\n\n", promotions));
    }

    if summary.is_empty() {
        output.push_str(&format!("{}\n", style("No flowers selected yet.").dim()));
        return output;
    }

    output.push_str(&format!("{}\n", style("Your order").bold().cyan()));
    output.push_str(&format_quote_table(summary));
    output.push('\n');
    output.push_str(&format!(
        "{}: {}\n",
        style("Stems").bold(),
        summary.item_count
    ));
    output.push_str(&format!("{}\n", format_total(summary)));
    output.push_str(&format!(
        "{}\n",
        style(format!(
            "Quoted {}",
            summary.generated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ))
        .dim()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(Decimal::from_str("1234.5").unwrap()), "$1,234.50");
        assert_eq!(format_currency(Decimal::from(1_000_000)), "$1,000,000.00");
        assert_eq!(format_currency(Decimal::from(190)), "$190.00");
    }

    #[test]
    fn test_format_currency_zero_and_negative() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(Decimal::from(-2500)), "-$2,500.00");
    }

    #[test]
    fn test_format_currency_rounds_to_cents() {
        assert_eq!(format_currency(Decimal::from_str("19.999").unwrap()), "$20.00");
    }

    #[test]
    fn test_product_label() {
        let product = Product::new("Rosa", Decimal::from(30)).unwrap();
        assert_eq!(product_label(&product, "MXN"), "Rosa (MXN 30)");
    }
}
