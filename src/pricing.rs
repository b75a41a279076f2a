//! Prices

use rust_decimal::Decimal;
use serde::Serialize;

use crate::items::LineItem;

/// Flat sales tax applied at checkout (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Totals derived from a cart's line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of quantities
    pub total_items: u64,

    /// Sum of price × quantity
    pub subtotal: Decimal,

    /// Subtotal × [`TAX_RATE`]
    pub tax: Decimal,

    /// Subtotal plus tax
    pub total: Decimal,
}

impl Totals {
    /// Computes totals for the given items.
    pub fn from_items(items: &[LineItem]) -> Self {
        let subtotal = subtotal(items);
        let tax = subtotal.saturating_mul(TAX_RATE);

        Self {
            total_items: total_items(items),
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }
}

/// Sum of all quantities.
pub fn total_items(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Sum of all line totals, saturating at [`Decimal::MAX`].
pub fn subtotal(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
}

/// Amount charged for an order with the given subtotal, saturating at [`Decimal::MAX`].
pub fn checkout_total(subtotal: Decimal) -> Decimal {
    subtotal.saturating_mul(Decimal::ONE + TAX_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> [LineItem; 2] {
        [
            LineItem::new("p1", "Watch", Decimal::from(10), 2),
            LineItem::new("p2", "Belt", Decimal::from(5), 1),
        ]
    }

    #[test]
    fn tax_rate_is_ten_percent() {
        assert_eq!(TAX_RATE, Decimal::new(1, 1));
    }

    #[test]
    fn totals_for_mixed_quantities() {
        let totals = Totals::from_items(&items());

        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.subtotal, Decimal::from(25));
        assert_eq!(totals.tax, Decimal::new(25, 1));
        assert_eq!(totals.total, Decimal::new(275, 1));
    }

    #[test]
    fn checkout_total_includes_tax() {
        assert_eq!(checkout_total(Decimal::from(25)), Decimal::new(275, 1));
    }

    #[test]
    fn huge_carts_saturate_instead_of_panicking() {
        let half = Decimal::MAX / Decimal::TWO;
        let items = [
            LineItem::new("p1", "Vault", half, 1),
            LineItem::new("p2", "Vault", half, 1),
            LineItem::new("p3", "Vault", half, 1),
        ];

        let totals = Totals::from_items(&items);

        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
        assert_eq!(checkout_total(totals.subtotal), Decimal::MAX);
    }

    #[test]
    fn totals_for_empty_cart_are_zero() {
        let totals = Totals::from_items(&[]);

        assert_eq!(totals.total_items, 0);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }
}
