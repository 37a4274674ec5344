//! Cart Totals
//!
//! Figures for the cart summary box. Only the intermediate total is computed
//! here; the grand total is always the backend's.

use crate::domain::{Cart, CartTax};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSummary {
    pub item_count: u32,
    pub subtotal_sum: i64,
    pub shipping: i64,
    pub fees_total: i64,
    /// Subtotals plus shipping plus fees
    pub intermediate: i64,
    pub taxes: Vec<CartTax>,
    pub total: i64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        let subtotal_sum: i64 = cart.items.iter().map(|item| item.subtotal).sum();
        let fees_total: i64 = cart.fees.iter().map(|fee| fee.amount).sum();

        Self {
            item_count: cart.items.iter().map(|item| item.quantity).sum(),
            subtotal_sum,
            shipping: cart.shipping,
            fees_total,
            intermediate: subtotal_sum + cart.shipping + fees_total,
            taxes: cart.taxes.clone(),
            total: cart.total,
        }
    }
}
