//! Shopping Cart Entities
//!
//! Money is in minor currency units.

use serde::{Deserialize, Serialize};

use super::order::Order;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub title: String,
    #[serde(default)]
    pub sku: String,
    pub price: i64,
    #[serde(default)]
    pub discount_price: Option<i64>,
    pub quantity: u32,
    pub subtotal: i64,
}

impl CartItem {
    /// Price actually charged per unit
    pub fn effective_price(&self) -> i64 {
        self.discount_price.unwrap_or(self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartFee {
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTax {
    pub label: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub shipping: i64,
    #[serde(default)]
    pub fees: Vec<CartFee>,
    #[serde(default)]
    pub taxes: Vec<CartTax>,
    /// Grand total as computed by the backend
    #[serde(default)]
    pub total: i64,
}

impl From<&Order> for Cart {
    fn from(order: &Order) -> Self {
        let items = order
            .lines
            .iter()
            .map(|line| CartItem {
                title: line.product_variant.name.clone(),
                sku: line.product_variant.sku.clone(),
                price: line.unit_price_with_tax,
                discount_price: None,
                quantity: line.quantity,
                subtotal: line.line_price_with_tax,
            })
            .collect();

        let fees = order
            .adjustments
            .iter()
            .map(|adj| CartFee {
                name: adj
                    .description
                    .clone()
                    .unwrap_or_else(|| adj.adjustment_source.clone()),
                amount: adj.amount,
            })
            .collect();

        let taxes = order
            .tax_summary
            .iter()
            .map(|tax| CartTax {
                label: format!("{}%", tax.tax_rate),
                amount: tax.tax_total,
            })
            .collect();

        Self {
            items,
            shipping: order.shipping_with_tax,
            fees,
            taxes,
            total: order.total,
        }
    }
}
