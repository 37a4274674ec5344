//! Order Entities
//!
//! Orders as returned by the shop API. Fields beyond `id` and `updatedAt`
//! default when a query does not select them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::id_repr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VariantOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderVariant {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub options: Vec<VariantOption>,
}

/// Price adjustment (promotion, surcharge) on an order or a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    #[serde(default)]
    pub adjustment_source: String,
    #[serde(rename = "type", default)]
    pub adjustment_type: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    pub tax_rate: f64,
    pub tax_base: i64,
    pub tax_total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(deserialize_with = "id_repr::deserialize")]
    pub id: String,
    #[serde(default)]
    pub product_variant: OrderVariant,
    #[serde(default)]
    pub unit_price: i64,
    #[serde(default)]
    pub unit_price_with_tax: i64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub line_price_with_tax: i64,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

/// An order, with money in minor currency units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "id_repr::deserialize")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub customer: Option<OrderCustomer>,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    #[serde(default)]
    pub coupon_codes: Vec<String>,
    #[serde(default)]
    pub sub_total_before_tax: i64,
    #[serde(default)]
    pub sub_total: i64,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub shipping: i64,
    #[serde(default)]
    pub shipping_with_tax: i64,
    #[serde(default)]
    pub tax_summary: Vec<TaxLine>,
    #[serde(default)]
    pub total_before_tax: i64,
    #[serde(default)]
    pub total: i64,
    /// ISO-8601 timestamp, kept as sent
    #[serde(default)]
    pub updated_at: String,
}

impl Order {
    /// Parsed `updated_at`, or `None` if the backend sent something unparseable
    pub fn updated_instant(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.updated_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

impl Entity for Order {
    type Id = String;

    fn id(&self) -> Option<&Self::Id> {
        Some(&self.id)
    }
}

/// One page of a paginated order query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderList {
    #[serde(default)]
    pub items: Vec<Order>,
    /// Authoritative total across all pages
    #[serde(default)]
    pub total_items: u32,
}
