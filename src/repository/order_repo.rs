//! Order Repository
//!
//! Shop API implementation of [`OrderRepository`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::documents::{
    ADD_TO_ORDER, ADJUST_ORDER_LINE, GET_ACTIVE_ORDER, GET_CURRENT_CUSTOMER_ORDERS,
    GET_ORDER_BY_CODE, REMOVE_ORDER_LINE,
};
use super::http::{check_result_union, decode_field, decode_optional, result_id};
use super::traits::{OrderRepository, Transport};
use crate::domain::{DomainResult, LanguageCode, Order, OrderList};

#[derive(Deserialize)]
struct ActiveCustomer {
    orders: OrderList,
}

/// Order repository talking to the shop endpoint in one locale
#[derive(Debug, Clone)]
pub struct GraphqlOrderRepository<T: Transport> {
    transport: T,
    locale: LanguageCode,
}

impl<T: Transport> GraphqlOrderRepository<T> {
    pub fn new(transport: T, locale: LanguageCode) -> Self {
        Self { transport, locale }
    }

    async fn modify(&self, document: &str, field: &str, variables: Value) -> DomainResult<String> {
        let data = self.transport.request(&self.locale, document, variables).await?;
        let result: Value = decode_field(&data, field)?;
        result_id(check_result_union(&result)?)
    }
}

#[async_trait]
impl<T: Transport> OrderRepository for GraphqlOrderRepository<T> {
    async fn customer_orders(&self, skip: u32, take: u32) -> DomainResult<OrderList> {
        let data = self
            .transport
            .request(
                &self.locale,
                GET_CURRENT_CUSTOMER_ORDERS,
                json!({ "skip": skip, "take": take }),
            )
            .await?;

        let customer: ActiveCustomer = decode_field(&data, "activeCustomer")?;
        Ok(customer.orders)
    }

    async fn active_order(&self) -> DomainResult<Option<Order>> {
        let data = self
            .transport
            .request(&self.locale, GET_ACTIVE_ORDER, json!({}))
            .await?;
        decode_optional(&data, "activeOrder")
    }

    async fn order_by_code(&self, code: &str) -> DomainResult<Option<Order>> {
        let data = self
            .transport
            .request(&self.locale, GET_ORDER_BY_CODE, json!({ "code": code }))
            .await?;
        decode_optional(&data, "orderByCode")
    }

    async fn add_item_to_order(&self, variant_id: &str, quantity: u32) -> DomainResult<String> {
        self.modify(
            ADD_TO_ORDER,
            "addItemToOrder",
            json!({ "productVariantId": variant_id, "quantity": quantity }),
        )
        .await
    }

    async fn adjust_order_line(&self, line_id: &str, quantity: u32) -> DomainResult<String> {
        self.modify(
            ADJUST_ORDER_LINE,
            "adjustOrderLine",
            json!({ "orderLineId": line_id, "quantity": quantity }),
        )
        .await
    }

    async fn remove_order_line(&self, line_id: &str) -> DomainResult<String> {
        self.modify(REMOVE_ORDER_LINE, "removeOrderLine", json!({ "orderLineId": line_id }))
            .await
    }
}
