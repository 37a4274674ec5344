//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use the GraphQL endpoints, in-memory fixtures, etc.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{
    CreateLink, DomainResult, LanguageCode, LinkId, LinkReference, Order, OrderList, UpdateLink,
};

/// Executes a GraphQL operation
///
/// Resolves to the response's `data` object. GraphQL errors and transport
/// failures both surface as `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, locale: &LanguageCode, document: &str, variables: Value) -> DomainResult<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn request(&self, locale: &LanguageCode, document: &str, variables: Value) -> DomainResult<Value> {
        (**self).request(locale, document, variables).await
    }
}

/// CRUD access to the links of a collection
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Current persisted links of the collection, sorted by `order`
    async fn list_by_slug(&self, slug: &str) -> DomainResult<Vec<LinkReference>>;

    /// Persist a new link and return its identifier
    async fn create(&self, input: &CreateLink) -> DomainResult<LinkId>;

    /// Replace the state of a persisted link
    async fn update(&self, input: &UpdateLink) -> DomainResult<LinkId>;

    /// Delete link by ID
    async fn delete(&self, id: &LinkId) -> DomainResult<()>;
}

#[async_trait]
impl<R: LinkRepository + ?Sized> LinkRepository for Arc<R> {
    async fn list_by_slug(&self, slug: &str) -> DomainResult<Vec<LinkReference>> {
        (**self).list_by_slug(slug).await
    }

    async fn create(&self, input: &CreateLink) -> DomainResult<LinkId> {
        (**self).create(input).await
    }

    async fn update(&self, input: &UpdateLink) -> DomainResult<LinkId> {
        (**self).update(input).await
    }

    async fn delete(&self, id: &LinkId) -> DomainResult<()> {
        (**self).delete(id).await
    }
}

/// Customer order history and active-order mutations
///
/// Mutations resolve to the id of the modified order; error members of the
/// result union become `DomainError::Server`.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn customer_orders(&self, skip: u32, take: u32) -> DomainResult<OrderList>;

    async fn active_order(&self) -> DomainResult<Option<Order>>;

    async fn order_by_code(&self, code: &str) -> DomainResult<Option<Order>>;

    async fn add_item_to_order(&self, variant_id: &str, quantity: u32) -> DomainResult<String>;

    async fn adjust_order_line(&self, line_id: &str, quantity: u32) -> DomainResult<String>;

    async fn remove_order_line(&self, line_id: &str) -> DomainResult<String>;
}
