//! Collection Link Repository
//!
//! Admin API implementation of [`LinkRepository`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::documents::{
    ADMIN_CREATE_COLLECTION_LINK_ASSET, ADMIN_CREATE_COLLECTION_LINK_URL,
    ADMIN_DELETE_COLLECTION_LINK, ADMIN_GET_COLLECTION_LINKS_BY_SLUG,
    ADMIN_UPDATE_COLLECTION_LINK_ASSET, ADMIN_UPDATE_COLLECTION_LINK_URL,
};
use super::http::{decode_field, result_id};
use super::traits::{LinkRepository, Transport};
use crate::domain::{
    CreateLink, DomainError, DomainResult, LanguageCode, LinkId, LinkReference, UpdateLink,
};

#[derive(Deserialize)]
struct CollectionLinks {
    #[serde(default)]
    links: Vec<LinkReference>,
}

#[derive(Deserialize)]
struct DeletionResponse {
    result: String,
    #[serde(default)]
    message: Option<String>,
}

/// Link repository talking to the admin endpoint in one locale
#[derive(Debug, Clone)]
pub struct GraphqlLinkRepository<T: Transport> {
    transport: T,
    locale: LanguageCode,
}

impl<T: Transport> GraphqlLinkRepository<T> {
    pub fn new(transport: T, locale: LanguageCode) -> Self {
        Self { transport, locale }
    }

    async fn mutate(&self, document: &str, field: &str, variables: Value) -> DomainResult<Value> {
        let data = self.transport.request(&self.locale, document, variables).await?;
        decode_field(&data, field)
    }
}

#[async_trait]
impl<T: Transport> LinkRepository for GraphqlLinkRepository<T> {
    async fn list_by_slug(&self, slug: &str) -> DomainResult<Vec<LinkReference>> {
        let data = self
            .transport
            .request(&self.locale, ADMIN_GET_COLLECTION_LINKS_BY_SLUG, json!({ "slug": slug }))
            .await?;

        let collection: CollectionLinks = decode_field(&data, "collection")
            .map_err(|e| match e {
                DomainError::NotFound(_) => DomainError::NotFound(format!("collection '{}'", slug)),
                other => other,
            })?;

        let mut links = collection.links;
        links.sort_by_key(LinkReference::order);
        Ok(links)
    }

    async fn create(&self, input: &CreateLink) -> DomainResult<LinkId> {
        let result = match input {
            CreateLink::Url(payload) => {
                self.mutate(
                    ADMIN_CREATE_COLLECTION_LINK_URL,
                    "createCollectionUrlLink",
                    json!({ "input": payload }),
                )
                .await?
            }
            CreateLink::Asset(payload) => {
                self.mutate(
                    ADMIN_CREATE_COLLECTION_LINK_ASSET,
                    "createCollectionAssetLink",
                    json!({ "input": payload }),
                )
                .await?
            }
        };
        result_id(&result)
    }

    async fn update(&self, input: &UpdateLink) -> DomainResult<LinkId> {
        let result = match input {
            UpdateLink::Url(payload) => {
                self.mutate(
                    ADMIN_UPDATE_COLLECTION_LINK_URL,
                    "updateCollectionUrlLink",
                    json!({ "input": payload }),
                )
                .await?
            }
            UpdateLink::Asset(payload) => {
                self.mutate(
                    ADMIN_UPDATE_COLLECTION_LINK_ASSET,
                    "updateCollectionAssetLink",
                    json!({ "input": payload }),
                )
                .await?
            }
        };
        result_id(&result)
    }

    async fn delete(&self, id: &LinkId) -> DomainResult<()> {
        let result = self
            .mutate(ADMIN_DELETE_COLLECTION_LINK, "deleteCollectionLink", json!({ "id": id }))
            .await?;
        let response: DeletionResponse = serde_json::from_value(result)?;

        if response.result == "DELETED" {
            Ok(())
        } else {
            Err(DomainError::server(
                Some(response.result),
                response
                    .message
                    .unwrap_or_else(|| format!("link {} was not deleted", id)),
            ))
        }
    }
}
