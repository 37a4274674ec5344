//! In-memory Link Repository
//!
//! Holds one collection's links in process. Used for offline previews and to
//! exercise the synchronizer with injected failures.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Barrier, Mutex};

use super::traits::LinkRepository;
use crate::domain::{
    AssetLink, AssetRef, CreateLink, DomainError, DomainResult, Entity, LinkId, LinkReference,
    UpdateLink, UrlLink,
};

/// Operation that should fail on its next and later calls
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailPoint {
    AnyCreate,
    Update(LinkId),
    Delete(LinkId),
}

pub struct InMemoryLinkRepository {
    slug: String,
    links: Mutex<Vec<LinkReference>>,
    failures: Mutex<HashSet<FailPoint>>,
    barrier: Mutex<Option<Arc<Barrier>>>,
    next_id: AtomicU64,
}

impl InMemoryLinkRepository {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            links: Mutex::new(Vec::new()),
            failures: Mutex::new(HashSet::new()),
            barrier: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Replace the stored links
    pub async fn seed(&self, links: Vec<LinkReference>) {
        *self.links.lock().await = links;
    }

    pub async fn inject_failure(&self, point: FailPoint) {
        self.failures.lock().await.insert(point);
    }

    /// Make every write wait until `writers` writes are in flight together
    pub async fn require_concurrency(&self, writers: usize) {
        *self.barrier.lock().await = Some(Arc::new(Barrier::new(writers)));
    }

    async fn enter(&self, point: FailPoint) -> DomainResult<()> {
        let barrier = self.barrier.lock().await.clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        if self.failures.lock().await.contains(&point) {
            return Err(DomainError::server(
                Some("INJECTED".to_string()),
                format!("injected failure for {:?}", point),
            ));
        }
        Ok(())
    }

    fn assign_id(&self) -> LinkId {
        format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

fn link_from_create(id: LinkId, input: &CreateLink) -> LinkReference {
    match input {
        CreateLink::Url(payload) => LinkReference::Url(UrlLink {
            id: Some(id),
            collection_id: payload.collection_id.clone(),
            icon: payload.icon,
            order: payload.order,
            translations: payload.translations.clone(),
        }),
        CreateLink::Asset(payload) => LinkReference::Asset(AssetLink {
            id: Some(id),
            collection_id: payload.collection_id.clone(),
            icon: payload.icon,
            order: payload.order,
            language_code: payload.language_code.clone(),
            asset: AssetRef {
                id: payload.asset_id.clone(),
                ..Default::default()
            },
        }),
    }
}

fn link_from_update(input: &UpdateLink) -> LinkReference {
    match input {
        UpdateLink::Url(payload) => LinkReference::Url(UrlLink {
            id: Some(payload.id.clone()),
            collection_id: payload.collection_id.clone(),
            icon: payload.icon,
            order: payload.order,
            translations: payload.translations.clone(),
        }),
        UpdateLink::Asset(payload) => LinkReference::Asset(AssetLink {
            id: Some(payload.id.clone()),
            collection_id: payload.collection_id.clone(),
            icon: payload.icon,
            order: payload.order,
            language_code: payload.language_code.clone(),
            asset: AssetRef {
                id: payload.asset_id.clone(),
                ..Default::default()
            },
        }),
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn list_by_slug(&self, slug: &str) -> DomainResult<Vec<LinkReference>> {
        if slug != self.slug {
            return Err(DomainError::NotFound(format!("collection '{}'", slug)));
        }
        let mut links = self.links.lock().await.clone();
        links.sort_by_key(LinkReference::order);
        Ok(links)
    }

    async fn create(&self, input: &CreateLink) -> DomainResult<LinkId> {
        self.enter(FailPoint::AnyCreate).await?;
        let id = self.assign_id();
        self.links.lock().await.push(link_from_create(id.clone(), input));
        Ok(id)
    }

    async fn update(&self, input: &UpdateLink) -> DomainResult<LinkId> {
        let id = input.id().clone();
        self.enter(FailPoint::Update(id.clone())).await?;

        let mut links = self.links.lock().await;
        let slot = links
            .iter_mut()
            .find(|link| link.id() == Some(&id))
            .ok_or_else(|| DomainError::NotFound(format!("link {}", id)))?;
        *slot = link_from_update(input);
        Ok(id)
    }

    async fn delete(&self, id: &LinkId) -> DomainResult<()> {
        self.enter(FailPoint::Delete(id.clone())).await?;

        let mut links = self.links.lock().await;
        let before = links.len();
        links.retain(|link| link.id() != Some(id));
        if links.len() == before {
            return Err(DomainError::NotFound(format!("link {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LanguageCode;

    #[tokio::test]
    async fn test_create_update_delete() {
        let repo = InMemoryLinkRepository::new("c");
        let link = UrlLink::new("12", LanguageCode::new("de"));

        let id = repo.create(&CreateLink::from(&link)).await.unwrap();
        assert_eq!(repo.list_by_slug("c").await.unwrap().len(), 1);

        let mut changed = link.clone();
        changed.translations[0].name = "Neu".to_string();
        repo.update(&UpdateLink::from_url(id.clone(), &changed)).await.unwrap();
        match &repo.list_by_slug("c").await.unwrap()[0] {
            LinkReference::Url(stored) => assert_eq!(stored.translations[0].name, "Neu"),
            other => panic!("expected url link, got {:?}", other),
        }

        repo.delete(&id).await.unwrap();
        assert!(repo.list_by_slug("c").await.unwrap().is_empty());
        assert!(matches!(repo.delete(&id).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let repo = InMemoryLinkRepository::new("c");
        repo.inject_failure(FailPoint::AnyCreate).await;

        let link = UrlLink::new("12", LanguageCode::new("de"));
        let err = repo.create(&CreateLink::from(&link)).await.unwrap_err();
        assert_eq!(err.code(), Some("INJECTED"));
        assert!(repo.list_by_slug("c").await.unwrap().is_empty());
        assert!(repo.list_by_slug("other").await.is_err());
    }
}
