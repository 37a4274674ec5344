//! Save Planning
//!
//! Pure diff of local against remote state. Identifier presence decides:
//! unidentified rows are created, identified rows updated, and remote rows
//! whose identifier no longer appears locally are deleted.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{CreateLink, Entity, LinkId, LinkReference, UpdateLink};
use crate::editor::renumber;

/// Operations one save will issue
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncPlan {
    pub creates: Vec<CreateLink>,
    pub updates: Vec<UpdateLink>,
    pub deletes: Vec<LinkId>,
}

impl SyncPlan {
    pub fn len(&self) -> usize {
        self.creates.len() + self.updates.len() + self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split entities into persisted (with their id) and unsaved ones, keeping order
pub fn partition_by_identity<T: Entity>(items: &[T]) -> (Vec<(&T::Id, &T)>, Vec<&T>) {
    let mut persisted = Vec::new();
    let mut unsaved = Vec::new();
    for item in items {
        match item.id() {
            Some(id) => persisted.push((id, item)),
            None => unsaved.push(item),
        }
    }
    (persisted, unsaved)
}

/// Compute the operations that bring `remote` to the state of `local`
///
/// `local` is renumbered (`order = index`) first, so payloads carry the
/// current list position.
pub fn reconcile(local: &[LinkReference], remote: &[LinkReference]) -> SyncPlan {
    let local = renumber(local.to_vec());
    let (persisted, unsaved) = partition_by_identity(&local);

    let creates = unsaved
        .into_iter()
        .map(|link| match link {
            LinkReference::Url(url) => CreateLink::from(url),
            LinkReference::Asset(asset) => CreateLink::from(asset),
        })
        .collect();

    let updates = persisted
        .iter()
        .map(|(id, link)| match link {
            LinkReference::Url(url) => UpdateLink::from_url((*id).clone(), url),
            LinkReference::Asset(asset) => UpdateLink::from_asset((*id).clone(), asset),
        })
        .collect();

    let kept: HashSet<&LinkId> = persisted.iter().map(|(id, _)| *id).collect();
    let mut seen = HashSet::new();
    let deletes = remote
        .iter()
        .filter_map(Entity::id)
        .filter(|id| !kept.contains(id) && seen.insert(*id))
        .cloned()
        .collect();

    let plan = SyncPlan {
        creates,
        updates,
        deletes,
    };
    debug!(
        creates = plan.creates.len(),
        updates = plan.updates.len(),
        deletes = plan.deletes.len(),
        "reconciled collection links"
    );
    plan
}
