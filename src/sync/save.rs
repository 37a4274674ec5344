//! Save Execution
//!
//! Issues every planned operation at once and waits for all of them to
//! settle. Nothing is cancelled or rolled back: when one write fails, the
//! ones that already succeeded stay applied on the server, and the report
//! says which those were.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{join3, join_all};
use tracing::{info, warn};

use super::plan::{reconcile, SyncPlan};
use super::status::StatusHandle;
use crate::domain::{DomainError, DomainResult, LinkId, LinkReference};
use crate::repository::LinkRepository;
use crate::editor::LinkEditor;

/// Default delay before a success status reverts to idle
pub const DEFAULT_STATUS_RESET: Duration = Duration::from_millis(300);

/// Host callbacks
pub trait SaveListener: Send + Sync {
    /// Called after a save in which every operation succeeded
    fn on_save(&self) {}

    /// Called when the host cancels editing
    fn on_abort(&self) {}
}

/// Listener that ignores everything
pub struct NoopListener;

impl SaveListener for NoopListener {}

/// One network operation of a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create the link at list position `order`
    Create { order: u32 },
    Update { id: LinkId },
    Delete { id: LinkId },
}

/// Settled result of one operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    pub operation: Operation,
    /// Persisted identifier for creates and updates
    pub result: DomainResult<Option<LinkId>>,
}

impl OperationOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every outcome of one save, creates first, then updates, then deletes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SaveReport {
    pub outcomes: Vec<OperationOutcome>,
}

impl SaveReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(OperationOutcome::is_ok)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &OperationOutcome> {
        self.outcomes.iter().filter(|o| o.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &OperationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn first_error(&self) -> Option<&DomainError> {
        self.outcomes.iter().find_map(|o| o.result.as_ref().err())
    }
}

/// A save in which at least one operation failed
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} of {} link operations failed", .report.failed().count(), .report.outcomes.len())]
pub struct SaveError {
    pub report: SaveReport,
}

/// Applies edited link lists to a [`LinkRepository`]
pub struct LinkSynchronizer<R: LinkRepository> {
    repo: R,
    status: StatusHandle,
    reset_after: Duration,
    listener: Arc<dyn SaveListener>,
}

impl<R: LinkRepository> LinkSynchronizer<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            status: StatusHandle::new(),
            reset_after: DEFAULT_STATUS_RESET,
            listener: Arc::new(NoopListener),
        }
    }

    pub fn with_reset_delay(mut self, reset_after: Duration) -> Self {
        self.reset_after = reset_after;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn SaveListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn status(&self) -> &StatusHandle {
        &self.status
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Fetch the collection's current links into `editor`, returning the
    /// server copy to diff the next save against
    pub async fn load(&self, slug: &str, editor: &mut LinkEditor) -> DomainResult<Vec<LinkReference>> {
        let remote = self.repo.list_by_slug(slug).await?;
        editor.load(remote.clone());
        Ok(remote)
    }

    /// Start a save.
    ///
    /// The status becomes loading and the plan is computed from the given
    /// lists before this returns; the returned future does the network work.
    pub fn save(
        &self,
        local: &[LinkReference],
        remote: &[LinkReference],
    ) -> impl Future<Output = Result<SaveReport, SaveError>> + '_ {
        let generation = self.status.begin();
        let plan = reconcile(local, remote);

        async move {
            info!(
                creates = plan.creates.len(),
                updates = plan.updates.len(),
                deletes = plan.deletes.len(),
                "saving collection links"
            );

            let report = self.execute(&plan).await;

            if report.is_success() {
                info!(operations = report.outcomes.len(), "collection links saved");
                self.status.succeed(generation, self.reset_after);
                self.listener.on_save();
                Ok(report)
            } else {
                for failure in report.failed() {
                    if let Err(e) = &failure.result {
                        warn!(operation = ?failure.operation, error = %e, "link operation failed");
                    }
                }
                self.status.fail(generation);
                Err(SaveError { report })
            }
        }
    }

    /// Cancel editing without saving
    pub fn abort(&self) {
        self.listener.on_abort();
    }

    async fn execute(&self, plan: &SyncPlan) -> SaveReport {
        let creates = join_all(plan.creates.iter().map(|input| async move {
            OperationOutcome {
                operation: Operation::Create { order: input.order() },
                result: self.repo.create(input).await.map(Some),
            }
        }));

        let updates = join_all(plan.updates.iter().map(|input| async move {
            OperationOutcome {
                operation: Operation::Update { id: input.id().clone() },
                result: self.repo.update(input).await.map(Some),
            }
        }));

        let deletes = join_all(plan.deletes.iter().map(|id| async move {
            OperationOutcome {
                operation: Operation::Delete { id: id.clone() },
                result: self.repo.delete(id).await.map(|_| None),
            }
        }));

        let (created, updated, deleted) = join3(creates, updates, deletes).await;

        let mut outcomes = created;
        outcomes.extend(updated);
        outcomes.extend(deleted);
        SaveReport { outcomes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::SaveStatus;
    use crate::domain::{LanguageCode, UrlLink};
    use crate::repository::{FailPoint, InMemoryLinkRepository};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingListener {
        saved: AtomicUsize,
        aborted: AtomicUsize,
    }

    impl SaveListener for CountingListener {
        fn on_save(&self) {
            self.saved.fetch_add(1, Ordering::SeqCst);
        }

        fn on_abort(&self) {
            self.aborted.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn url_link(id: &str, name: &str) -> LinkReference {
        let mut link = UrlLink::new("12", LanguageCode::new("de"));
        link.id = Some(id.to_string());
        link.translations[0].name = name.to_string();
        LinkReference::Url(link)
    }

    async fn seeded_repo() -> Arc<InMemoryLinkRepository> {
        let repo = Arc::new(InMemoryLinkRepository::new("loescher"));
        repo.seed(vec![url_link("1", "Datenblatt"), url_link("2", "Katalog")]).await;
        repo
    }

    #[tokio::test]
    async fn test_save_round_trip() {
        let repo = seeded_repo().await;
        let listener = Arc::new(CountingListener::default());
        let sync = LinkSynchronizer::new(repo.clone()).with_listener(listener.clone());

        let mut editor = LinkEditor::new("12", LanguageCode::new("de"));
        let remote = sync.load("loescher", &mut editor).await.unwrap();
        assert_eq!(editor.len(), 2);

        editor.remove(0);
        editor.add_url_link();
        editor.set_translation(1, "Neu", "https://example.ch/neu").unwrap();
        editor.move_up(1);

        let save = sync.save(editor.links(), &remote);
        assert_eq!(sync.status().current(), SaveStatus::Loading);
        let report = save.await.expect("save failed");

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(sync.status().current(), SaveStatus::Success);
        assert_eq!(listener.saved.load(Ordering::SeqCst), 1);

        let mut fresh = LinkEditor::new("12", LanguageCode::new("de"));
        sync.load("loescher", &mut fresh).await.unwrap();
        let names: Vec<String> = fresh
            .links()
            .iter()
            .map(|link| match link {
                LinkReference::Url(url) => url.translations[0].name.clone(),
                LinkReference::Asset(_) => String::new(),
            })
            .collect();
        assert_eq!(names, vec!["Neu".to_string(), "Katalog".to_string()]);
    }

    #[tokio::test]
    async fn test_one_failure_marks_save_failed() {
        let repo = seeded_repo().await;
        repo.inject_failure(FailPoint::Update("2".to_string())).await;
        let listener = Arc::new(CountingListener::default());
        let sync = LinkSynchronizer::new(repo.clone()).with_listener(listener.clone());

        let remote = repo.list_by_slug("loescher").await.unwrap();
        let mut local = remote.clone();
        local.push(LinkReference::Url(UrlLink::new("12", LanguageCode::new("de"))));

        let err = sync.save(&local, &remote).await.unwrap_err();

        assert_eq!(sync.status().current(), SaveStatus::Error);
        assert_eq!(err.report.outcomes.len(), 3);
        assert_eq!(err.report.succeeded().count(), 2);
        assert_eq!(
            err.report.failed().map(|o| o.operation.clone()).collect::<Vec<_>>(),
            vec![Operation::Update { id: "2".to_string() }]
        );
        assert_eq!(err.to_string(), "1 of 3 link operations failed");
        assert_eq!(listener.saved.load(Ordering::SeqCst), 0);

        // The create and the other update landed anyway.
        let after = repo.list_by_slug("loescher").await.unwrap();
        assert_eq!(after.len(), 3);
    }

    #[tokio::test]
    async fn test_operations_run_concurrently() {
        let repo = seeded_repo().await;
        repo.require_concurrency(3).await;
        let sync = LinkSynchronizer::new(repo.clone());

        let remote = repo.list_by_slug("loescher").await.unwrap();
        let local = vec![
            remote[0].clone(),
            LinkReference::Url(UrlLink::new("12", LanguageCode::new("de"))),
        ];

        let result = tokio::time::timeout(Duration::from_secs(2), sync.save(&local, &remote)).await;
        let report = result.expect("operations were issued sequentially").unwrap();
        assert_eq!(report.outcomes.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_status_resets() {
        let repo = seeded_repo().await;
        let sync = LinkSynchronizer::new(repo.clone());
        let remote = repo.list_by_slug("loescher").await.unwrap();

        sync.save(&remote, &remote).await.unwrap();
        assert_eq!(sync.status().current(), SaveStatus::Success);

        tokio::time::sleep(DEFAULT_STATUS_RESET + Duration::from_millis(1)).await;
        assert_eq!(sync.status().current(), SaveStatus::Idle);
    }

    #[tokio::test]
    async fn test_asset_without_file_is_sent_as_is() {
        let repo = Arc::new(InMemoryLinkRepository::new("loescher"));
        let sync = LinkSynchronizer::new(repo.clone());

        let mut editor = LinkEditor::new("12", LanguageCode::new("de"));
        editor.add_asset_link();
        sync.save(editor.links(), &[]).await.unwrap();

        let stored = repo.list_by_slug("loescher").await.unwrap();
        match &stored[0] {
            LinkReference::Asset(asset) => assert!(asset.asset.id.is_none()),
            other => panic!("expected asset link, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_abort_notifies_host() {
        let listener = Arc::new(CountingListener::default());
        let sync = LinkSynchronizer::new(Arc::new(InMemoryLinkRepository::new("x")))
            .with_listener(listener.clone());

        sync.abort();
        assert_eq!(listener.aborted.load(Ordering::SeqCst), 1);
        assert!(!sync.status().current().is_busy());
    }
}
