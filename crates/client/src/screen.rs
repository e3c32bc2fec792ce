//! Per-screen controller owning a list state container.
//!
//! Refreshes may overlap. Each refresh takes a generation ticket and its
//! result is applied only while that ticket is still the newest issued, so
//! the latest-issued request wins regardless of completion order. Results
//! arriving after [`ListScreen::deactivate`] are dropped.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use domain::models::{ListRecord, ReviewAction, ReviewRequest, Reviewable};
use domain::services::{ListEvent, ListState, ListView};
use shared::pagination::Paginator;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::ClientError;
use crate::review::ReviewGateway;
use crate::session::{acting_user_id, SessionStore};
use crate::source::RecordSource;

/// What happened to a completed refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer refresh was issued before this one completed.
    Superseded,
    /// The screen was deactivated while the request was in flight.
    Inactive,
}

pub struct ListScreen<V: ListRecord> {
    name: &'static str,
    source: Arc<dyn RecordSource<V>>,
    state: RwLock<ListState<V>>,
    generation: AtomicU64,
    active: AtomicBool,
}

impl<V: ListRecord> ListScreen<V> {
    pub fn new(name: &'static str, source: Arc<dyn RecordSource<V>>, paginator: Paginator) -> Self {
        Self {
            name,
            source,
            state: RwLock::new(ListState::new(paginator)),
            generation: AtomicU64::new(0),
            active: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stops applying results; in-flight requests are left to finish.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        debug!(screen = self.name, "Screen deactivated");
    }

    /// Re-fetches the collection.
    ///
    /// A failure is recorded in the state and also returned. The previously
    /// loaded records stay in place.
    pub async fn refresh(&self) -> Result<RefreshOutcome, ClientError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if self.is_active() {
            self.dispatch(ListEvent::FetchStarted).await;
        }

        let result = self.source.fetch().await;

        let mut state = self.state.write().await;

        if !self.is_active() {
            debug!(screen = self.name, ticket, "Dropping response for inactive screen");
            return Ok(RefreshOutcome::Inactive);
        }

        let newest = self.generation.load(Ordering::SeqCst);
        if newest != ticket {
            debug!(
                screen = self.name,
                ticket,
                newest,
                "Dropping superseded response"
            );
            return Ok(RefreshOutcome::Superseded);
        }

        let current = std::mem::take(&mut *state);
        match result {
            Ok(records) => {
                info!(screen = self.name, count = records.len(), "Records loaded");
                *state = current.reduce(ListEvent::FetchSucceeded(records));
                Ok(RefreshOutcome::Applied)
            }
            Err(err) => {
                *state = current.reduce(ListEvent::FetchFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Applies a user event (search, filter, paging).
    pub async fn dispatch(&self, event: ListEvent<V>) {
        let mut state = self.state.write().await;
        let current = std::mem::take(&mut *state);
        *state = current.reduce(event);
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ListState<V> {
        self.state.read().await.clone()
    }

    /// Runs `f` against the current page.
    pub async fn with_view<T>(&self, f: impl FnOnce(&ListView<'_, V>) -> T) -> T {
        let state = self.state.read().await;
        f(&state.view())
    }
}

impl<V: Reviewable> ListScreen<V> {
    /// Approves or rejects one record, patching it locally once the server
    /// accepted the decision. On any failure the collection is untouched.
    ///
    /// Only a loaded record that is still awaiting review can be decided on;
    /// other ids are refused without contacting the server.
    pub async fn review(
        &self,
        gateway: &dyn ReviewGateway,
        session: &dyn SessionStore,
        id: &str,
        action: ReviewAction,
    ) -> Result<String, ClientError> {
        let awaiting = self
            .state
            .read()
            .await
            .records()
            .iter()
            .any(|record| record.id() == id && record.is_awaiting_review());
        if !awaiting {
            return Err(ClientError::NotAwaitingReview { id: id.to_string() });
        }

        let acting_user_id = acting_user_id(session).await?;
        let request = ReviewRequest::new(id, action, acting_user_id);

        let message = gateway.review(&request).await?;

        if self.is_active() {
            self.dispatch(ListEvent::StatusPatched {
                id: id.to_string(),
                status: V::status_after(action),
            })
            .await;
        }

        Ok(message)
    }
}
