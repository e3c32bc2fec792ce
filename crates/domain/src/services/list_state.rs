//! Per-screen list state and its reducer.
//!
//! A [`ListState`] is an immutable snapshot of one list screen: the fetched
//! records, the active filter, the current page and the load phase. Every
//! user action or fetch outcome is a [`ListEvent`], and [`ListState::reduce`]
//! maps `(state, event)` to the next state without side effects.

use shared::dates::DateRange;
use shared::pagination::Paginator;

use super::filter::ListFilter;
use crate::models::{ListRecord, StatusFilter};

/// Fetch lifecycle of a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    /// Last fetch failed with a user-facing message.
    Failed(String),
}

/// Everything that can change a list screen.
#[derive(Debug, Clone)]
pub enum ListEvent<R: ListRecord> {
    FetchStarted,
    FetchSucceeded(Vec<R>),
    FetchFailed(String),
    QueryChanged(String),
    StatusFilterChanged(StatusFilter<R::Status>),
    DateRangeChanged(Option<DateRange>),
    NextPage,
    PreviousPage,
    GoToPage(usize),
    /// Optimistic status change of one record after a successful review.
    StatusPatched { id: String, status: R::Status },
}

/// Snapshot of one list screen.
#[derive(Debug, Clone)]
pub struct ListState<R: ListRecord> {
    records: Vec<R>,
    filter: ListFilter<R::Status>,
    page: usize,
    phase: LoadPhase,
    paginator: Paginator,
}

/// The rendered page of a list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a, R> {
    pub items: Vec<&'a R>,
    pub page: usize,
    pub page_count: usize,
    pub filtered_total: usize,
    pub total: usize,
}

impl<R> ListView<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<R: ListRecord> Default for ListState<R> {
    fn default() -> Self {
        Self::new(Paginator::default())
    }
}

impl<R: ListRecord> ListState<R> {
    pub fn new(paginator: Paginator) -> Self {
        Self {
            records: Vec::new(),
            filter: ListFilter::default(),
            page: 1,
            phase: LoadPhase::Idle,
            paginator,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn filter(&self) -> &ListFilter<R::Status> {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Records that pass the current filter, in collection order.
    pub fn filtered(&self) -> Vec<&R> {
        self.filter.apply(&self.records)
    }

    /// Applies one event and returns the resulting state.
    pub fn reduce(mut self, event: ListEvent<R>) -> Self {
        match event {
            ListEvent::FetchStarted => {
                self.phase = LoadPhase::Loading;
            }
            ListEvent::FetchSucceeded(records) => {
                self.records = records;
                self.phase = LoadPhase::Idle;
                self.page = 1;
            }
            ListEvent::FetchFailed(message) => {
                self.phase = LoadPhase::Failed(message);
            }
            ListEvent::QueryChanged(query) => {
                self.filter.query = query;
                self.page = 1;
            }
            ListEvent::StatusFilterChanged(status) => {
                self.filter.status = status;
                self.page = 1;
            }
            ListEvent::DateRangeChanged(range) => {
                self.filter.date_range = range;
                self.page = 1;
            }
            ListEvent::NextPage => {
                let total = self.filtered().len();
                self.page = self.paginator.next_page(self.page, total);
            }
            ListEvent::PreviousPage => {
                let total = self.filtered().len();
                self.page = self.paginator.previous_page(self.page, total);
            }
            ListEvent::GoToPage(page) => {
                let total = self.filtered().len();
                self.page = self.paginator.clamp_page(page, total);
            }
            ListEvent::StatusPatched { id, status } => {
                match self.records.iter_mut().find(|record| record.id() == id) {
                    Some(record) => record.set_status(status),
                    None => tracing::warn!(id = %id, "Status patch for unknown record ignored"),
                }
                let total = self.filtered().len();
                self.page = self.paginator.clamp_page(self.page, total);
            }
        }
        self
    }

    /// Current page of the filtered collection.
    pub fn view(&self) -> ListView<'_, R> {
        let filtered = self.filtered();
        let page = self.paginator.page(&filtered, self.page);

        ListView {
            items: page.items.to_vec(),
            page: page.page,
            page_count: page.page_count,
            filtered_total: page.total,
            total: self.records.len(),
        }
    }
}
