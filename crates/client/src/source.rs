//! Record sources feeding list screens.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::models::{ListRecord, RawExpense, RawRequisition};
use domain::services::{transform_records, IntoView};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::config::Endpoint;
use crate::error::ClientError;
use crate::fetcher::RecordFetcher;

/// Produces a fresh, display-ready collection on each call.
#[async_trait]
pub trait RecordSource<V: ListRecord>: Send + Sync {
    async fn fetch(&self) -> Result<Vec<V>, ClientError>;
}

/// Fetches raw records over HTTP and transforms them into views.
pub struct HttpRecordSource<R> {
    fetcher: Arc<RecordFetcher>,
    endpoint: Endpoint,
    _raw: PhantomData<fn() -> R>,
}

impl<R> HttpRecordSource<R> {
    pub fn new(fetcher: Arc<RecordFetcher>, endpoint: Endpoint) -> Self {
        Self {
            fetcher,
            endpoint,
            _raw: PhantomData,
        }
    }
}

impl HttpRecordSource<RawExpense> {
    pub fn expenses(fetcher: Arc<RecordFetcher>) -> Self {
        Self::new(fetcher, Endpoint::Expenses)
    }
}

impl HttpRecordSource<RawRequisition> {
    pub fn requisitions(fetcher: Arc<RecordFetcher>) -> Self {
        Self::new(fetcher, Endpoint::Requisitions)
    }

    /// Manager listing of requisitions awaiting review.
    pub fn managed_requisitions(fetcher: Arc<RecordFetcher>) -> Self {
        Self::new(fetcher, Endpoint::ManageRequisitions)
    }
}

#[async_trait]
impl<R> RecordSource<R::View> for HttpRecordSource<R>
where
    R: IntoView + DeserializeOwned + Send + 'static,
{
    async fn fetch(&self) -> Result<Vec<R::View>, ClientError> {
        let raw = self.fetcher.fetch::<R>(self.endpoint).await?;
        Ok(transform_records(raw))
    }
}

/// One scripted answer of a [`MockRecordSource`].
#[derive(Debug, Clone)]
pub struct MockResponse<V> {
    pub delay: Duration,
    /// Records, or the HTTP status of a simulated failure.
    pub outcome: Result<Vec<V>, u16>,
}

impl<V> MockResponse<V> {
    pub fn records(records: Vec<V>) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(records),
        }
    }

    pub fn failure(status: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(status),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Mock record source for testing.
///
/// Answers calls in script order; the last response is repeated once the
/// script is down to one entry.
pub struct MockRecordSource<V> {
    script: Mutex<VecDeque<MockResponse<V>>>,
    calls: AtomicUsize,
}

impl<V: ListRecord> MockRecordSource<V> {
    pub fn new(script: Vec<MockResponse<V>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answers with `records`.
    pub fn with_records(records: Vec<V>) -> Self {
        Self::new(vec![MockResponse::records(records)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<V: ListRecord> RecordSource<V> for MockRecordSource<V> {
    async fn fetch(&self) -> Result<Vec<V>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let response = {
            let mut script = self.script.lock().await;
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().cloned()
            }
        };

        let Some(response) = response else {
            return Err(ClientError::Remote("Mock source has no scripted response".to_string()));
        };

        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }

        response
            .outcome
            .map_err(|status| ClientError::Http { status })
    }
}
