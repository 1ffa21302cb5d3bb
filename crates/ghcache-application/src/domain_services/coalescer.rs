//! Request coalescing
//!
//! While a fetch for a key is in flight, later fetches for the same key
//! wait for it instead of issuing their own upstream call. The first caller
//! (the leader) runs the delegate on a spawned task so that cancelling the
//! leader never cancels the shared call; every waiter receives a clone of
//! the same outcome.
//!
//! Each in-flight entry publishes exactly one outcome through a
//! [`watch`] channel. The entry is removed from the table before the
//! outcome is published, so a fetch arriving after completion always
//! starts a new call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use ghcache_domain::{
    CacheMode, Error, Fetcher, ModeRecorder, Request, RequestKey, Response, Result,
};
use tokio::sync::watch;
use tracing::{debug, error};

use crate::domain_services::classifier::classify;

type Outcome = Option<Result<Response>>;

/// One in-flight delegate call
struct InFlight {
    outcome: watch::Sender<Outcome>,
}

impl InFlight {
    fn new() -> Self {
        let (outcome, _) = watch::channel(None);
        Self { outcome }
    }
}

enum Role {
    Leader(Arc<InFlight>),
    Waiter(Arc<InFlight>),
}

/// Publishes the outcome of a leader call, even if the call panics
struct CompletionGuard {
    key: RequestKey,
    entry: Arc<InFlight>,
    table: Arc<DashMap<RequestKey, Arc<InFlight>>>,
    completed: bool,
}

impl CompletionGuard {
    fn complete(&mut self, outcome: Result<Response>) {
        let entry = &self.entry;
        self.table
            .remove_if(&self.key, |_, current| Arc::ptr_eq(current, entry));
        self.entry.outcome.send_replace(Some(outcome));
        self.completed = true;
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.completed {
            self.complete(Err(Error::internal("In-flight request aborted")));
        }
    }
}

/// Deduplicates concurrent idempotent reads in front of a [`Fetcher`]
pub struct RequestCoalescer {
    delegate: Arc<dyn Fetcher>,
    recorder: Option<Arc<dyn ModeRecorder>>,
    table: Arc<DashMap<RequestKey, Arc<InFlight>>>,
    wait_timeout: Option<Duration>,
}

impl RequestCoalescer {
    /// Coalesce requests in front of `delegate`
    pub fn new(delegate: Arc<dyn Fetcher>) -> Self {
        Self {
            delegate,
            recorder: None,
            table: Arc::new(DashMap::new()),
            wait_timeout: None,
        }
    }

    /// Count every completed idempotent fetch by [`CacheMode`]
    pub fn with_recorder(mut self, recorder: Arc<dyn ModeRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Bound how long a waiter waits for the leader
    ///
    /// A waiter that gives up receives [`Error::Timeout`]; the leader call
    /// and the other waiters are unaffected.
    pub fn with_wait_timeout(mut self, wait_timeout: Option<Duration>) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Number of keys with a call currently in flight
    pub fn in_flight(&self) -> usize {
        self.table.len()
    }

    async fn lead(
        &self,
        key: RequestKey,
        entry: Arc<InFlight>,
        request: Request,
    ) -> Result<Response> {
        let guard = CompletionGuard {
            key: key.clone(),
            entry,
            table: Arc::clone(&self.table),
            completed: false,
        };
        let delegate = Arc::clone(&self.delegate);

        let task = tokio::spawn(async move {
            let mut guard = guard;
            let result = delegate.fetch(request).await;
            guard.complete(result.clone());
            result
        });

        let result = match task.await {
            Ok(result) => result,
            Err(e) => Err(Error::internal(format!("In-flight request failed: {e}"))),
        };
        if let Err(e) = &result {
            error!(cache_key = %key, error = %e, "Error from cache transport layer");
        }
        result
    }

    async fn wait(&self, key: &RequestKey, entry: Arc<InFlight>) -> Result<Response> {
        debug!(cache_key = %key, "Waiting for in-flight request");
        let mut rx = entry.outcome.subscribe();
        let outcome = async move {
            let published = rx.wait_for(Option::is_some).await.map(|v| v.clone());
            match published {
                Ok(Some(result)) => result,
                Ok(None) | Err(_) => Err(Error::internal("In-flight request abandoned")),
            }
        };

        match self.wait_timeout {
            Some(limit) => tokio::time::timeout(limit, outcome).await.unwrap_or_else(|_| {
                Err(Error::timeout(format!(
                    "Gave up waiting for in-flight request after {limit:?}"
                )))
            }),
            None => outcome.await,
        }
    }

    /// Fetch and report the [`CacheMode`] recorded for this caller
    ///
    /// Waiters get [`CacheMode::Coalesced`] even though their response is a
    /// copy of the leader's. Requests that bypass coalescing are classified
    /// from their headers but not recorded. A coalesced-path error is
    /// recorded as [`CacheMode::Error`].
    pub async fn fetch_with_mode(&self, request: Request) -> Result<(Response, CacheMode)> {
        if !request.is_idempotent_read() {
            let response = self.delegate.fetch(request).await?;
            let mode = classify(response.headers());
            return Ok((response, mode));
        }

        let key = request.key();
        let role = match self.table.entry(key.clone()) {
            Entry::Occupied(occupied) => Role::Waiter(Arc::clone(occupied.get())),
            Entry::Vacant(vacant) => {
                let entry = Arc::new(InFlight::new());
                vacant.insert(Arc::clone(&entry));
                Role::Leader(entry)
            }
        };

        let result = match role {
            Role::Leader(entry) => self
                .lead(key, entry, request)
                .await
                .map(|response| {
                    let mode = classify(response.headers());
                    (response, mode)
                }),
            Role::Waiter(entry) => self
                .wait(&key, entry)
                .await
                .map(|response| (response, CacheMode::Coalesced)),
        };
        self.record(match &result {
            Ok((_, mode)) => *mode,
            Err(_) => CacheMode::Error,
        });
        result
    }

    fn record(&self, mode: CacheMode) {
        if let Some(recorder) = &self.recorder {
            recorder.record(mode);
        }
    }
}

#[async_trait]
impl Fetcher for RequestCoalescer {
    async fn fetch(&self, request: Request) -> Result<Response> {
        self.fetch_with_mode(request).await.map(|(response, _)| response)
    }
}

impl std::fmt::Debug for RequestCoalescer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCoalescer")
            .field("in_flight", &self.table.len())
            .field("wait_timeout", &self.wait_timeout)
            .finish()
    }
}
