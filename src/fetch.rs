use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use crate::error::Result;
use crate::github::ContributionQuery;
use crate::source::{ContributionSource, ContributionsPayload};

pub struct FetchOutcome {
    pub generation: u64,
    pub query: ContributionQuery,
    pub result: Result<ContributionsPayload>,
}

/// Issues dataset requests on the runtime and hands back only the newest one's outcome.
///
/// Every request bumps the generation; outcomes from older generations are dropped on arrival.
pub struct Fetcher {
    source: Arc<dyn ContributionSource>,
    runtime: Handle,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    generation: u64,
}

impl Fetcher {
    pub fn new(source: Arc<dyn ContributionSource>, runtime: Handle) -> Self {
        let (tx, rx) = channel();
        Self { source, runtime, tx, rx, generation: 0 }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&mut self, query: ContributionQuery) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        debug!(generation, login = %query.login, from = %query.from, "fetch issued");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = source.fetch(&query).await;
            // The receiver is gone once the dashboard exits; nothing left to notify.
            let _ = tx.send(FetchOutcome { generation, query, result });
        });
        generation
    }

    /// Drain arrived outcomes, returning the current request's outcome if it is among them.
    pub fn poll(&mut self) -> Option<FetchOutcome> {
        let mut latest = None;
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.generation == self.generation {
                latest = Some(outcome);
            } else {
                debug!(
                    stale = outcome.generation,
                    current = self.generation,
                    "discarding superseded response"
                );
            }
        }
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample;
    use crate::model::Dataset;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    /// Answers `slow` logins late so responses can arrive out of order.
    struct DelayedSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContributionSource for DelayedSource {
        async fn fetch(&self, query: &ContributionQuery) -> Result<ContributionsPayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query.login == "slow" {
                tokio::time::sleep(Duration::from_millis(200)).await;
                return Ok(ContributionsPayload { viewer: None, dataset: Dataset::default() });
            }
            Ok(ContributionsPayload { viewer: None, dataset: sample() })
        }
    }

    fn wait_for(fetcher: &mut Fetcher) -> Option<FetchOutcome> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(outcome) = fetcher.poll() {
                return Some(outcome);
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn resolves_current_request() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let source = Arc::new(DelayedSource { calls: AtomicUsize::new(0) });
        let mut fetcher = Fetcher::new(source.clone(), runtime.handle().clone());

        let generation = fetcher.request(ContributionQuery::new("fast", "2024-01-01T00:00:00"));
        let outcome = wait_for(&mut fetcher).expect("outcome");
        assert_eq!(outcome.generation, generation);
        assert_eq!(outcome.result.unwrap().dataset, sample());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn late_response_from_superseded_request_is_discarded() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let source = Arc::new(DelayedSource { calls: AtomicUsize::new(0) });
        let mut fetcher = Fetcher::new(source, runtime.handle().clone());

        fetcher.request(ContributionQuery::new("slow", "2023-01-01T00:00:00"));
        let current = fetcher.request(ContributionQuery::new("fast", "2024-01-01T00:00:00"));

        let outcome = wait_for(&mut fetcher).expect("outcome");
        assert_eq!(outcome.generation, current);
        assert_eq!(outcome.query.from, "2024-01-01T00:00:00");

        std::thread::sleep(Duration::from_millis(400));
        assert!(fetcher.poll().is_none());
        assert_eq!(fetcher.generation(), current);
    }
}
