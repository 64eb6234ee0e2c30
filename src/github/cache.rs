use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::query::ContributionQuery;
use crate::source::ContributionsPayload;

/// In-memory response cache keyed by query variables. A zero TTL disables it.
pub struct ResponseCache {
    ttl: Duration,
    entries: HashMap<ContributionQuery, (Instant, ContributionsPayload)>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: HashMap::new() }
    }

    pub fn get(&mut self, query: &ContributionQuery) -> Option<ContributionsPayload> {
        self.get_at(query, Instant::now())
    }

    pub fn insert(&mut self, query: ContributionQuery, payload: ContributionsPayload) {
        self.insert_at(query, payload, Instant::now());
    }

    fn get_at(&mut self, query: &ContributionQuery, now: Instant) -> Option<ContributionsPayload> {
        let (stored, payload) = self.entries.get(query)?;
        if now.duration_since(*stored) < self.ttl {
            return Some(payload.clone());
        }
        self.entries.remove(query);
        None
    }

    fn insert_at(&mut self, query: ContributionQuery, payload: ContributionsPayload, now: Instant) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(query, (now, payload));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;

    fn payload() -> ContributionsPayload {
        ContributionsPayload { viewer: None, dataset: Dataset::default() }
    }

    #[test]
    fn entries_expire_after_ttl() {
        let mut cache = ResponseCache::new(Duration::from_secs(60));
        let query = ContributionQuery::new("octo", "2024-01-01T00:00:00");
        let t0 = Instant::now();
        cache.insert_at(query.clone(), payload(), t0);

        assert!(cache.get_at(&query, t0 + Duration::from_secs(59)).is_some());
        assert!(cache.get_at(&query, t0 + Duration::from_secs(61)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn keyed_by_year_and_login() {
        let mut cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert(ContributionQuery::new("octo", "2024-01-01T00:00:00"), payload());
        assert!(cache.get(&ContributionQuery::new("octo", "2023-01-01T00:00:00")).is_none());
        assert!(cache.get(&ContributionQuery::new("other", "2024-01-01T00:00:00")).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_ttl_disables_caching() {
        let mut cache = ResponseCache::new(Duration::ZERO);
        let query = ContributionQuery::new("octo", "2024-01-01T00:00:00");
        cache.insert(query.clone(), payload());
        assert!(cache.get(&query).is_none());
    }
}
