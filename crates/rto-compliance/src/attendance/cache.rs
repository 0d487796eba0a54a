use super::aggregate::WeekFacts;
use super::domain::WeekCompliance;
use super::policy::PolicyFingerprint;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct WeekKey {
    week_start: NaiveDate,
    policy: PolicyFingerprint,
}

#[derive(Debug, Clone)]
struct CachedWeek {
    facts: WeekFacts,
    week: WeekCompliance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub resets: u64,
}

/// Caller-owned memo of week records, keyed by week start and policy.
///
/// Entries also remember the remote days and holidays inside their week, so
/// an edited week is recomputed instead of served stale. Filling the
/// cache under a new policy fingerprint drops every entry first.
#[derive(Debug, Default)]
pub struct WeekCache {
    policy: Option<PolicyFingerprint>,
    entries: HashMap<WeekKey, CachedWeek>,
    stats: CacheStats,
}

impl WeekCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        if !self.entries.is_empty() {
            debug!(entries = self.entries.len(), "week cache reset");
        }
        self.entries.clear();
        self.policy = None;
        self.stats.resets += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn policy(&self) -> Option<PolicyFingerprint> {
        self.policy
    }

    pub(crate) fn get_or_insert_with<F>(
        &mut self,
        week_start: NaiveDate,
        policy: PolicyFingerprint,
        facts: &WeekFacts,
        compute: F,
    ) -> WeekCompliance
    where
        F: FnOnce() -> WeekCompliance,
    {
        if self.policy.is_some_and(|current| current != policy) {
            self.reset();
        }
        self.policy = Some(policy);

        let key = WeekKey { week_start, policy };
        if let Some(cached) = self.entries.get(&key) {
            if cached.facts == *facts {
                self.stats.hits += 1;
                return cached.week.clone();
            }
        }

        self.stats.misses += 1;
        let week = compute();
        self.entries.insert(
            key,
            CachedWeek {
                facts: facts.clone(),
                week: week.clone(),
            },
        );
        week
    }
}
