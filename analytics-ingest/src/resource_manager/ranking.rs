//! Ranks storage accounts used for queued ingestion by recent success ratio, so
//! repeated failures against one account push it behind healthier ones without
//! ever excluding it outright (spec.md §4.F).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;

const NUM_BUCKETS: usize = 6;
const DEFAULT_BUCKET_DURATION: Duration = Duration::from_secs(10);
const DEFAULT_TIERS: [f64; 4] = [0.90, 0.70, 0.30, 0.0];

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    success_count: u32,
    total_count: u32,
}

/// A ring of time-bucketed pass/fail counts for one account. Old buckets age
/// out as time passes, so a long-healthy account that starts failing is
/// re-ranked within a few bucket rotations rather than forever.
#[derive(Debug, Clone)]
struct AccountBuckets {
    buckets: [Bucket; NUM_BUCKETS],
    current: usize,
    bucket_started_at: Instant,
}

impl AccountBuckets {
    fn new() -> Self {
        Self {
            buckets: [Bucket::default(); NUM_BUCKETS],
            current: 0,
            bucket_started_at: Instant::now(),
        }
    }

    fn rotate(&mut self, bucket_duration: Duration) {
        let elapsed = self.bucket_started_at.elapsed();
        if elapsed < bucket_duration {
            return;
        }
        let periods = (elapsed.as_nanos() / bucket_duration.as_nanos().max(1)) as usize;
        for _ in 0..periods.min(NUM_BUCKETS) {
            self.current = (self.current + 1) % NUM_BUCKETS;
            self.buckets[self.current] = Bucket::default();
        }
        self.bucket_started_at = Instant::now();
    }

    fn record(&mut self, success: bool, bucket_duration: Duration) {
        self.rotate(bucket_duration);
        let bucket = &mut self.buckets[self.current];
        bucket.total_count += 1;
        if success {
            bucket.success_count += 1;
        }
    }

    /// Success ratio weighted toward the most recent buckets. An account with
    /// no recorded attempts ranks at 1.0 so it still gets a turn.
    fn rank(&self) -> f64 {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut weight = 1.0;
        for step in 0..NUM_BUCKETS {
            let index = (self.current + NUM_BUCKETS - step) % NUM_BUCKETS;
            let bucket = self.buckets[index];
            if bucket.total_count > 0 {
                numerator += weight * bucket.success_count as f64 / bucket.total_count as f64;
                denominator += weight;
            }
            weight *= 0.5;
        }
        if denominator == 0.0 {
            1.0
        } else {
            numerator / denominator
        }
    }
}

/// Orders candidate storage accounts into weighted tiers by recent success
/// ratio, shuffling within a tier so accounts sharing it split load evenly.
pub struct RankedStorageAccountSet {
    bucket_duration: Duration,
    tiers: Vec<f64>,
    accounts: Mutex<HashMap<String, AccountBuckets>>,
}

impl Default for RankedStorageAccountSet {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_DURATION, DEFAULT_TIERS.to_vec())
    }
}

impl RankedStorageAccountSet {
    pub fn new(bucket_duration: Duration, tiers: Vec<f64>) -> Self {
        Self {
            bucket_duration,
            tiers,
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Records whether an attempt against `account` succeeded.
    pub fn add_result(&self, account: &str, success: bool) {
        let mut accounts = self.accounts.lock().expect("ranked account set mutex poisoned");
        accounts
            .entry(account.to_string())
            .or_insert_with(AccountBuckets::new)
            .record(success, self.bucket_duration);
    }

    /// Orders `candidates` by descending rank, shuffled within each tier.
    /// Accounts with no prior history default to the top tier.
    pub fn ranked_shuffled_accounts(&self, candidates: Vec<String>) -> Vec<String> {
        let ranked: Vec<(String, f64)> = {
            let mut accounts = self.accounts.lock().expect("ranked account set mutex poisoned");
            candidates
                .into_iter()
                .map(|account| {
                    let rank = match accounts.get_mut(&account) {
                        Some(buckets) => {
                            buckets.rotate(self.bucket_duration);
                            buckets.rank()
                        }
                        None => 1.0,
                    };
                    (account, rank)
                })
                .collect()
        };

        let mut tiers: Vec<Vec<String>> = vec![Vec::new(); self.tiers.len()];
        for (account, rank) in ranked {
            let tier_index = self
                .tiers
                .iter()
                .position(|threshold| rank >= *threshold)
                .unwrap_or(self.tiers.len() - 1);
            tiers[tier_index].push(account);
        }

        let mut rng = rand::thread_rng();
        let mut ordered = Vec::new();
        for mut tier in tiers {
            tier.shuffle(&mut rng);
            ordered.extend(tier);
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testable property: an account with a higher recent success ratio never
    /// ranks below one with a lower ratio.
    #[test]
    fn higher_success_ratio_ranks_at_or_above_lower() {
        let set = RankedStorageAccountSet::default();
        for _ in 0..10 {
            set.add_result("reliable", true);
        }
        for _ in 0..10 {
            set.add_result("flaky", false);
        }

        let order = set.ranked_shuffled_accounts(vec!["flaky".into(), "reliable".into()]);
        assert_eq!(order, vec!["reliable".to_string(), "flaky".to_string()]);
    }

    #[test]
    fn unseen_accounts_default_to_top_tier() {
        let set = RankedStorageAccountSet::default();
        let order = set.ranked_shuffled_accounts(vec!["new-account".into()]);
        assert_eq!(order, vec!["new-account".to_string()]);
    }

    #[test]
    fn mixed_history_keeps_every_candidate() {
        let set = RankedStorageAccountSet::default();
        set.add_result("a", true);
        set.add_result("b", false);
        let mut order = set.ranked_shuffled_accounts(vec!["a".into(), "b".into(), "c".into()]);
        order.sort();
        assert_eq!(order, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    }
}
