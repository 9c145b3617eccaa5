//! Time-to-live cache in front of another [`HistoryPort`].
//!
//! Entries are keyed by `(ticker, start, end)`; an entry older than the TTL is
//! refetched. Expired entries are evicted on every insert. Failed fetches are
//! never cached.

use crate::domain::error::DcasimError;
use crate::domain::raw_history::RawHistory;
use crate::ports::history_port::HistoryPort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

type CacheKey = (String, NaiveDate, NaiveDate);

struct CachedEntry {
    fetched_at: Instant,
    history: RawHistory,
}

pub struct CachedHistoryAdapter<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CachedEntry>>,
}

impl<P: HistoryPort> CachedHistoryAdapter<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn cached_len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CachedEntry>> {
        // A poisoned map still holds complete entries.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<P: HistoryPort> HistoryPort for CachedHistoryAdapter<P> {
    fn get_history(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RawHistory, DcasimError> {
        let key = (ticker.to_string(), start_date, end_date);

        if let Some(entry) = self.lock().get(&key) {
            if entry.fetched_at.elapsed() < self.ttl {
                tracing::debug!(ticker, %start_date, %end_date, "history cache hit");
                return Ok(entry.history.clone());
            }
        }

        tracing::debug!(ticker, %start_date, %end_date, "history cache miss");
        let history = self.inner.get_history(ticker, start_date, end_date)?;
        let ttl = self.ttl;
        let mut entries = self.lock();
        entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
        entries.insert(
            key,
            CachedEntry {
                fetched_at: Instant::now(),
                history: history.clone(),
            },
        );
        Ok(history)
    }

    fn list_tickers(&self) -> Result<Vec<String>, DcasimError> {
        self.inner.list_tickers()
    }
}
