use common::functions::current_timestamp;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

const NOT_ISSUED: i64 = i64::MIN;

/// How an exchange derives nonces from the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceStyle {
    /// `timestamp + offset`, bumped past the previous nonce whenever the clock has not moved.
    TimestampOffset(i64),
    /// Seeded from the first timestamp, then incremented by one per request.
    Counter,
}

/// Timestamp / nonce pair attached to one authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthStamp {
    pub timestamp: i64,
    pub nonce: i64,
}

/// Nonce source for a single credential set. Issued values are strictly increasing for the
/// lifetime of the counter, including under concurrent callers.
#[derive(Debug)]
pub struct NonceCounter {
    style: NonceStyle,
    last: AtomicI64,
}

impl NonceCounter {
    pub fn new(style: NonceStyle) -> Self {
        Self {
            style,
            last: AtomicI64::new(NOT_ISSUED),
        }
    }

    /// Resumes a counter whose last issued nonce is already known.
    #[cfg(test)]
    pub fn with_last(style: NonceStyle, last: i64) -> Self {
        Self {
            style,
            last: AtomicI64::new(last),
        }
    }

    pub fn last(&self) -> Option<i64> {
        let last = self.last.load(Ordering::Acquire);
        if last == NOT_ISSUED {
            None
        } else {
            Some(last)
        }
    }

    fn next_after(&self, last: i64, timestamp: i64) -> i64 {
        match self.style {
            NonceStyle::TimestampOffset(offset) => {
                let candidate = timestamp.saturating_add(offset);
                if last == NOT_ISSUED {
                    candidate
                } else {
                    candidate.max(last.saturating_add(1))
                }
            }
            NonceStyle::Counter => {
                if last == NOT_ISSUED {
                    timestamp
                } else {
                    last.saturating_add(1)
                }
            }
        }
    }

    pub fn issue(&self, timestamp: i64) -> i64 {
        let mut current = self.last.load(Ordering::Acquire);
        loop {
            let next = self.next_after(current, timestamp);
            match self
                .last
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }

    /// Reads the clock (seconds) and issues the nonce derived from it.
    pub fn stamp(&self) -> AuthStamp {
        let timestamp = current_timestamp();
        AuthStamp {
            timestamp,
            nonce: self.issue(timestamp),
        }
    }
}

/// Counters of every API key a handler has signed with. A key keeps its counter for the
/// lifetime of the ledger, so switching back to it never repeats a nonce.
#[derive(Debug, Clone)]
pub struct NonceLedger {
    style: NonceStyle,
    counters: HashMap<String, Arc<NonceCounter>>,
}

impl NonceLedger {
    pub fn new(style: NonceStyle) -> Self {
        Self {
            style,
            counters: HashMap::new(),
        }
    }

    pub fn counter_for(&mut self, key: &str) -> Arc<NonceCounter> {
        let style = self.style;
        self.counters
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(NonceCounter::new(style)))
            .clone()
    }
}
