use std::sync::atomic::{AtomicUsize, Ordering};

// Live counters, bumped from concurrent calls
#[derive(Debug, Default)]
pub struct ServiceStats {
    pub quotes_issued: AtomicUsize,
    pub quotes_refused: AtomicUsize,
    pub confirmations_succeeded: AtomicUsize,
    pub confirmations_rejected: AtomicUsize,
    pub invalid_quote_attempts: AtomicUsize,
}

// Plain copy of the counters for callers
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStatsReport {
    pub quotes_issued: usize,
    pub quotes_refused: usize,
    pub confirmations_succeeded: usize,
    pub confirmations_rejected: usize,
    pub invalid_quote_attempts: usize,
}

impl ServiceStats {
    pub fn record(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn report(&self) -> ServiceStatsReport {
        ServiceStatsReport {
            quotes_issued: self.quotes_issued.load(Ordering::SeqCst),
            quotes_refused: self.quotes_refused.load(Ordering::SeqCst),
            confirmations_succeeded: self.confirmations_succeeded.load(Ordering::SeqCst),
            confirmations_rejected: self.confirmations_rejected.load(Ordering::SeqCst),
            invalid_quote_attempts: self.invalid_quote_attempts.load(Ordering::SeqCst),
        }
    }
}

impl ServiceStatsReport {
    pub fn confirmations_attempted(&self) -> usize {
        self.confirmations_succeeded + self.confirmations_rejected
    }
}
