use std::sync::atomic::{AtomicU64, Ordering};

/// Receives search progress as fractions of the whole search.
///
/// `start` is called once before enumeration begins, `advance` once per
/// finished top-level origin square with `1 / movable pieces`. In a threaded
/// search `advance` is called from the worker threads.
pub trait ProgressSink: Sync {
    fn start(&self) {}
    fn advance(&self, step: f64);
}

impl ProgressSink for () {
    fn advance(&self, _step: f64) {}
}

impl<F> ProgressSink for F
where
    F: Fn(f64) + Sync,
{
    fn advance(&self, step: f64) {
        self(step)
    }
}

const TICKS: u64 = 1000;

impl ProgressSink for indicatif::ProgressBar {
    fn start(&self) {
        self.set_length(TICKS);
        self.set_position(0);
    }

    fn advance(&self, step: f64) {
        self.inc((step * TICKS as f64).round() as u64);
    }
}

/// Accumulates progress in an atomic so another thread can poll it.
#[derive(Debug, Default)]
pub struct AtomicProgress {
    millionths: AtomicU64,
}

impl AtomicProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fraction(&self) -> f64 {
        self.millionths.load(Ordering::Relaxed) as f64 / 1_000_000.0
    }
}

impl ProgressSink for AtomicProgress {
    fn start(&self) {
        self.millionths.store(0, Ordering::Relaxed);
    }

    fn advance(&self, step: f64) {
        self.millionths.fetch_add((step * 1_000_000.0).round() as u64, Ordering::Relaxed);
    }
}
