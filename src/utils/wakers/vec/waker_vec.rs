use std::sync::Arc;
use std::sync::Mutex;
use std::task::Waker;

use super::{InlineWakerVec, ReadinessVec};

/// A collection of wakers, one per task, which delegate to a parent waker.
pub(crate) struct WakerVec {
    wakers: Vec<Waker>,
    readiness: Arc<Mutex<ReadinessVec>>,
}

impl WakerVec {
    /// Create a new instance of `WakerVec`.
    pub(crate) fn new(len: usize) -> Self {
        let readiness = Arc::new(Mutex::new(ReadinessVec::new(len)));
        let wakers = (0..len)
            .map(|i| Arc::new(InlineWakerVec::new(i, readiness.clone())).into())
            .collect();
        Self { wakers, readiness }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Waker> {
        self.wakers.get(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.wakers.len()
    }

    /// Access the `Readiness`.
    pub(crate) fn readiness(&self) -> &Mutex<ReadinessVec> {
        self.readiness.as_ref()
    }

    /// Account for the task at `index` leaving the set.
    ///
    /// Every task after `index` shifts down by one, but still holds the waker
    /// of its old position. Those tasks are marked ready so the next pass
    /// polls them with the waker of their new position.
    pub(crate) fn remove(&mut self, index: usize) {
        let len = self.wakers.len().saturating_sub(1);
        self.wakers.truncate(len);

        let mut readiness = self.readiness.lock().unwrap();
        readiness.resize(len);
        readiness.set_range_ready(index..);
    }
}
