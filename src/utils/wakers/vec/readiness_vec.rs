use core::ops::RangeFrom;
use core::task::Waker;
use fixedbitset::FixedBitSet;

/// Tracks which tasks were woken and should be polled in the next pass.
#[derive(Debug)]
pub(crate) struct ReadinessVec {
    ready_count: usize,
    max_count: usize,
    readiness_list: FixedBitSet,
    parent_waker: Option<Waker>,
}

impl ReadinessVec {
    /// Create a new instance of readiness. Every entry starts out ready.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            ready_count: len,
            max_count: len,
            // See https://github.com/petgraph/fixedbitset/issues/101
            readiness_list: FixedBitSet::with_capacity_and_blocks(len, std::iter::repeat(!0)),
            parent_waker: None,
        }
    }

    /// Set the ready state to `true` for the given index.
    ///
    /// Returns the old ready state for this id. Indices past the end belong to
    /// wakers of tasks which have since left the set; those are reported as
    /// already ready so nobody wakes the parent on their behalf.
    pub(crate) fn set_ready(&mut self, index: usize) -> bool {
        if index >= self.max_count {
            return true;
        }
        if !self.readiness_list[index] {
            self.ready_count += 1;
            self.readiness_list.set(index, true);
            false
        } else {
            true
        }
    }

    /// Mark every index in `range` as ready.
    pub(crate) fn set_range_ready(&mut self, range: RangeFrom<usize>) {
        for index in range.start..self.max_count {
            self.set_ready(index);
        }
    }

    /// Set the ready state to `false` for the given index
    ///
    /// Returns whether the task id was previously ready
    pub(crate) fn clear_ready(&mut self, index: usize) -> bool {
        if index < self.max_count && self.readiness_list[index] {
            self.ready_count -= 1;
            self.readiness_list.set(index, false);
            true
        } else {
            false
        }
    }

    /// Returns `true` if any of the wakers are ready.
    pub(crate) fn any_ready(&self) -> bool {
        self.ready_count > 0
    }

    /// Access the parent waker.
    #[inline]
    pub(crate) fn parent_waker(&self) -> Option<&Waker> {
        self.parent_waker.as_ref()
    }

    /// Set the parent `Waker`. This needs to be called at the start of every
    /// `poll` function.
    pub(crate) fn set_waker(&mut self, parent_waker: &Waker) {
        match &mut self.parent_waker {
            Some(prev) => prev.clone_from(parent_waker),
            None => self.parent_waker = Some(parent_waker.clone()),
        }
    }

    /// Forget the parent `Waker`, so tasks outliving the race stop waking it.
    pub(crate) fn clear_waker(&mut self) {
        self.parent_waker = None;
    }

    /// Resize `readiness` to the new length.
    ///
    /// If new entries are created, they will be marked as 'ready'.
    pub(crate) fn resize(&mut self, len: usize) {
        self.max_count = len;

        let old_len = self.readiness_list.len();
        match len.cmp(&old_len) {
            std::cmp::Ordering::Less => {
                // shrink
                self.ready_count -= self.readiness_list.count_ones(len..);
                self.readiness_list = FixedBitSet::with_capacity_and_blocks(
                    len,
                    self.readiness_list.as_slice().iter().cloned(),
                );
            }
            std::cmp::Ordering::Equal => {
                // no-op
            }
            std::cmp::Ordering::Greater => {
                // grow
                self.readiness_list.grow(len);
                self.readiness_list.set_range(old_len..len, true);
                self.ready_count += len - old_len;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_all_ready() {
        let mut readiness = ReadinessVec::new(3);
        assert!(readiness.any_ready());
        assert!(readiness.clear_ready(0));
        assert!(readiness.clear_ready(1));
        assert!(readiness.clear_ready(2));
        assert!(!readiness.any_ready());
        assert!(!readiness.clear_ready(1));
    }

    #[test]
    fn resize() {
        let mut readiness = ReadinessVec::new(10);
        for index in 0..10 {
            readiness.clear_ready(index);
        }
        assert!(!readiness.any_ready());
        readiness.set_ready(9);
        assert!(readiness.any_ready());
        readiness.resize(9);
        assert!(!readiness.any_ready());
        readiness.resize(10);
        assert!(readiness.any_ready());
    }

    #[test]
    fn stale_indices_are_ignored() {
        let mut readiness = ReadinessVec::new(2);
        readiness.clear_ready(0);
        readiness.clear_ready(1);
        readiness.resize(1);
        assert!(readiness.set_ready(1));
        assert!(readiness.set_ready(7));
        assert!(!readiness.any_ready());
        assert!(!readiness.clear_ready(1));
    }

    #[test]
    fn range_ready_marks_the_tail() {
        let mut readiness = ReadinessVec::new(4);
        for index in 0..4 {
            readiness.clear_ready(index);
        }
        readiness.set_range_ready(2..);
        assert!(!readiness.clear_ready(0));
        assert!(!readiness.clear_ready(1));
        assert!(readiness.clear_ready(2));
        assert!(readiness.clear_ready(3));
        assert!(!readiness.any_ready());
    }
}
