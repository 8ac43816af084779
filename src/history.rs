//! Fixed-capacity ppm history ring.
//!
//! Chronological FIFO of recent CO2 readings, overwrite-oldest. The
//! capacity is fixed at the type level; the reference deployment uses
//! [`HISTORY_CAPACITY`](crate::config::HISTORY_CAPACITY) (one sample per
//! minute for eight hours). Owned by the orchestrator; external consumers
//! only get the read-only oldest-first view from [`HistoryBuffer::iter`].

use heapless::Deque;

/// Ring buffer of ppm samples. `-1` entries mark spans where the sensor
/// reading was unknown at sample time.
#[derive(Debug, Default)]
pub struct HistoryBuffer<const CAP: usize> {
    buf: Deque<i32, CAP>,
}

impl<const CAP: usize> HistoryBuffer<CAP> {
    pub fn new() -> Self {
        Self { buf: Deque::new() }
    }

    /// Push a sample to the back, evicting the oldest when full.
    /// O(1) amortized.
    pub fn append(&mut self, ppm: i32) {
        if self.buf.is_full() {
            let _ = self.buf.pop_front();
        }
        // Cannot fail: a slot was just freed if the deque was full.
        let _ = self.buf.push_back(ppm);
    }

    /// Oldest-first read-only view of the current contents.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.buf.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        CAP
    }
}
