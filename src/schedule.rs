//! Delayed-action queue for the single-threaded game loop.
//!
//! The host calls [`DelayedQueue::advance`] once per frame with the elapsed
//! milliseconds; entries count down and fire exactly once when their delay is
//! spent. Everything runs on the one UI/simulation thread, so there is no
//! locking and no re-entrancy: an entry fires on some later frame than the
//! one that scheduled it (or via an explicit [`DelayedQueue::drain`]).

/// Identifies a scheduled action so it can be cancelled before it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeliveryHandle(u64);

struct Entry<T> {
    handle: u64,
    remaining_ms: u32,
    payload: T,
}

/// FIFO of pending actions with per-entry countdowns.
pub struct DelayedQueue<T> {
    entries: Vec<Entry<T>>,
    next_handle: u64,
}

impl<T> DelayedQueue<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_handle: 0 }
    }

    /// Queue `payload` to fire once `delay_ms` has elapsed. A zero delay
    /// fires on the next `advance` call.
    pub fn schedule(&mut self, delay_ms: u32, payload: T) -> DeliveryHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.entries.push(Entry { handle, remaining_ms: delay_ms, payload });
        DeliveryHandle(handle)
    }

    /// Remove a pending entry, returning its payload. `None` if it already
    /// fired or was cancelled.
    pub fn cancel(&mut self, handle: DeliveryHandle) -> Option<T> {
        let index = self.entries.iter().position(|e| e.handle == handle.0)?;
        Some(self.entries.remove(index).payload)
    }

    /// Advance all countdowns by `delta_ms` and return the payloads that came
    /// due, in the order they were scheduled.
    pub fn advance(&mut self, delta_ms: u32) -> Vec<T> {
        for entry in &mut self.entries {
            entry.remaining_ms = entry.remaining_ms.saturating_sub(delta_ms);
        }
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].remaining_ms == 0 {
                due.push(self.entries.remove(i).payload);
            } else {
                i += 1;
            }
        }
        due
    }

    /// Take every pending payload immediately, regardless of remaining delay.
    pub fn drain(&mut self) -> Vec<T> {
        self.entries.drain(..).map(|e| e.payload).collect()
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for DelayedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_full_delay() {
        let mut q = DelayedQueue::new();
        q.schedule(100, "a");
        assert!(q.advance(99).is_empty());
        assert_eq!(q.advance(1), vec!["a"]);
        assert!(q.is_empty());
    }

    #[test]
    fn fires_exactly_once() {
        let mut q = DelayedQueue::new();
        q.schedule(50, 7u32);
        assert_eq!(q.advance(200), vec![7]);
        assert!(q.advance(200).is_empty());
    }

    #[test]
    fn partial_deltas_accumulate() {
        let mut q = DelayedQueue::new();
        q.schedule(30, ());
        assert!(q.advance(10).is_empty());
        assert!(q.advance(10).is_empty());
        assert_eq!(q.advance(10).len(), 1);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut q = DelayedQueue::new();
        q.schedule(0, "now");
        assert_eq!(q.advance(0), vec!["now"]);
    }

    #[test]
    fn due_entries_keep_schedule_order() {
        let mut q = DelayedQueue::new();
        q.schedule(20, 1);
        q.schedule(10, 2);
        q.schedule(20, 3);
        // All three come due in the same advance; order is schedule order,
        // not delay order.
        assert_eq!(q.advance(25), vec![1, 2, 3]);
    }

    #[test]
    fn independent_countdowns() {
        let mut q = DelayedQueue::new();
        q.schedule(10, "fast");
        q.schedule(30, "slow");
        assert_eq!(q.advance(15), vec!["fast"]);
        assert_eq!(q.pending(), 1);
        assert_eq!(q.advance(15), vec!["slow"]);
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut q = DelayedQueue::new();
        let keep = q.schedule(10, "keep");
        let drop = q.schedule(10, "drop");
        assert_eq!(q.cancel(drop), Some("drop"));
        assert_eq!(q.cancel(drop), None);
        assert_eq!(q.advance(10), vec!["keep"]);
        let _ = keep;
    }

    #[test]
    fn drain_takes_everything_early() {
        let mut q = DelayedQueue::new();
        q.schedule(1000, 1);
        q.schedule(2000, 2);
        assert_eq!(q.drain(), vec![1, 2]);
        assert!(q.is_empty());
        assert!(q.advance(5000).is_empty());
    }

    #[test]
    fn handles_stay_unique_after_firing() {
        let mut q = DelayedQueue::new();
        let a = q.schedule(1, "a");
        q.advance(1);
        let b = q.schedule(1, "b");
        assert_ne!(a, b);
        // Cancelling the stale handle must not touch the new entry.
        assert_eq!(q.cancel(a), None);
        assert_eq!(q.advance(1), vec!["b"]);
    }
}
