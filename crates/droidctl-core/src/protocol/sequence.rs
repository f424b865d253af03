//! Thread-safe sequence counter for clipboard acknowledgements.
//!
//! A set-clipboard request carries a caller-chosen sequence number which the
//! device echoes back once the clipboard has been replaced.  Comparing the
//! echoed value with the one sent tells the caller *which* set was
//! acknowledged.  Sequence 0 is reserved by the device side to mean "do not
//! acknowledge", so this counter never hands it out.

use std::sync::atomic::{AtomicU64, Ordering};

/// A thread-safe, monotonically increasing source of non-zero sequence numbers.
///
/// # Examples
///
/// ```rust
/// use droidctl_core::protocol::SequenceCounter;
///
/// let counter = SequenceCounter::new();
/// assert_eq!(counter.next(), 1);
/// assert_eq!(counter.next(), 2);
/// ```
#[derive(Debug)]
pub struct SequenceCounter {
    inner: AtomicU64,
}

impl SequenceCounter {
    /// Creates a new counter whose first value is 1.
    pub fn new() -> Self {
        Self {
            inner: AtomicU64::new(1),
        }
    }

    /// Returns the next sequence number and atomically advances the counter.
    ///
    /// Wraps from `u64::MAX` back to 1, skipping the reserved 0.
    pub fn next(&self) -> u64 {
        // Relaxed is enough: the value only has to be unique, it does not
        // publish any other memory.
        loop {
            let value = self.inner.fetch_add(1, Ordering::Relaxed);
            if value != 0 {
                return value;
            }
        }
    }

    /// Returns the value the next call to [`next`](Self::next) will hand out.
    pub fn current(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequence_counter_starts_at_one() {
        // Arrange
        let counter = SequenceCounter::new();

        // Act
        let first = counter.next();

        // Assert
        assert_eq!(first, 1);
    }

    #[test]
    fn test_sequence_counter_skips_zero_on_wrap() {
        // Arrange – start the counter one step before overflow
        let counter = SequenceCounter {
            inner: AtomicU64::new(u64::MAX),
        };

        // Act
        let before_wrap = counter.next();
        let after_wrap = counter.next();

        // Assert
        assert_eq!(before_wrap, u64::MAX);
        assert_eq!(after_wrap, 1, "0 is reserved and must be skipped");
    }

    #[test]
    fn test_sequence_counter_is_thread_safe() {
        // Arrange
        let counter = Arc::new(SequenceCounter::new());
        let thread_count = 8;
        let increments_per_thread = 1000;

        // Act – increment from many threads simultaneously
        let handles: Vec<_> = (0..thread_count)
            .map(|_| {
                let c = Arc::clone(&counter);
                thread::spawn(move || {
                    (0..increments_per_thread)
                        .map(|_| c.next())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all_values: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect();

        // Assert – no two threads got the same sequence number
        all_values.sort_unstable();
        all_values.dedup();
        assert_eq!(all_values.len(), thread_count * increments_per_thread);
    }

    #[test]
    fn test_current_does_not_increment() {
        let counter = SequenceCounter::new();
        counter.next();

        assert_eq!(counter.current(), 2);
        assert_eq!(counter.next(), 2);
    }
}
