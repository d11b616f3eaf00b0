//! A completion-ordered window over an arbitrary-size input.
//!
//! [`TaskWindow`] drives at most K worker tasks at a time and hands back
//! each result as soon as it finishes, refilling the vacated slot from
//! the pending input. Output order is real-world completion order, not
//! input order.

use std::future::Future;

use tokio::task::JoinSet;

/// How many workers may be in flight at once.
///
/// `Unbounded` is the degenerate case of the same algorithm: a window
/// wide enough to hold the whole input, i.e. "race everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    /// At most this many workers in flight. Clamped to a minimum of 1.
    Bounded(usize),
    /// Race the entire input simultaneously.
    Unbounded,
}

impl Concurrency {
    fn window_size(self) -> usize {
        match self {
            Self::Bounded(limit) => limit.max(1),
            Self::Unbounded => usize::MAX,
        }
    }
}

/// A fixed-size window of in-flight tasks over a lazy input sequence.
///
/// Invariants:
/// * never more than K tasks in flight, for any input size;
/// * once the input holds ≥ K items, exactly K are in flight until the
///   input runs dry;
/// * in-flight bookkeeping is O(K) regardless of input size — slot
///   identifiers are recycled the moment a task completes.
///
/// Workers are expected not to fail; a panicked worker forfeits its
/// output and its slot is refilled like any other completion.
///
/// Must be constructed and polled inside a Tokio runtime. Dropping the
/// window detaches in-flight tasks rather than aborting them, so
/// fire-and-forget work keeps running to its own deadline.
pub struct TaskWindow<I, F, Fut>
where
    I: Iterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    pending: I,
    worker: F,
    running: JoinSet<Fut::Output>,
    limit: usize,
}

impl<I, F, Fut> TaskWindow<I, F, Fut>
where
    I: Iterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    /// Starts the first K workers immediately (fewer when the input is
    /// shorter than the window).
    pub fn new(
        inputs: impl IntoIterator<Item = I::Item, IntoIter = I>,
        concurrency: Concurrency,
        worker: F,
    ) -> Self {
        let mut window = Self {
            pending: inputs.into_iter(),
            worker,
            running: JoinSet::new(),
            limit: concurrency.window_size(),
        };
        window.refill();
        window
    }

    /// Waits for the fastest completion among the in-flight tasks,
    /// tops the window back up, and returns the finished output.
    ///
    /// Returns `None` once the window is empty and the input exhausted.
    pub async fn next(&mut self) -> Option<Fut::Output> {
        loop {
            match self.running.join_next().await {
                Some(Ok(output)) => {
                    self.refill();
                    return Some(output);
                }
                // A worker panicked; recycle the slot and keep pulling.
                Some(Err(_)) => self.refill(),
                None => return None,
            }
        }
    }

    fn refill(&mut self) {
        while self.running.len() < self.limit {
            match self.pending.next() {
                Some(item) => {
                    self.running.spawn((self.worker)(item));
                }
                None => break,
            }
        }
    }
}

impl<I, F, Fut> Drop for TaskWindow<I, F, Fut>
where
    I: Iterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    fn drop(&mut self) {
        // Abandonment is not cancellation: started tasks run on to
        // their own timeout.
        self.running.detach_all();
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
