//! One-shot result slot shared between a producer and a consumer.
//!
//! Repository calls hand back a [`Deferred`] rather than a bare value so
//! network-backed stores can resolve after the call returns. Local stores
//! resolve before the caller ever polls. The consumer drains the terminal
//! result exactly once with [`Deferred::take`].

use std::sync::{Arc, Mutex, MutexGuard};

enum Slot<T, E> {
    Pending,
    Ready(Result<T, E>),
    Taken,
}

pub struct Deferred<T, E> {
    slot: Arc<Mutex<Slot<T, E>>>,
}

/// Producer half of a pending [`Deferred`]. Consumed on resolve so a
/// result cannot be written twice.
pub struct Resolver<T, E> {
    slot: Arc<Mutex<Slot<T, E>>>,
}

impl<T, E> Deferred<T, E> {
    /// A slot that has not resolved yet, plus its producer half.
    pub fn pending() -> (Self, Resolver<T, E>) {
        let slot = Arc::new(Mutex::new(Slot::Pending));
        (
            Deferred { slot: Arc::clone(&slot) },
            Resolver { slot },
        )
    }

    /// A slot that resolved before anyone could poll it.
    pub fn ready(result: Result<T, E>) -> Self {
        Deferred {
            slot: Arc::new(Mutex::new(Slot::Ready(result))),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(*lock(&self.slot), Slot::Pending)
    }

    /// Drains the result once resolved. `None` while pending and again
    /// after the result has been taken.
    pub fn take(&self) -> Option<Result<T, E>> {
        let mut slot = lock(&self.slot);
        match *slot {
            Slot::Ready(_) => match std::mem::replace(&mut *slot, Slot::Taken) {
                Slot::Ready(result) => Some(result),
                _ => unreachable!(),
            },
            Slot::Pending | Slot::Taken => None,
        }
    }
}

impl<T, E> Resolver<T, E> {
    /// Writes the terminal result. A no-op when every consumer handle is
    /// already gone.
    pub fn resolve(self, result: Result<T, E>) {
        let mut slot = lock(&self.slot);
        if matches!(*slot, Slot::Pending) {
            *slot = Slot::Ready(result);
        }
    }
}

fn lock<T, E>(slot: &Mutex<Slot<T, E>>) -> MutexGuard<'_, Slot<T, E>> {
    // A producer panicking mid-resolve leaves Pending behind, which is
    // still a coherent state for the consumer.
    match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_then_resolve() {
        let (deferred, resolver) = Deferred::<u32, String>::pending();
        assert!(deferred.is_pending());
        assert!(deferred.take().is_none());

        resolver.resolve(Ok(7));
        assert!(!deferred.is_pending());
        assert_eq!(deferred.take(), Some(Ok(7)));
    }

    #[test]
    fn test_take_drains_exactly_once() {
        let deferred = Deferred::<u32, String>::ready(Ok(1));
        assert_eq!(deferred.take(), Some(Ok(1)));
        assert_eq!(deferred.take(), None);
        assert!(!deferred.is_pending());
    }

    #[test]
    fn test_ready_error_passes_through() {
        let deferred = Deferred::<u32, String>::ready(Err("boom".to_string()));
        assert_eq!(deferred.take(), Some(Err("boom".to_string())));
    }

    #[test]
    fn test_resolve_without_consumer_is_quiet() {
        let (deferred, resolver) = Deferred::<u32, String>::pending();
        drop(deferred);
        resolver.resolve(Ok(42));
    }

    #[test]
    fn test_resolves_across_threads() {
        let (deferred, resolver) = Deferred::<u32, String>::pending();
        let handle = std::thread::spawn(move || resolver.resolve(Ok(9)));
        handle.join().unwrap();
        assert_eq!(deferred.take(), Some(Ok(9)));
    }
}
