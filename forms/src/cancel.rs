use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

/// Shared flag telling an in-flight request that its owner is gone.
///
/// The request itself still runs to completion; only its result is dropped.
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }

    /// `Some(value)` unless the token was cancelled in the meantime.
    pub fn guard<T>(&self, value: T) -> Option<T> {
        if self.is_cancelled() {
            tracing::debug!("dropping result for a cancelled request");
            None
        } else {
            Some(value)
        }
    }

    /// Await `fut` and pass its output through [`Self::guard`].
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let output = fut.await;
        self.guard(output)
    }
}

/// Cancels its token when dropped. Components keep one of these for as long
/// as they are mounted.
#[derive(Debug, Default)]
pub struct CancelOnDrop(CancellationToken);

impl CancelOnDrop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancellationToken {
        self.0.clone()
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert_eq!(clone.guard(1), Some(1));
        token.cancel();
        assert!(clone.is_cancelled());
        assert_eq!(clone.guard(1), None);
    }

    #[test]
    fn dropping_the_owner_cancels() {
        let owner = CancelOnDrop::new();
        let token = owner.token();
        assert!(!token.is_cancelled());
        drop(owner);
        assert!(token.is_cancelled());
    }

    #[test]
    fn run_drops_late_results() {
        let token = CancellationToken::new();
        let pending = token.run(async { 42 });
        token.cancel();
        assert_eq!(futures::executor::block_on(pending), None);
    }
}
