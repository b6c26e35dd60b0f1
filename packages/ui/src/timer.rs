//! Platform sleep and a cancellable delayed action.

use std::future::Future;
use std::time::Duration;

use futures::future::{abortable, AbortHandle};

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Owned token for an action scheduled to run after a delay.
///
/// [`Deferred::new`] returns the token and the future that waits and then runs the
/// action; the caller spawns the future and keeps the token next to the view that
/// scheduled it. Cancelling or dropping the token stops the action from running.
#[derive(Debug)]
pub struct Deferred {
    handle: AbortHandle,
}

impl Deferred {
    pub fn new(
        delay: Duration,
        action: impl FnOnce() + 'static,
    ) -> (Self, impl Future<Output = ()> + 'static) {
        let (task, handle) = abortable(async move {
            sleep(delay).await;
            action();
        });
        let task = async move {
            if task.await.is_err() {
                tracing::debug!("Deferred action cancelled");
            }
        };
        (Self { handle }, task)
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for Deferred {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let start = tokio::time::Instant::now();

        let (token, task) = Deferred::new(Duration::from_millis(2000), move || flag.set(true));
        let mut task = Box::pin(task);

        assert!(tokio::time::timeout(Duration::from_millis(1999), &mut task)
            .await
            .is_err());
        assert!(!fired.get());

        task.await;
        assert!(fired.get());
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert!(!token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_action_never_runs() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();

        let (token, task) = Deferred::new(Duration::from_millis(2000), move || flag.set(true));
        token.cancel();
        task.await;

        assert!(token.is_cancelled());
        assert!(!fired.get());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_token_cancels() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();

        let (token, task) = Deferred::new(Duration::from_millis(2000), move || flag.set(true));
        let mut task = Box::pin(task);
        assert!(tokio::time::timeout(Duration::from_millis(500), &mut task)
            .await
            .is_err());

        drop(token);
        task.await;
        assert!(!fired.get());
    }
}
