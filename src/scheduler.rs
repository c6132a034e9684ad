//! Resize scheduling
//!
//! Resize events arrive in bursts. [`Debouncer`] collapses a burst into one
//! call that runs `wait_ms` after the last event (trailing edge only).

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Runs a callback once after a delay.
///
/// Dropping the returned handle before the delay elapses cancels the callback.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, wait_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser scheduler backed by `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, wait_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(wait_ms, callback)
    }
}

/// Trailing-edge debounce around an action
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    wait_ms: u32,
    action: Rc<dyn Fn()>,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, wait_ms: u32, action: impl Fn() + 'static) -> Self {
        Self {
            scheduler,
            wait_ms,
            action: Rc::new(action),
            pending: RefCell::new(None),
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    /// Restart the quiet period; the action runs once it elapses
    pub fn trigger(&self) {
        // Dropping the previous handle cancels it.
        self.cancel();

        let action = Rc::clone(&self.action);
        let handle = self.scheduler.schedule(self.wait_ms, Box::new(move || action()));
        *self.pending.borrow_mut() = Some(handle);
    }

    /// Drop any scheduled call
    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        drop(previous);
    }
}
