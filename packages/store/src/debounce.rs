//! Trailing-edge debounce: a cancellable deferred action where the last
//! trigger wins.
//!
//! [`Debouncer::trigger`] hands out a future that sleeps for the quiet period
//! and then resolves to `true` only if no later trigger, [`cancel`](Debouncer::cancel)
//! or [`close`](Debouncer::close) happened in the meantime. The caller spawns it
//! and runs the action when it yields `true`, so a burst of triggers produces a
//! single action. A superseded or cancelled future stops sleeping at once and
//! resolves to `false`.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, AbortHandle};

use crate::time::sleep;

#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    state: Rc<DebounceState>,
}

#[derive(Debug, Default)]
struct DebounceState {
    generation: Cell<u64>,
    pending: Cell<bool>,
    closed: Cell<bool>,
    /// Timer of the latest trigger.
    timer: RefCell<Option<AbortHandle>>,
}

impl DebounceState {
    fn stop_timer(&self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: Rc::default(),
        }
    }

    /// Restart the quiet period. The ticket is taken now, not when the
    /// returned future is first polled.
    pub fn trigger(&self) -> impl Future<Output = bool> + 'static {
        let ticket = if self.state.closed.get() {
            None
        } else {
            let next = self.state.generation.get() + 1;
            self.state.generation.set(next);
            self.state.pending.set(true);
            let (timer, handle) = future::abortable(sleep(self.delay));
            if let Some(previous) = self.state.timer.replace(Some(handle)) {
                previous.abort();
            }
            Some((next, timer))
        };
        let state = self.state.clone();

        async move {
            let Some((ticket, timer)) = ticket else {
                return false;
            };
            if timer.await.is_err() {
                return false;
            }
            if state.closed.get() || state.generation.get() != ticket {
                return false;
            }
            state.pending.set(false);
            state.timer.take();
            true
        }
    }

    /// Drop the pending trigger, if any. Later triggers still work.
    pub fn cancel(&self) {
        self.state.generation.set(self.state.generation.get() + 1);
        self.state.pending.set(false);
        self.state.stop_timer();
    }

    /// Cancel and refuse every future trigger.
    pub fn close(&self) {
        self.cancel();
        self.state.closed.set(true);
    }

    /// Whether a trigger is waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.state.pending.get()
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.get()
    }
}
