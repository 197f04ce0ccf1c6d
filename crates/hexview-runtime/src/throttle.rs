#![forbid(unsafe_code)]

//! Leading-edge throttle with a trailing replay.
//!
//! # States
//!
//! ```text
//!            push (commit now)              poll: queue replayed, store changed
//!   Idle ───────────────────────▶ Armed ◀──────────────────────────────────┐
//!    ▲                             │  push: queue                           │
//!    │  poll: queue empty          │                                        │
//!    └──── or nothing changed ◀────┴────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. The first action of an idle period is returned for immediate commit.
//! 2. Actions pushed while armed are never dropped: they are replayed, in
//!    order, by [`Throttle::poll`] or [`Throttle::flush`].
//! 3. The throttle owns no timer. The host passes `now` and asks for
//!    [`Throttle::deadline`] to schedule its next poll.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Host never polls | Queue grows, bounded by the merge rule |
//! | Clock goes backwards | Deadline simply not reached yet |
//! | `cancel` while armed | Queue discarded, back to idle |

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Folds `next` into the last queued action when they can be combined.
pub type MergeFn<A> = fn(&mut A, &A) -> bool;

/// Throttle for one stream of actions.
#[derive(Debug, Clone)]
pub struct Throttle<A> {
    delay: Duration,
    queue: VecDeque<A>,
    deadline: Option<Instant>,
    merge: Option<MergeFn<A>>,
}

impl<A> Throttle<A> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            queue: VecDeque::new(),
            deadline: None,
            merge: None,
        }
    }

    /// Combine adjacent queued actions with `merge`.
    #[must_use]
    pub fn with_merge(mut self, merge: MergeFn<A>) -> Self {
        self.merge = Some(merge);
        self
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// When the host should poll next.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.deadline.is_none()
    }

    /// Actions waiting for the trailing commit.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Offer an action. Returns it when it should be committed right away.
    pub fn push(&mut self, action: A, now: Instant) -> Option<A> {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.delay);
            return Some(action);
        }
        if let (Some(merge), Some(last)) = (self.merge, self.queue.back_mut()) {
            if merge(last, &action) {
                return None;
            }
        }
        self.queue.push_back(action);
        None
    }

    /// Replay the queue once the deadline has passed.
    ///
    /// `commit` receives the queued actions and reports whether the store
    /// changed. A change re-arms the deadline; otherwise the throttle goes
    /// idle. Returns whether anything was committed.
    pub fn poll(&mut self, now: Instant, commit: impl FnOnce(Vec<A>) -> bool) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {}
            _ => return false,
        }
        if self.queue.is_empty() {
            self.deadline = None;
            return false;
        }
        let batch: Vec<A> = self.queue.drain(..).collect();
        self.deadline = if commit(batch) {
            Some(now + self.delay)
        } else {
            None
        };
        true
    }

    /// Take the queue for an immediate commit, keeping the deadline.
    pub fn flush(&mut self) -> Vec<A> {
        self.queue.drain(..).collect()
    }

    /// Drop everything and go idle.
    pub fn cancel(&mut self) {
        self.queue.clear();
        self.deadline = None;
    }
}
