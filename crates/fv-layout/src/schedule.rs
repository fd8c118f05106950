//! Frame scheduling.
//!
//! The host display clock calls [`FrameClock::fire`] once per frame. Each live
//! [`Subscription`] receives the frame in its own queue; the owner drains the
//! queue with [`Subscription::poll`]. Everything is single-threaded.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// One display frame, numbered in issuance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Frame {
    pub seq: u64,
}

#[derive(Debug, Default)]
struct Queue {
    frames: VecDeque<Frame>,
    cancelled: bool,
}

#[derive(Debug, Default)]
struct ClockState {
    next_seq: u64,
    subscribers: Vec<Weak<RefCell<Queue>>>,
}

/// Source of frames. Cloning shares the same clock.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    state: Rc<RefCell<ClockState>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> Subscription {
        let queue = Rc::new(RefCell::new(Queue::default()));
        self.state.borrow_mut().subscribers.push(Rc::downgrade(&queue));
        Subscription { queue }
    }

    /// Issue one frame to every live subscription and return it.
    pub fn fire(&self) -> Frame {
        let mut state = self.state.borrow_mut();
        let frame = Frame {
            seq: state.next_seq,
        };
        state.next_seq += 1;
        state.subscribers.retain(|weak| match weak.upgrade() {
            Some(queue) => {
                let mut queue = queue.borrow_mut();
                if queue.cancelled {
                    return false;
                }
                queue.frames.push_back(frame);
                true
            }
            None => false,
        });
        frame
    }

    /// Number of subscriptions that will receive the next frame.
    pub fn live_subscriptions(&self) -> usize {
        self.state
            .borrow()
            .subscribers
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|q| !q.borrow().cancelled)
            .count()
    }
}

/// A cancelable handle on a clock. Dropping it cancels.
#[derive(Debug)]
pub struct Subscription {
    queue: Rc<RefCell<Queue>>,
}

impl Subscription {
    /// Next undelivered frame, oldest first.
    pub fn poll(&self) -> Option<Frame> {
        let mut queue = self.queue.borrow_mut();
        if queue.cancelled {
            return None;
        }
        queue.frames.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().frames.len()
    }

    /// Detach from the clock and drop queued frames. Idempotent.
    pub fn cancel(&self) {
        let mut queue = self.queue.borrow_mut();
        queue.cancelled = true;
        queue.frames.clear();
    }

    pub fn is_cancelled(&self) -> bool {
        self.queue.borrow().cancelled
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
