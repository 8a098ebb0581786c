//! Display refresh clock for cooperatively scheduled animation loops.
//!
//! Animation loops ask the clock for the next frame and receive a [`FrameRequest`].
//! Each call to [`FrameClock::tick`] fires every outstanding request at once, the
//! way a display refresh fires all queued animation callbacks. Dropping a request
//! that has not fired cancels it, so a loop owner releases its scheduled frame
//! simply by letting go of the handle.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// Identifier of one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(u64);

#[derive(Debug, Default)]
struct ClockState {
    next_id: u64,
    pending: BTreeSet<FrameId>,
    ticks: u64,
}

/// Shared, single-threaded frame clock.
///
/// Clones refer to the same clock.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    state: Rc<RefCell<ClockState>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a callback for the next tick.
    pub fn request_frame(&self) -> FrameRequest {
        let mut state = self.state.borrow_mut();
        let id = FrameId(state.next_id);
        state.next_id += 1;
        state.pending.insert(id);

        FrameRequest {
            id,
            clock: Rc::downgrade(&self.state),
        }
    }

    /// Fires all pending requests and returns their ids.
    ///
    /// Requests made while handling the returned frames land on the following tick.
    pub fn tick(&self) -> Vec<FrameId> {
        let mut state = self.state.borrow_mut();
        state.ticks += 1;
        std::mem::take(&mut state.pending).into_iter().collect()
    }

    /// Number of scheduled frames that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Number of ticks since the clock was created.
    pub fn ticks(&self) -> u64 {
        self.state.borrow().ticks
    }
}

/// Handle to one scheduled frame. Cancels the frame on drop if it is still pending.
#[derive(Debug)]
pub struct FrameRequest {
    id: FrameId,
    clock: Weak<RefCell<ClockState>>,
}

impl FrameRequest {
    /// Whether this request is among the frames fired by a tick.
    pub fn is_due(&self, due: &[FrameId]) -> bool {
        due.contains(&self.id)
    }
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        if let Some(state) = self.clock.upgrade() {
            state.borrow_mut().pending.remove(&self.id);
        }
    }
}
