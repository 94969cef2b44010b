//! Frame scheduling seam between the animation loop and its host.
//!
//! The loop never waits on a clock itself. It asks a [`FrameScheduler`] for
//! the next frame and later receives that frame back, together with a
//! timestamp, from whoever pumps frames: the windowing host in the app,
//! a [`FrameQueue`] in tests.

use std::collections::VecDeque;

/// Identifies one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    /// Requests a frame and returns its handle.
    fn schedule(&mut self) -> FrameHandle;
    /// Withdraws a previously scheduled frame. Unknown handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Queue-backed scheduler: frames are due whenever the owner pops them.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the oldest pending frame, if any.
    pub fn pop(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn schedule(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|&h| h != handle);
    }
}
