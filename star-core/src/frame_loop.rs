//! `Stopped -> Running -> Stopped` state machine driving the animator.

use log::{debug, trace};

use crate::{
    animator::{AttractorAnimator, IndexSource},
    error::Result,
    scheduler::{FrameHandle, FrameScheduler},
};

/// Where the loop currently is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopState {
    Stopped,
    Running {
        /// The only frame allowed to mutate state.
        pending: FrameHandle,
        /// Timestamp of the previous frame; `None` until the first one.
        last_frame_ms: Option<f64>,
    },
}

/// Frame-driven loop around an [`AttractorAnimator`].
///
/// While running there is exactly one pending frame. Every frame advances
/// the animator by the time elapsed since the previous one and schedules
/// its successor; frames whose handle is not the pending one are dropped.
#[derive(Debug)]
pub struct AnimationLoop<S> {
    animator: AttractorAnimator<S>,
    state: LoopState,
}

impl<S: IndexSource> AnimationLoop<S> {
    pub fn new(animator: AttractorAnimator<S>) -> Self {
        Self {
            animator,
            state: LoopState::Stopped,
        }
    }

    pub fn animator(&self) -> &AttractorAnimator<S> {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut AttractorAnimator<S> {
        &mut self.animator
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Starts the animator and schedules the first frame.
    ///
    /// Restarting a running loop stops it first, so a failed restart leaves
    /// both the loop and the animator stopped.
    pub fn start(&mut self, point_count: usize, scheduler: &mut impl FrameScheduler) -> Result<()> {
        if let LoopState::Running { pending, .. } = self.state {
            scheduler.cancel(pending);
            self.state = LoopState::Stopped;
            self.animator.stop();
        }

        self.animator.start(point_count)?;
        self.state = LoopState::Running {
            pending: scheduler.schedule(),
            last_frame_ms: None,
        };
        Ok(())
    }

    /// Cancels the pending frame and stops the animator.
    ///
    /// ### Returns
    /// `true` if the loop was running, meaning a final redraw is due.
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        let was_running = match self.state {
            LoopState::Running { pending, .. } => {
                scheduler.cancel(pending);
                true
            }
            LoopState::Stopped => false,
        };
        self.state = LoopState::Stopped;
        self.animator.stop();
        was_running
    }

    /// Runs one scheduled frame at `now_ms`.
    ///
    /// The first frame only records its timestamp. Later frames advance the
    /// animator by the elapsed time. A new frame is scheduled either way.
    ///
    /// ### Returns
    /// `true` if the frame was accepted and a redraw is due, `false` if the
    /// handle is stale or the loop is stopped.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now_ms: f64,
        scheduler: &mut impl FrameScheduler,
    ) -> bool {
        let LoopState::Running {
            pending,
            last_frame_ms,
        } = self.state
        else {
            trace!("dropping frame {handle:?}: loop stopped");
            return false;
        };
        if handle != pending {
            debug!("dropping stale frame {handle:?}, expected {pending:?}");
            return false;
        }

        if let Some(last) = last_frame_ms {
            let dt = (now_ms - last).max(0.0);
            self.animator.advance(dt as f32);
        }

        self.state = LoopState::Running {
            pending: scheduler.schedule(),
            last_frame_ms: Some(now_ms),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{animator::tests::Scripted, scheduler::FrameQueue};

    fn running_loop(q: &mut FrameQueue) -> AnimationLoop<Scripted> {
        let mut lp = AnimationLoop::new(AttractorAnimator::new(Scripted::new([0]), 1000.0));
        lp.start(4, q).unwrap();
        lp
    }

    #[test]
    fn start_schedules_one_frame() {
        let mut q = FrameQueue::new();
        let lp = running_loop(&mut q);

        assert!(lp.is_running());
        assert!(lp.animator().is_running());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn start_with_too_few_points_stays_stopped() {
        let mut q = FrameQueue::new();
        let mut lp = AnimationLoop::new(AttractorAnimator::new(Scripted::default(), 1000.0));

        assert!(lp.start(1, &mut q).is_err());
        assert!(!lp.is_running());
        assert!(q.is_empty());
    }

    #[test]
    fn first_frame_applies_no_delta() {
        let mut q = FrameQueue::new();
        let mut lp = running_loop(&mut q);

        let h = q.pop().unwrap();
        assert!(lp.on_frame(h, 123_456.0, &mut q));
        assert_eq!(lp.animator().state().unwrap().progress, 0.0);

        let h = q.pop().unwrap();
        assert!(lp.on_frame(h, 123_456.0 + 250.0, &mut q));
        assert!((lp.animator().state().unwrap().progress - 0.25).abs() < 1e-6);
    }

    #[test]
    fn each_frame_reschedules_exactly_once() {
        let mut q = FrameQueue::new();
        let mut lp = running_loop(&mut q);

        let mut now = 0.0;
        for _ in 0..100 {
            let h = q.pop().unwrap();
            assert!(lp.on_frame(h, now, &mut q));
            assert_eq!(q.len(), 1);
            now += 16.0;
        }
    }

    #[test]
    fn stale_frame_is_ignored() {
        let mut q = FrameQueue::new();
        let mut lp = running_loop(&mut q);

        let first = q.pop().unwrap();
        lp.on_frame(first, 0.0, &mut q);
        let before = *lp.animator().state().unwrap();

        assert!(!lp.on_frame(first, 500.0, &mut q));
        assert!(!lp.on_frame(FrameHandle(999), 500.0, &mut q));
        assert_eq!(*lp.animator().state().unwrap(), before);
    }

    #[test]
    fn stop_cancels_pending_frame_and_blocks_late_delivery() {
        let mut q = FrameQueue::new();
        let mut lp = running_loop(&mut q);

        let h = q.pop().unwrap();
        lp.on_frame(h, 0.0, &mut q);
        let late = match lp.state() {
            LoopState::Running { pending, .. } => pending,
            LoopState::Stopped => panic!("loop should be running"),
        };

        assert!(lp.stop(&mut q));
        assert!(q.is_empty());
        assert!(!lp.animator().is_running());

        // A host that already dequeued the frame may still deliver it.
        assert!(!lp.on_frame(late, 100.0, &mut q));
        assert!(q.is_empty());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut q = FrameQueue::new();
        let mut lp = running_loop(&mut q);

        assert!(lp.stop(&mut q));
        assert!(!lp.stop(&mut q));
        assert!(!lp.stop(&mut q));
        assert_eq!(lp.state(), LoopState::Stopped);
    }

    #[test]
    fn restart_replaces_pending_frame() {
        let mut q = FrameQueue::new();
        let mut lp = running_loop(&mut q);
        lp.stop(&mut q);

        lp.start(4, &mut q).unwrap();
        lp.start(4, &mut q).unwrap();
        assert_eq!(q.len(), 1);

        let h = q.pop().unwrap();
        assert!(lp.on_frame(h, 0.0, &mut q));
    }

    #[test]
    fn failed_restart_leaves_everything_stopped() {
        let mut q = FrameQueue::new();
        let mut lp = running_loop(&mut q);

        assert!(lp.start(1, &mut q).is_err());
        assert!(!lp.is_running());
        assert!(!lp.animator().is_running());
        assert!(q.is_empty());
        assert!(!lp.stop(&mut q));
    }

    #[test]
    fn clock_going_backwards_does_not_rewind() {
        let mut q = FrameQueue::new();
        let mut lp = running_loop(&mut q);

        let h = q.pop().unwrap();
        lp.on_frame(h, 1000.0, &mut q);
        let h = q.pop().unwrap();
        lp.on_frame(h, 1300.0, &mut q);
        let h = q.pop().unwrap();
        lp.on_frame(h, 900.0, &mut q);

        assert!((lp.animator().state().unwrap().progress - 0.3).abs() < 1e-5);
    }
}
