//! Attractor motion between star vertices.
//!
//! The animator owns the [`AnimationState`] while running: which vertex the
//! attractor left, which one it is heading to, and how far along it is.
//! Time is fed in through [`AttractorAnimator::advance`]; positions are
//! derived on demand against a [`StarLayout`] so that resizing the surface
//! never disturbs the motion.

use glam::Vec2;
use log::{debug, info, warn};
use rand::Rng;

use crate::{
    error::{Result, StarError},
    layout::StarLayout,
    types::VertexIndex,
};

/// Source of uniformly distributed vertex indices.
///
/// Any [`rand::Rng`] is a source; tests can script the sequence instead.
pub trait IndexSource {
    /// Returns an index in `0..upper`. `upper` is never zero.
    fn pick(&mut self, upper: usize) -> usize;
}

impl<R: Rng> IndexSource for R {
    fn pick(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

/// In-flight transition between two vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub current: VertexIndex,
    pub next: VertexIndex,
    /// Fraction of the current transition completed, in `[0, 1)`.
    pub progress: f32,
}

/// Moves the attractor between random star vertices.
#[derive(Debug)]
pub struct AttractorAnimator<S> {
    source: S,
    point_count: usize,
    state: Option<AnimationState>,
    /// Duration applied from the next transition on.
    duration_ms: f32,
    /// Duration of the transition in progress.
    transition_ms: f32,
}

impl<S: IndexSource> AttractorAnimator<S> {
    pub fn new(source: S, duration_ms: f32) -> Self {
        let duration_ms = if duration_ms.is_finite() && duration_ms > 0.0 {
            duration_ms
        } else {
            warn!("ignoring transition duration {duration_ms} ms, using 1000 ms");
            1000.0
        };

        Self {
            source,
            point_count: 0,
            state: None,
            duration_ms,
            transition_ms: duration_ms,
        }
    }

    /// Starts a fresh run on a `point_count`-pointed star.
    ///
    /// The attractor leaves vertex `0` towards a uniformly chosen vertex in
    /// `1..point_count`, with zero progress. Any previous run is discarded.
    ///
    /// ### Returns
    /// - `Err(StarError::TooFewPoints)` if `point_count < 2`.
    pub fn start(&mut self, point_count: usize) -> Result<()> {
        if point_count < 2 {
            return Err(StarError::TooFewPoints { count: point_count });
        }

        let next = 1 + self.source.pick(point_count - 1);
        self.point_count = point_count;
        self.transition_ms = self.duration_ms;
        self.state = Some(AnimationState {
            current: 0,
            next,
            progress: 0.0,
        });

        info!(
            "attractor started: {point_count} points, first target {next}, {:.0} ms per move",
            self.transition_ms
        );
        Ok(())
    }

    /// Stops the run and drops the in-flight transition. Safe to repeat.
    pub fn stop(&mut self) {
        if self.state.take().is_some() {
            info!("attractor stopped");
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    #[inline]
    pub fn state(&self) -> Option<&AnimationState> {
        self.state.as_ref()
    }

    /// Point count of the current (or last) run.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Duration that the next transition will use.
    #[inline]
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Duration of the transition in progress.
    #[inline]
    pub fn transition_ms(&self) -> f32 {
        self.transition_ms
    }

    /// Sets the duration for upcoming transitions.
    ///
    /// The transition in progress keeps the duration it started with.
    /// Non-finite or non-positive values are ignored.
    pub fn set_duration_ms(&mut self, duration_ms: f32) {
        if !(duration_ms.is_finite() && duration_ms > 0.0) {
            warn!("ignoring transition duration {duration_ms} ms");
            return;
        }
        self.duration_ms = duration_ms;
    }

    /// Advances the transition by `dt_ms` milliseconds.
    ///
    /// When progress reaches `1.0`, the remainder is carried over, the target
    /// becomes the current vertex and a new target different from it is drawn
    /// by rejection sampling.
    ///
    /// ### Returns
    /// `true` if a vertex was reached during this step.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        let Some(state) = self.state.as_mut() else {
            return false;
        };

        state.progress += dt_ms / self.transition_ms;
        if state.progress < 1.0 {
            return false;
        }

        state.progress %= 1.0;
        state.current = state.next;

        let mut next = self.source.pick(self.point_count);
        while next == state.current {
            next = self.source.pick(self.point_count);
        }
        state.next = next;
        self.transition_ms = self.duration_ms;

        debug!(
            "attractor reached {}, heading to {} ({:.0} ms)",
            state.current, state.next, self.transition_ms
        );
        true
    }

    /// Current attractor position on `layout`, or `None` while stopped.
    pub fn current_attractor_position(&self, layout: &StarLayout) -> Option<Vec2> {
        self.state.as_ref().map(|s| {
            let from = layout.vertex(s.current, self.point_count);
            let to = layout.vertex(s.next, self.point_count);
            from.lerp(to, s.progress)
        })
    }

    /// Target vertex of the transition in progress.
    pub fn next_vertex(&self) -> Option<VertexIndex> {
        self.state.as_ref().map(|s| s.next)
    }
}
