//! Application state and the operations the controls trigger.
//!
//! [`StarController`] is the single owner of everything that changes at
//! runtime: user settings, the animation loop, and through it the attractor.
//! Hosts hold it by value, forward control events to it and ask it for a
//! [`Scene`] to draw.

use glam::Vec2;
use log::{debug, warn};

use crate::{
    animator::{AttractorAnimator, IndexSource},
    config::Config,
    error::{Result, StarError},
    frame_loop::AnimationLoop,
    layout::StarLayout,
    render::{self, Scene, Surface},
    scheduler::{FrameHandle, FrameScheduler},
    speed::SpeedScale,
    theme::{ATTRACTOR_PALETTE, Color, Theme},
};

/// User-facing settings, as shown by the controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub point_count: usize,
    pub speed: u32,
    pub theme: Theme,
    /// Emphasise the label of the vertex the attractor is heading to.
    pub highlight_next: bool,
    /// Index into [`ATTRACTOR_PALETTE`].
    pub attractor_color: usize,
}

impl Settings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            point_count: cfg.points.default,
            speed: cfg.speed.default,
            theme: Theme::Light,
            highlight_next: true,
            attractor_color: 0,
        }
    }
}

pub struct StarController<S> {
    config: Config,
    scale: SpeedScale,
    settings: Settings,
    frame_loop: AnimationLoop<S>,
}

impl<S: IndexSource> StarController<S> {
    /// Builds a stopped controller using the config defaults.
    ///
    /// ### Returns
    /// - `Err(StarError::InvalidConfig)` if `config` fails [`Config::validate`].
    pub fn new(config: Config, source: S) -> Result<Self> {
        config.validate()?;

        let scale = SpeedScale::from_config(&config.speed);
        let settings = Settings::from_config(&config);
        let animator = AttractorAnimator::new(source, scale.duration_ms(settings.speed));

        Ok(Self {
            config,
            scale,
            settings,
            frame_loop: AnimationLoop::new(animator),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frame_loop(&self) -> &AnimationLoop<S> {
        &self.frame_loop
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Changes the number of star points.
    ///
    /// The value is clamped to the configured range.
    ///
    /// ### Returns
    /// - `Ok(applied)` with the clamped point count.
    /// - `Err(StarError::PointCountLocked)` while the animation runs.
    pub fn on_point_count_change(&mut self, point_count: usize) -> Result<usize> {
        if self.is_running() {
            warn!("point count change to {point_count} rejected while running");
            return Err(StarError::PointCountLocked);
        }

        let applied = self.config.points.clamp(point_count);
        if applied != point_count {
            debug!("point count {point_count} clamped to {applied}");
        }
        self.settings.point_count = applied;
        Ok(applied)
    }

    /// Changes the speed; clamped to the configured range.
    ///
    /// While running, the new duration applies from the next vertex on.
    pub fn on_speed_change(&mut self, speed: u32) -> u32 {
        let applied = self.config.speed.clamp(speed);
        self.settings.speed = applied;

        let duration = self.scale.duration_ms(applied);
        self.frame_loop.animator_mut().set_duration_ms(duration);
        debug!("speed {applied} -> {duration:.0} ms per move");
        applied
    }

    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) -> Result<()> {
        self.frame_loop.start(self.settings.point_count, scheduler)
    }

    /// Stops the animation.
    ///
    /// ### Returns
    /// `true` if it was running and the host should redraw once more.
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        self.frame_loop.stop(scheduler)
    }

    /// Starts when stopped, stops when running.
    pub fn toggle(&mut self, scheduler: &mut impl FrameScheduler) -> Result<()> {
        if self.is_running() {
            self.stop(scheduler);
            Ok(())
        } else {
            self.start(scheduler)
        }
    }

    pub fn set_theme(&mut self, dark: bool) {
        self.settings.theme = Theme::from_dark(dark);
    }

    pub fn set_highlight_enabled(&mut self, enabled: bool) {
        self.settings.highlight_next = enabled;
    }

    /// Switches the attractor to the next palette colour and returns it.
    pub fn cycle_attractor_color(&mut self) -> Color {
        self.settings.attractor_color = (self.settings.attractor_color + 1) % ATTRACTOR_PALETTE.len();
        self.attractor_color()
    }

    pub fn attractor_color(&self) -> Color {
        ATTRACTOR_PALETTE[self.settings.attractor_color % ATTRACTOR_PALETTE.len()]
    }

    /// Duration a transition takes at the current speed setting.
    pub fn transition_duration_ms(&self) -> f32 {
        self.scale.duration_ms(self.settings.speed)
    }

    /// Forwards a scheduled frame to the animation loop.
    ///
    /// ### Returns
    /// `true` if state changed and the host should redraw.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now_ms: f64,
        scheduler: &mut impl FrameScheduler,
    ) -> bool {
        self.frame_loop.on_frame(handle, now_ms, scheduler)
    }

    /// Star layout for a surface of `size`.
    pub fn layout(&self, size: Vec2) -> StarLayout {
        StarLayout::fit(size, self.config.style.radius_fraction)
    }

    /// Snapshot of what should be on screen for a surface of `size`.
    pub fn scene(&self, size: Vec2) -> Scene {
        let layout = self.layout(size);
        let animator = self.frame_loop.animator();

        let highlight = if self.settings.highlight_next {
            animator.next_vertex()
        } else {
            None
        };
        let attractor = animator
            .current_attractor_position(&layout)
            .map(|pos| (pos, self.attractor_color()));

        Scene {
            layout,
            point_count: self.settings.point_count,
            theme: self.settings.theme,
            highlight,
            attractor,
        }
    }

    /// Draws the current scene onto `surface`, sized to fill it.
    pub fn draw(&self, surface: &mut impl Surface) {
        let scene = self.scene(surface.size());
        render::draw(&scene, &self.config.style, surface);
    }
}
