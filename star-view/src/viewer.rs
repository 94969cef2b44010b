//! Interactive star attractor viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`StarController`] and
//! implements [`eframe::App`] to pump animation frames, draw the star and
//! expose the controls.

use std::time::Duration;

use eframe::App;
use log::{info, warn};
use rand::rngs::ThreadRng;
use star_core::{
    controller::StarController,
    scheduler::{FrameHandle, FrameQueue, FrameScheduler},
};

use crate::surface::PainterSurface;

/// [`FrameScheduler`] that turns every scheduled frame into a repaint request.
///
/// Due frames are collected with [`RepaintScheduler::take_due`] at the start
/// of each egui update, which makes egui's repaint cycle the frame clock.
pub struct RepaintScheduler {
    ctx: egui::Context,
    queue: FrameQueue,
}

impl RepaintScheduler {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            queue: FrameQueue::new(),
        }
    }

    /// Removes and returns every frame scheduled so far.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::iter::from_fn(|| self.queue.pop()).collect()
    }
}

impl FrameScheduler for RepaintScheduler {
    fn schedule(&mut self) -> FrameHandle {
        let handle = self.queue.schedule();
        self.ctx.request_repaint();
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.queue.cancel(handle);
    }
}

/// Main application state for the viewer.
///
/// ### Fields
/// - `controller` - Settings, animation loop and attractor state.
/// - `frames` - Frame scheduler backed by egui repaint requests.
///
/// - `ui_visible` - Whether the control panel is shown.
/// - `last_activity` - egui time (seconds) of the last pointer movement.
/// - `fullscreen` - Last fullscreen state requested from the window.
pub struct Viewer {
    controller: StarController<ThreadRng>,
    frames: RepaintScheduler,

    ui_visible: bool,
    last_activity: f64,
    fullscreen: bool,
}

impl Viewer {
    /// Wraps `controller` for display in the egui context `ctx`.
    pub fn new(ctx: egui::Context, controller: StarController<ThreadRng>) -> Self {
        Self {
            controller,
            frames: RepaintScheduler::new(ctx),
            ui_visible: true,
            last_activity: 0.0,
            fullscreen: false,
        }
    }

    /// Delivers all due frames to the controller at `now` (seconds).
    fn pump_frames(&mut self, now: f64) {
        for handle in self.frames.take_due() {
            self.controller.on_frame(handle, now * 1000.0, &mut self.frames);
        }
    }

    /// Starts or stops the animation.
    ///
    /// ### Returns
    /// `true` if stopping requested the final redraw that clears the attractor.
    fn toggle_running(&mut self) -> bool {
        if self.controller.is_running() {
            let redraw = self.controller.stop(&mut self.frames);
            if redraw {
                self.frames.ctx.request_repaint();
            }
            return redraw;
        }

        if let Err(err) = self.controller.start(&mut self.frames) {
            warn!("could not start animation: {err}");
        }
        false
    }

    /// Shows the controls on pointer activity and hides them after a quiet period.
    ///
    /// ### Returns
    /// Seconds until the controls should hide, if they are visible and a
    /// timeout is configured.
    fn update_ui_visibility(&mut self, now: f64, pointer_moved: bool) -> Option<f64> {
        if pointer_moved {
            self.ui_visible = true;
            self.last_activity = now;
        }

        let hide_after = self.controller.config().ui.hide_after_secs;
        if !self.ui_visible || hide_after <= 0.0 {
            return None;
        }

        let remaining = hide_after - (now - self.last_activity);
        if remaining <= 0.0 {
            self.ui_visible = false;
            None
        } else {
            Some(remaining)
        }
    }

    fn toggle_fullscreen(&mut self, ctx: &egui::Context) {
        self.fullscreen = !self.fullscreen;
        info!("fullscreen: {}", self.fullscreen);
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
    }

    /// Builds the floating control panel.
    fn ui_controls(&mut self, ctx: &egui::Context) {
        let running = self.controller.is_running();
        let settings = *self.controller.settings();
        let points_range = self.controller.config().points.range();
        let speed_range = self.controller.config().speed.range();

        egui::Area::new("controls".into())
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
            .movable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(128, 128, 128, 48))
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            let mut points = settings.point_count;
                            if ui
                                .add_enabled(
                                    !running,
                                    egui::Slider::new(&mut points, points_range).text("Points"),
                                )
                                .changed()
                                && let Err(err) = self.controller.on_point_count_change(points)
                            {
                                warn!("{err}");
                            }

                            let mut speed = settings.speed;
                            if ui
                                .add(egui::Slider::new(&mut speed, speed_range).text("Speed"))
                                .changed()
                            {
                                self.controller.on_speed_change(speed);
                            }

                            ui.horizontal(|ui| {
                                if ui.button(if running { "Stop" } else { "Start" }).clicked() {
                                    self.toggle_running();
                                }
                                if ui.button("Colour").clicked() {
                                    self.controller.cycle_attractor_color();
                                }
                                if ui.button("Fullscreen").clicked() {
                                    self.toggle_fullscreen(ctx);
                                }
                            });

                            let mut dark = settings.theme.is_dark();
                            if ui.checkbox(&mut dark, "Dark mode").changed() {
                                self.controller.set_theme(dark);
                            }

                            let mut highlight = settings.highlight_next;
                            if ui.checkbox(&mut highlight, "Highlight next point").changed() {
                                self.controller.set_highlight_enabled(highlight);
                            }
                        });
                    });
            });
    }

    /// Builds the central panel where the star is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::click());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                if response.double_clicked() {
                    self.toggle_running();
                }

                let mut surface = PainterSurface::new(&painter, rect);
                self.controller.draw(&mut surface);
            });
    }
}

impl App for Viewer {
    /// eframe callback run once per repaint.
    ///
    /// This method:
    /// - Delivers due animation frames to the controller.
    /// - Keeps the egui visuals in sync with the selected theme.
    /// - Draws the star, then the controls on top when visible.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (now, pointer_moved) = ctx.input(|i| (i.time, i.pointer.is_moving()));

        self.pump_frames(now);

        let dark = self.controller.settings().theme.is_dark();
        if ctx.style().visuals.dark_mode != dark {
            ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.toggle_running();
        }

        self.ui_central_panel(ctx);

        let hide_in = self.update_ui_visibility(now, pointer_moved);
        if self.ui_visible {
            self.ui_controls(ctx);
        }
        if let Some(secs) = hide_in {
            ctx.request_repaint_after(Duration::from_secs_f64(secs));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_core::config::Config;

    fn viewer() -> Viewer {
        let controller = StarController::new(Config::default(), rand::rng()).unwrap();
        Viewer::new(egui::Context::default(), controller)
    }

    #[test]
    fn take_due_drains_only_frames_scheduled_so_far() {
        let mut frames = RepaintScheduler::new(egui::Context::default());
        let a = frames.schedule();
        let b = frames.schedule();
        frames.cancel(a);

        assert_eq!(frames.take_due(), vec![b]);
        assert!(frames.take_due().is_empty());
    }

    #[test]
    fn pumping_frames_keeps_exactly_one_pending() {
        let mut viewer = viewer();
        viewer.toggle_running();
        assert!(viewer.controller.is_running());

        for step in 0..20 {
            viewer.pump_frames(step as f64 * 0.016);
            assert_eq!(viewer.frames.queue.len(), 1);
        }

        let s = viewer.controller.frame_loop().animator().state().unwrap();
        assert_ne!(s.current, s.next);
    }

    #[test]
    fn stopping_clears_pending_frames() {
        let mut viewer = viewer();
        assert!(!viewer.toggle_running());
        viewer.pump_frames(0.0);
        assert!(viewer.toggle_running());

        assert!(!viewer.controller.is_running());
        assert!(viewer.frames.take_due().is_empty());
    }

    #[test]
    fn controls_hide_after_inactivity_and_return_on_movement() {
        let mut viewer = viewer();

        assert_eq!(viewer.update_ui_visibility(0.0, true), Some(3.0));
        assert!(viewer.ui_visible);

        let remaining = viewer.update_ui_visibility(2.0, false).unwrap();
        assert!((remaining - 1.0).abs() < 1e-9);

        assert_eq!(viewer.update_ui_visibility(3.5, false), None);
        assert!(!viewer.ui_visible);

        viewer.update_ui_visibility(10.0, true);
        assert!(viewer.ui_visible);
    }

    #[test]
    fn zero_timeout_keeps_controls_visible() {
        let mut cfg = Config::default();
        cfg.ui.hide_after_secs = 0.0;
        let mut viewer = Viewer::new(
            egui::Context::default(),
            StarController::new(cfg, rand::rng()).unwrap(),
        );

        assert_eq!(viewer.update_ui_visibility(100.0, false), None);
        assert!(viewer.ui_visible);
    }
}
