//! [`Surface`] implementation on top of an [`egui::Painter`].

use glam::Vec2;
use star_core::{render::Surface, theme::Color};

pub fn to_color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Paints into `rect` of an egui layer.
///
/// egui works in logical points and scales by `pixels_per_point` itself, so
/// the star keeps its size across displays with different pixel densities.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, p: Vec2) -> egui::Pos2 {
        egui::pos2(self.rect.min.x + p.x, self.rect.min.y + p.y)
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        Vec2::new(self.rect.width(), self.rect.height())
    }

    fn clear(&mut self, color: Color) {
        self.painter
            .rect_filled(self.rect, egui::CornerRadius::ZERO, to_color32(color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(width, to_color32(color)),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.painter
            .circle_filled(self.to_screen(center), radius, to_color32(color));
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color) {
        self.painter.text(
            self.to_screen(pos),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(size),
            to_color32(color),
        );
    }
}
