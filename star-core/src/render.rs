//! Immediate-mode drawing of the star, its labels and the attractor.

use glam::Vec2;

use crate::{
    config::StyleConfig,
    layout::{self, StarLayout},
    theme::{Color, Theme},
    types::VertexIndex,
};

/// Immediate-mode 2D drawing surface.
///
/// Coordinates are logical pixels with the origin at the top-left corner.
/// Scaling to physical pixels is the implementor's job.
pub trait Surface {
    /// Logical size of the drawable area.
    fn size(&self) -> Vec2;
    fn clear(&mut self, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Draws `text` centered horizontally and vertically on `pos`.
    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color);
}

/// Everything needed to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scene {
    pub layout: StarLayout,
    pub point_count: usize,
    pub theme: Theme,
    /// Vertex whose label is emphasised.
    pub highlight: Option<VertexIndex>,
    /// Attractor position and colour, present only while running.
    pub attractor: Option<(Vec2, Color)>,
}

/// Draws `scene` onto `surface`.
///
/// Order: background, all connecting lines, vertex labels (1-based), then
/// the attractor on top.
pub fn draw(scene: &Scene, style: &StyleConfig, surface: &mut impl Surface) {
    let theme = scene.theme;
    let n = scene.point_count;

    surface.clear(theme.background());

    let vertices = scene.layout.vertices(n);
    for (i, j) in layout::edges(n) {
        surface.line(vertices[i], vertices[j], style.line_width, theme.line());
    }

    let labels = scene.layout.scaled(style.label_radius_factor);
    for i in 0..n {
        let pos = labels.vertex(i, n);
        let (size, color) = if scene.highlight == Some(i) {
            (style.highlight_label_size, theme.highlight())
        } else {
            (style.label_size, theme.label())
        };
        surface.text(pos, &(i + 1).to_string(), size, color);
    }

    if let Some((pos, color)) = scene.attractor {
        surface.fill_circle(pos, style.attractor_radius, color);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::theme::ATTRACTOR_PALETTE;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Op {
        Clear(Color),
        Line(Vec2, Vec2, f32, Color),
        Circle(Vec2, f32, Color),
        Text(Vec2, String, f32, Color),
    }

    /// Records every call for later inspection.
    #[derive(Debug)]
    pub(crate) struct RecordingSurface {
        pub(crate) size: Vec2,
        pub(crate) ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub(crate) fn new(size: Vec2) -> Self {
            Self {
                size,
                ops: Vec::new(),
            }
        }

        pub(crate) fn lines(&self) -> usize {
            self.ops.iter().filter(|op| matches!(op, Op::Line(..))).count()
        }

        pub(crate) fn texts(&self) -> Vec<(String, f32, Color)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(_, t, s, c) => Some((t.clone(), *s, *c)),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn circles(&self) -> Vec<(Vec2, f32, Color)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Circle(p, r, c) => Some((*p, *r, *c)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Vec2 {
            self.size
        }
        fn clear(&mut self, color: Color) {
            self.ops.push(Op::Clear(color));
        }
        fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
            self.ops.push(Op::Line(from, to, width, color));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ops.push(Op::Circle(center, radius, color));
        }
        fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color) {
            self.ops.push(Op::Text(pos, text.to_owned(), size, color));
        }
    }

    fn scene(n: usize) -> Scene {
        Scene {
            layout: StarLayout::fit(Vec2::new(500.0, 500.0), 0.4),
            point_count: n,
            theme: Theme::Light,
            highlight: None,
            attractor: None,
        }
    }

    #[test]
    fn stopped_scene_draws_lines_and_labels_only() {
        let style = StyleConfig::default();
        let mut surface = RecordingSurface::new(Vec2::new(500.0, 500.0));
        draw(&scene(16), &style, &mut surface);

        assert_eq!(surface.ops[0], Op::Clear(Theme::Light.background()));
        assert_eq!(surface.lines(), 16 * 15 / 2);
        assert!(surface.circles().is_empty());

        let texts = surface.texts();
        assert_eq!(texts.len(), 16);
        assert_eq!(texts[0].0, "1");
        assert_eq!(texts[15].0, "16");
        assert!(texts.iter().all(|(_, s, c)| *s == 16.0 && *c == Color::BLACK));
    }

    #[test]
    fn highlight_and_attractor_are_drawn_last_and_distinct() {
        let style = StyleConfig::default();
        let mut s = scene(5);
        s.theme = Theme::Dark;
        s.highlight = Some(3);
        s.attractor = Some((Vec2::new(10.0, 20.0), ATTRACTOR_PALETTE[2]));

        let mut surface = RecordingSurface::new(Vec2::new(500.0, 500.0));
        draw(&s, &style, &mut surface);

        let texts = surface.texts();
        assert_eq!(texts[3], ("4".to_owned(), 20.0, Color::RED));
        assert_eq!(texts[0].2, Theme::Dark.label());

        assert_eq!(
            surface.ops.last(),
            Some(&Op::Circle(Vec2::new(10.0, 20.0), 10.0, ATTRACTOR_PALETTE[2]))
        );
    }

    #[test]
    fn lines_use_theme_colour_and_width() {
        let mut style = StyleConfig::default();
        style.line_width = 2.5;
        let mut s = scene(3);
        s.theme = Theme::Dark;

        let mut surface = RecordingSurface::new(Vec2::new(500.0, 500.0));
        draw(&s, &style, &mut surface);

        for op in &surface.ops {
            if let Op::Line(_, _, w, c) = op {
                assert_eq!(*w, 2.5);
                assert_eq!(*c, Theme::Dark.line());
            }
        }
    }

    #[test]
    fn labels_sit_outside_the_star() {
        let style = StyleConfig::default();
        let s = scene(6);
        let mut surface = RecordingSurface::new(Vec2::new(500.0, 500.0));
        draw(&s, &style, &mut surface);

        for op in &surface.ops {
            if let Op::Text(pos, ..) = op {
                let d = pos.distance(s.layout.center);
                assert!((d - s.layout.radius * 1.15).abs() < 1e-3);
            }
        }
    }
}
