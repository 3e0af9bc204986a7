use glam::Vec3;

use super::{BoundingSphere, Geometry, Hit, Raycaster};

/// One text label anchored at a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Displayed text; empty for unused slots.
    pub text: String,
    /// Anchor position.
    pub position: Vec3,
    /// Text color.
    pub foreground: u32,
    /// Background color; `None` draws no background.
    pub background: Option<u32>,
    /// Opacity in `0..=1`.
    pub opacity: f32,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            text: String::new(),
            position: Vec3::ZERO,
            foreground: 0xFF_FF_FF,
            background: None,
            opacity: 1.0,
        }
    }
}

/// Screen-facing text labels, one chunk per label.
///
/// Labels are drawn in screen space by the renderer, so they never take
/// part in picking.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    items: Vec<Label>,
    bounds: Option<BoundingSphere>,
}

impl Labels {
    /// Allocate `count` empty labels.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            items: vec![Label::default(); count],
            bounds: None,
        }
    }

    /// Set text and anchor of label `index`.
    pub fn set_item(&mut self, index: usize, text: String, position: Vec3) {
        let item = &mut self.items[index];
        item.text = text;
        item.position = position;
    }

    /// Move label `index` without touching its text.
    pub fn set_position(&mut self, index: usize, position: Vec3) {
        self.items[index].position = position;
    }

    /// Set text and background colors of label `index`.
    pub fn set_color(&mut self, index: usize, foreground: u32, background: Option<u32>) {
        let item = &mut self.items[index];
        item.foreground = foreground;
        item.background = background;
    }

    /// Label records.
    #[must_use]
    pub fn items(&self) -> &[Label] {
        &self.items
    }
}

impl Geometry for Labels {
    fn chunk_count(&self) -> usize {
        self.items.len()
    }

    fn set_opacity(&mut self, chunks: &[usize], opacity: f32) {
        for &c in chunks {
            self.items[c].opacity = opacity;
        }
    }

    fn chunk_opacity(&self, chunk: usize) -> f32 {
        self.items[chunk].opacity
    }

    fn finalize(&mut self) {
        self.bounds = BoundingSphere::from_points(self.items.iter().map(|l| (l.position, 0.0)));
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounds
    }

    fn raycast(&self, _raycaster: &Raycaster, _hits: &mut Vec<Hit>) {}

    fn subset(&self, chunks: &[usize]) -> Box<dyn Geometry> {
        let mut out = Self {
            items: chunks.iter().map(|&c| self.items[c].clone()).collect(),
            bounds: None,
        };
        out.finalize();
        Box::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ray;

    #[test]
    fn labels_are_not_pickable() {
        let mut geo = Labels::new(1);
        geo.set_item(0, "CA".to_owned(), Vec3::ZERO);
        geo.set_color(0, 0x00_00_00, Some(0x20_20_20));
        geo.finalize();
        let mut hits = Vec::new();
        geo.raycast(&Raycaster::new(Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::X)), &mut hits);
        assert!(hits.is_empty());
        assert_eq!(geo.items()[0].background, Some(0x20_20_20));
    }
}
