//! Rectangle annotator: hitboxes painted over a fixed-size sprite.
//!
//! Coordinates here are image-space units, one unit per source pixel. The
//! [`Zoom`] factor only matters when converting to and from canvas pixels.

mod app;
mod persist;
mod session;

pub use app::HitboxApp;
pub use persist::{parse_rects, read_rects, rects_to_json, write_rects, LoadedRects, RectRecord};
pub use session::{Gesture, HitboxCommand, HitboxSession};

use crate::config::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};

/// A point in image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImagePoint {
    pub x: i32,
    pub y: i32,
}

impl ImagePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned hitbox, top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering both cells inclusively, whichever order they come in.
    pub fn from_cells(a: ImagePoint, b: ImagePoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (a.x - b.x).abs() + 1,
            h: (a.y - b.y).abs() + 1,
        }
    }

    /// Row label shown in the side list.
    pub fn label(&self) -> String {
        format!("({},{}) {}×{}", self.x, self.y, self.w, self.h)
    }
}

/// Stable identity of a committed rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RectId(u64);

/// Rectangles in creation order.
#[derive(Debug, Default)]
pub struct RectangleSet {
    entries: Vec<(RectId, Rect)>,
    next_id: u64,
}

impl RectangleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: Rect) -> RectId {
        let id = RectId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, rect));
        id
    }

    /// Removes one entry, returning it if the id was present.
    pub fn remove(&mut self, id: RectId) -> Option<Rect> {
        let index = self.entries.iter().position(|(i, _)| *i == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RectId, &Rect)> + '_ {
        self.entries.iter().map(|(id, r)| (*id, r))
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.entries.iter().map(|(_, r)| r)
    }
}

/// Integer display scale, clamped to `MIN_ZOOM..=MAX_ZOOM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zoom(u32);

impl Default for Zoom {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

impl Zoom {
    pub fn new(factor: u32) -> Self {
        Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns `false` when already at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        if self.0 < MAX_ZOOM {
            self.0 += 1;
            true
        } else {
            false
        }
    }

    /// Returns `false` when already at the minimum.
    pub fn zoom_out(&mut self) -> bool {
        if self.0 > MIN_ZOOM {
            self.0 -= 1;
            true
        } else {
            false
        }
    }

    /// Canvas pixel to image-space unit. Negative pixels map to negative units.
    pub fn canvas_to_image(self, px: f32, py: f32) -> ImagePoint {
        let z = self.0 as f32;
        ImagePoint::new((px / z).floor() as i32, (py / z).floor() as i32)
    }

    /// Image-space unit to canvas pixel.
    pub fn image_to_canvas(self, units: i32) -> f32 {
        (units as i64 * self.0 as i64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cells_normalizes() {
        let pairs = [
            ((3, 4), (10, 20)),
            ((10, 20), (3, 4)),
            ((10, 4), (3, 20)),
            ((3, 20), (10, 4)),
        ];
        for ((ax, ay), (bx, by)) in pairs {
            let r = Rect::from_cells(ImagePoint::new(ax, ay), ImagePoint::new(bx, by));
            assert_eq!(r, Rect::new(3, 4, 8, 17));
        }
    }

    #[test]
    fn same_cell_is_one_by_one() {
        let p = ImagePoint::new(7, 7);
        assert_eq!(Rect::from_cells(p, p), Rect::new(7, 7, 1, 1));
    }

    #[test]
    fn label_format() {
        assert_eq!(Rect::new(1, 2, 3, 4).label(), "(1,2) 3×4");
    }

    #[test]
    fn set_keeps_creation_order_and_ids() {
        let mut set = RectangleSet::new();
        let a = set.push(Rect::new(0, 0, 1, 1));
        let b = set.push(Rect::new(1, 1, 2, 2));
        let c = set.push(Rect::new(0, 0, 1, 1));
        assert_ne!(a, c);

        assert_eq!(set.remove(b), Some(Rect::new(1, 1, 2, 2)));
        assert_eq!(set.remove(b), None);
        let ids: Vec<_> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);

        // ids are never reused
        let d = set.push(Rect::new(5, 5, 1, 1));
        assert_ne!(d, b);
        assert_eq!(set.iter().last(), Some((d, &Rect::new(5, 5, 1, 1))));
    }

    #[test]
    fn zoom_is_reversible_and_bounded() {
        for start in MIN_ZOOM..MAX_ZOOM {
            let mut z = Zoom::new(start);
            assert!(z.zoom_in());
            assert!(z.zoom_out());
            assert_eq!(z.get(), start);
        }

        let mut z = Zoom::new(MAX_ZOOM);
        assert!(!z.zoom_in());
        assert_eq!(z.get(), MAX_ZOOM);

        let mut z = Zoom::new(MIN_ZOOM);
        assert!(!z.zoom_out());
        assert_eq!(z.get(), MIN_ZOOM);

        assert_eq!(Zoom::new(0).get(), MIN_ZOOM);
        assert_eq!(Zoom::new(99).get(), MAX_ZOOM);
        assert_eq!(Zoom::default().get(), DEFAULT_ZOOM);
    }

    #[test]
    fn canvas_to_image_floors() {
        let z = Zoom::new(4);
        assert_eq!(z.canvas_to_image(0.0, 3.9), ImagePoint::new(0, 0));
        assert_eq!(z.canvas_to_image(4.0, 8.5), ImagePoint::new(1, 2));
        assert_eq!(z.canvas_to_image(-0.5, 399.0), ImagePoint::new(-1, 99));
        assert_eq!(z.image_to_canvas(25), 100.0);
    }
}
