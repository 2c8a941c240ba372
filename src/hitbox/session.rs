use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, RgbaImage};

use super::{persist, ImagePoint, Rect, RectId, RectangleSet, Zoom};
use crate::config::IMAGE_SIDE;
use crate::error::{Error, Result};

/// Two-click rectangle gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    AwaitingSecondPoint { anchor: ImagePoint },
}

/// Everything the annotator window can ask the session to do.
#[derive(Clone, Debug, PartialEq)]
pub enum HitboxCommand {
    OpenImage(PathBuf),
    ZoomIn,
    ZoomOut,
    SetShowRects(bool),
    LoadRects(PathBuf),
    SaveRects(PathBuf),
    Delete(RectId),
    /// Primary click at canvas pixel coordinates (origin at the image's top-left).
    CanvasClick { x: f32, y: f32 },
}

/// State of one annotator window, independent of egui.
#[derive(Debug)]
pub struct HitboxSession {
    image: Option<RgbaImage>,
    image_generation: u64,
    zoom: Zoom,
    rects: RectangleSet,
    gesture: Gesture,
    show_rects: bool,
}

impl Default for HitboxSession {
    fn default() -> Self {
        Self {
            image: None,
            image_generation: 0,
            zoom: Zoom::default(),
            rects: RectangleSet::new(),
            gesture: Gesture::Idle,
            show_rects: true,
        }
    }
}

impl HitboxSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, command: HitboxCommand) -> Result<()> {
        match command {
            HitboxCommand::OpenImage(path) => self.open_image(&path),
            HitboxCommand::ZoomIn => {
                self.zoom_in();
                Ok(())
            }
            HitboxCommand::ZoomOut => {
                self.zoom_out();
                Ok(())
            }
            HitboxCommand::SetShowRects(show) => {
                self.show_rects = show;
                Ok(())
            }
            HitboxCommand::LoadRects(path) => self.load_rects(&path).map(|_| ()),
            HitboxCommand::SaveRects(path) => self.save_rects(&path),
            HitboxCommand::Delete(id) => {
                self.delete(id);
                Ok(())
            }
            HitboxCommand::CanvasClick { x, y } => {
                self.click_canvas(x, y);
                Ok(())
            }
        }
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Bumped every time a new image replaces the current one.
    pub fn image_generation(&self) -> u64 {
        self.image_generation
    }

    /// Image dimensions in image-space units, `(0, 0)` with no image.
    pub fn image_size(&self) -> (u32, u32) {
        self.image
            .as_ref()
            .map(|img| img.dimensions())
            .unwrap_or((0, 0))
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn rects(&self) -> &RectangleSet {
        &self.rects
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn show_rects(&self) -> bool {
        self.show_rects
    }

    pub fn set_show_rects(&mut self, show: bool) {
        self.show_rects = show;
    }

    /// Decodes and installs an image. On failure nothing changes.
    pub fn open_image(&mut self, path: &Path) -> Result<()> {
        let img = image::open(path)?;
        self.set_image(img)?;
        log::info!("opened {}", path.display());
        Ok(())
    }

    /// Installs an already decoded image, resetting zoom and dropping every
    /// rectangle.
    pub fn set_image(&mut self, img: DynamicImage) -> Result<()> {
        let (width, height) = img.dimensions();
        if (width, height) != (IMAGE_SIDE, IMAGE_SIDE) {
            return Err(Error::Format { width, height });
        }
        self.image = Some(img.to_rgba8());
        self.image_generation += 1;
        self.zoom = Zoom::default();
        self.rects.clear();
        self.gesture = Gesture::Idle;
        Ok(())
    }

    /// No-op without an image. Returns whether the factor changed.
    pub fn zoom_in(&mut self) -> bool {
        self.has_image() && self.zoom.zoom_in()
    }

    /// No-op without an image. Returns whether the factor changed.
    pub fn zoom_out(&mut self) -> bool {
        self.has_image() && self.zoom.zoom_out()
    }

    /// Feeds a canvas click through the current zoom.
    pub fn click_canvas(&mut self, x: f32, y: f32) -> Option<Rect> {
        let point = self.zoom.canvas_to_image(x, y);
        self.click(point)
    }

    /// Advances the two-click gesture. Clicks outside the image are ignored and
    /// keep any pending anchor. Returns the rectangle committed by this click.
    pub fn click(&mut self, point: ImagePoint) -> Option<Rect> {
        if !self.contains(point) {
            return None;
        }
        match self.gesture {
            Gesture::Idle => {
                log::debug!("anchor at ({}, {})", point.x, point.y);
                self.gesture = Gesture::AwaitingSecondPoint { anchor: point };
                None
            }
            Gesture::AwaitingSecondPoint { anchor } => {
                self.gesture = Gesture::Idle;
                let rect = Rect::from_cells(anchor, point);
                self.rects.push(rect);
                log::debug!("added {}", rect.label());
                Some(rect)
            }
        }
    }

    fn contains(&self, p: ImagePoint) -> bool {
        let (w, h) = self.image_size();
        p.x >= 0 && p.y >= 0 && (p.x as u32) < w && (p.y as u32) < h
    }

    pub fn delete(&mut self, id: RectId) -> Option<Rect> {
        self.rects.remove(id)
    }

    pub fn save_rects(&self, path: &Path) -> Result<()> {
        if self.rects.is_empty() {
            return Err(Error::NothingToSave);
        }
        persist::write_rects(path, self.rects.rects())?;
        log::info!("saved {} rectangles to {}", self.rects.len(), path.display());
        Ok(())
    }

    /// Replaces every rectangle with the contents of `path`. On failure the
    /// current rectangles are kept. Returns how many were loaded.
    pub fn load_rects(&mut self, path: &Path) -> Result<usize> {
        if !self.has_image() {
            return Err(Error::NoImageLoaded);
        }
        let loaded = persist::read_rects(path)?;
        self.rects.clear();
        self.gesture = Gesture::Idle;
        for rect in &loaded.rects {
            self.rects.push(*rect);
        }
        let count = loaded.rects.len();
        let total = count + loaded.skipped;
        if loaded.skipped > 0 {
            log::warn!(
                "loaded {count} of {total} rectangles from {}; {} lacked an integer x, y, width or height",
                path.display(),
                loaded.skipped
            );
        } else {
            log::info!("loaded {count} of {total} rectangles from {}", path.display());
        }
        Ok(count)
    }
}
