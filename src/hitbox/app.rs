use std::path::PathBuf;

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use super::{HitboxCommand, HitboxSession, Rect, Zoom};
use crate::error::Error;
use crate::{dialog, notice};

const GRID_LINE: egui::Color32 = egui::Color32::from_rgb(0xdd, 0xdd, 0xdd);
// half-transparent black, premultiplied
const RECT_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 128);

// ── App ─────────────────────────────────────────────────────────────────────

pub struct HitboxApp {
    session: HitboxSession,
    texture: Option<egui::TextureHandle>,
    texture_generation: u64,
    /// Commands collected while drawing a frame, applied once it is done.
    pending: Vec<HitboxCommand>,
}

impl HitboxApp {
    pub fn new(image: Option<PathBuf>) -> Self {
        let pending = image.map(HitboxCommand::OpenImage).into_iter().collect();
        Self {
            session: HitboxSession::new(),
            texture: None,
            texture_generation: 0,
            pending,
        }
    }

    fn dispatch(&mut self, command: HitboxCommand) {
        let saved_to = match &command {
            HitboxCommand::SaveRects(path) => Some(path.clone()),
            _ => None,
        };
        match self.session.apply(command) {
            Ok(()) => {
                if let Some(path) = saved_to {
                    notice::info(
                        "Saved",
                        &format!("Rectangles saved to:\n{}", path.display()),
                    );
                }
            }
            Err(e) => notice::report(&e),
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        let generation = self.session.image_generation();
        if self.texture.is_some() && self.texture_generation == generation {
            return;
        }
        if let Some(img) = self.session.image() {
            let size = [img.width() as usize, img.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
            // nearest keeps source pixels crisp when scaled up
            self.texture = Some(ctx.load_texture(
                "sprite",
                color_image,
                egui::TextureOptions::NEAREST,
            ));
            self.texture_generation = generation;
        }
    }

    fn pick_rects_to_load(&self) -> Option<HitboxCommand> {
        if !self.session.has_image() {
            notice::report(&Error::NoImageLoaded);
            return None;
        }
        dialog::pick_open("JSON", &["json"]).map(HitboxCommand::LoadRects)
    }

    fn pick_rects_to_save(&self) -> Option<HitboxCommand> {
        if self.session.rects().is_empty() {
            notice::report(&Error::NothingToSave);
            return None;
        }
        dialog::pick_save("JSON", "json", "hitboxes.json").map(HitboxCommand::SaveRects)
    }
}

/// Loaded rectangles are not bounds-checked, so the far corner is summed in
/// canvas space where `x + w` cannot overflow.
fn screen_rect(origin: egui::Pos2, zoom: Zoom, rect: &Rect) -> egui::Rect {
    let min = egui::vec2(zoom.image_to_canvas(rect.x), zoom.image_to_canvas(rect.y));
    let size = egui::vec2(zoom.image_to_canvas(rect.w), zoom.image_to_canvas(rect.h));
    egui::Rect::from_min_max(origin + min, origin + min + size)
}

fn draw_unit_grid(painter: &egui::Painter, canvas: egui::Rect, (w, h): (u32, u32), zoom: Zoom) {
    let stroke = egui::Stroke::new(1.0, GRID_LINE);
    for i in 0..=w as i32 {
        let x = canvas.min.x + zoom.image_to_canvas(i);
        painter.line_segment(
            [egui::pos2(x, canvas.min.y), egui::pos2(x, canvas.max.y)],
            stroke,
        );
    }
    for j in 0..=h as i32 {
        let y = canvas.min.y + zoom.image_to_canvas(j);
        painter.line_segment(
            [egui::pos2(canvas.min.x, y), egui::pos2(canvas.max.x, y)],
            stroke,
        );
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for HitboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_texture(ctx);

        let mut commands = std::mem::take(&mut self.pending);

        // Keyboard shortcuts
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                commands.push(HitboxCommand::ZoomIn);
            }
            if i.key_pressed(egui::Key::Minus) {
                commands.push(HitboxCommand::ZoomOut);
            }
        });

        // Menu
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open image…").clicked() {
                        ui.close_menu();
                        if let Some(path) = dialog::pick_open("Images", &["png", "jpg", "jpeg"]) {
                            commands.push(HitboxCommand::OpenImage(path));
                        }
                    }
                });
            });
        });

        // Controls and rectangle list
        egui::SidePanel::right("controls")
            .resizable(false)
            .min_width(180.0)
            .show(ctx, |ui| {
                ui.vertical_centered_justified(|ui| {
                    if ui.button("Zoom +").clicked() {
                        commands.push(HitboxCommand::ZoomIn);
                    }
                    if ui.button("Zoom –").clicked() {
                        commands.push(HitboxCommand::ZoomOut);
                    }
                });
                ui.label(format!("Zoom: ×{}", self.session.zoom().get()));

                let mut show = self.session.show_rects();
                if ui.checkbox(&mut show, "Show rectangles").changed() {
                    commands.push(HitboxCommand::SetShowRects(show));
                }

                ui.separator();
                ui.vertical_centered_justified(|ui| {
                    if ui.button("Load rectangles…").clicked() {
                        commands.extend(self.pick_rects_to_load());
                    }
                    if ui.button("Save rectangles…").clicked() {
                        commands.extend(self.pick_rects_to_save());
                    }
                });
                ui.separator();

                TableBuilder::new(ui)
                    .striped(true)
                    .column(Column::remainder())
                    .column(Column::auto())
                    .body(|mut body| {
                        for (id, rect) in self.session.rects().iter() {
                            body.row(22.0, |mut row| {
                                row.col(|ui| {
                                    ui.label(rect.label());
                                });
                                row.col(|ui| {
                                    if ui.button("Delete").clicked() {
                                        commands.push(HitboxCommand::Delete(id));
                                    }
                                });
                            });
                        }
                    });
            });

        // Canvas
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(texture) = &self.texture else {
                ui.centered_and_justified(|ui| {
                    ui.label("File › Open image… to load a 100×100 px sprite");
                });
                return;
            };
            let zoom = self.session.zoom();
            let (w, h) = self.session.image_size();

            egui::ScrollArea::both().show(ui, |ui| {
                let size = egui::vec2(
                    zoom.image_to_canvas(w as i32),
                    zoom.image_to_canvas(h as i32),
                );
                let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
                let canvas = response.rect;

                painter.image(
                    texture.id(),
                    canvas,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
                draw_unit_grid(&painter, canvas, (w, h), zoom);

                if self.session.show_rects() {
                    for rect in self.session.rects().rects() {
                        painter.rect_filled(screen_rect(canvas.min, zoom, rect), 0.0, RECT_FILL);
                    }
                }

                if response.clicked_by(egui::PointerButton::Primary) {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let local = pos - canvas.min;
                        commands.push(HitboxCommand::CanvasClick {
                            x: local.x,
                            y: local.y,
                        });
                    }
                }
            });
        });

        // commands land after this frame was drawn
        if !commands.is_empty() {
            ctx.request_repaint();
        }
        for command in commands {
            self.dispatch(command);
        }
    }
}
