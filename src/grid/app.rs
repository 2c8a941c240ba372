use eframe::egui;

use super::palette::swatch_of;
use super::{
    color_of, parse_grid_size, CellCode, GridCommand, GridEditor, Repaint, MISSING_COLOR, PALETTE,
};
use crate::config::{GRID_SIZE_MAX, GRID_SIZE_MIN};
use crate::error::Result;
use crate::{dialog, notice};

// ── App ─────────────────────────────────────────────────────────────────────

/// Level painter window.
///
/// The grid is drawn as one texture with a texel per cell, scaled up with
/// nearest filtering. Painting updates a single texel; only clearing uploads
/// the whole texture again.
pub struct LevelApp {
    editor: GridEditor,
    texture: Option<egui::TextureHandle>,
}

impl LevelApp {
    pub fn new(editor: GridEditor) -> Self {
        Self {
            editor,
            texture: None,
        }
    }

    fn full_image(&self) -> egui::ColorImage {
        let n = self.editor.grid().size();
        let mut image = egui::ColorImage::new([n, n], MISSING_COLOR);
        for (pixel, code) in image.pixels.iter_mut().zip(self.editor.grid().rows().flatten()) {
            *pixel = cell_color(*code);
        }
        image
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_none() {
            let image = self.full_image();
            self.texture = Some(ctx.load_texture("level", image, egui::TextureOptions::NEAREST));
        }
    }

    fn dispatch(&mut self, command: GridCommand) {
        match self.editor.apply(command) {
            Ok(repaint) => self.recolor(repaint),
            Err(e) => notice::report(&e),
        }
    }

    fn recolor(&mut self, repaint: Repaint) {
        match repaint {
            Repaint::Nothing => {}
            Repaint::Cell(index) => {
                let code = self.editor.grid().get(index).unwrap_or_default();
                if let Some(texture) = &mut self.texture {
                    texture.set_partial(
                        [index.col, index.row],
                        egui::ColorImage::new([1, 1], cell_color(code)),
                        egui::TextureOptions::NEAREST,
                    );
                }
            }
            Repaint::All => {
                let image = self.full_image();
                if let Some(texture) = &mut self.texture {
                    texture.set(image, egui::TextureOptions::NEAREST);
                }
            }
        }
    }
}

fn cell_color(code: CellCode) -> egui::Color32 {
    color_of(code).unwrap_or(MISSING_COLOR)
}

fn label_color(fill: egui::Color32) -> egui::Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 140.0 {
        egui::Color32::BLACK
    } else {
        egui::Color32::WHITE
    }
}

/// Cell outlines, limited to the visible part of the canvas.
fn draw_outlines(painter: &egui::Painter, canvas: egui::Rect, n: usize, cell: f32) {
    let visible = painter.clip_rect().intersect(canvas);
    if !visible.is_positive() {
        return;
    }
    let first = |min: f32, origin: f32| ((min - origin) / cell).floor().max(0.0) as usize;
    let last = |max: f32, origin: f32| (((max - origin) / cell).ceil() as usize).min(n);

    let stroke = egui::Stroke::new(1.0, egui::Color32::LIGHT_GRAY);
    for col in first(visible.min.x, canvas.min.x)..=last(visible.max.x, canvas.min.x) {
        let x = canvas.min.x + col as f32 * cell;
        painter.line_segment(
            [egui::pos2(x, visible.min.y), egui::pos2(x, visible.max.y)],
            stroke,
        );
    }
    for row in first(visible.min.y, canvas.min.y)..=last(visible.max.y, canvas.min.y) {
        let y = canvas.min.y + row as f32 * cell;
        painter.line_segment(
            [egui::pos2(visible.min.x, y), egui::pos2(visible.max.x, y)],
            stroke,
        );
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for LevelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_texture(ctx);

        let mut commands = Vec::new();

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for swatch in &PALETTE {
                    let text = egui::RichText::new(swatch.name).color(label_color(swatch.color));
                    let button = egui::Button::new(text)
                        .fill(swatch.color)
                        .selected(self.editor.brush() == swatch.code);
                    if ui.add(button).clicked() {
                        commands.push(GridCommand::SetBrush(swatch.code));
                    }
                }
                ui.separator();
                if ui.button("Clear").clicked() {
                    commands.push(GridCommand::Clear);
                }
                if ui.button("Generate").clicked() {
                    if let Some(path) = dialog::pick_save("Text files", "txt", "level.txt") {
                        commands.push(GridCommand::Export(path));
                    }
                }
                ui.separator();
                let brush = self.editor.brush();
                match swatch_of(brush) {
                    Some(swatch) => ui.label(format!("Brush: {}", swatch.name)),
                    None => ui.label(format!("Brush: {brush}")),
                };
            });
        });

        // Canvas
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::GRAY))
            .show(ctx, |ui| {
                let Some(texture) = &self.texture else {
                    return;
                };
                let n = self.editor.grid().size();
                let cell = self.editor.cell_size();

                egui::ScrollArea::both().show(ui, |ui| {
                    let side = n as f32 * cell;
                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(side, side),
                        egui::Sense::click_and_drag(),
                    );
                    let canvas = response.rect;

                    painter.image(
                        texture.id(),
                        canvas,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                    draw_outlines(&painter, canvas, n, cell);

                    // press, then every motion sample while held
                    let pressed = response.hovered() && ui.input(|i| i.pointer.primary_pressed());
                    let moved = response.dragged_by(egui::PointerButton::Primary)
                        && ui.input(|i| i.pointer.delta()) != egui::Vec2::ZERO;
                    if pressed || moved {
                        if let Some(pos) = response.interact_pointer_pos().or(response.hover_pos()) {
                            let local = pos - canvas.min;
                            commands.push(GridCommand::Paint {
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

// ── Startup ─────────────────────────────────────────────────────────────────

/// Asks for the grid size unless it was given up front, then runs the painter.
///
/// Cancelling the prompt, or answering with anything but a size in range,
/// closes the window without ever showing the editor.
pub enum LevelLauncher {
    Prompt { input: String },
    Editor(LevelApp),
}

impl LevelLauncher {
    pub fn prompt() -> Self {
        Self::Prompt {
            input: String::new(),
        }
    }

    pub fn editor(editor: GridEditor) -> Self {
        Self::Editor(LevelApp::new(editor))
    }

    fn submit(input: &str) -> Result<GridEditor> {
        GridEditor::new(parse_grid_size(input)?)
    }
}

impl eframe::App for LevelLauncher {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let input = match self {
            Self::Editor(app) => return app.update(ctx, frame),
            Self::Prompt { input } => input,
        };

        let mut submitted = false;
        let mut cancelled = ctx.input(|i| i.key_pressed(egui::Key::Escape));

        egui::CentralPanel::default().show(ctx, |_ui| {});
        egui::Window::new("Grid size")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!(
                    "Enter the grid size n (n×n, {GRID_SIZE_MIN} to {GRID_SIZE_MAX}):"
                ));
                let edit = ui.text_edit_singleline(input);
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                } else {
                    edit.request_focus();
                }
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        submitted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if cancelled {
            log::info!("grid size prompt cancelled");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else if submitted {
            match Self::submit(input) {
                Ok(editor) => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                        "level-edit — {0}×{0}",
                        editor.grid().size()
                    )));
                    *self = Self::editor(editor);
                    ctx.request_repaint();
                }
                Err(e) => {
                    notice::report(&e);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }
}
