use asset_edit::config::{LevelArgs, LEVEL_WINDOW_SIZE};
use asset_edit::grid::{GridEditor, LevelLauncher};
use clap::Parser;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = LevelArgs::parse();
    let (launcher, title) = match args.size {
        Some(size) => (
            LevelLauncher::editor(GridEditor::new(usize::from(size))?),
            format!("level-edit — {size}×{size}"),
        ),
        None => (LevelLauncher::prompt(), String::from("level-edit")),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(LEVEL_WINDOW_SIZE)
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(launcher))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run eframe: {e}"))
}
