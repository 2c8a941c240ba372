use asset_edit::config::{HitboxArgs, HITBOX_WINDOW_SIZE};
use asset_edit::hitbox::HitboxApp;
use clap::Parser;
use eframe::egui;

// ── Main ────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = HitboxArgs::parse();

    let title = "hitbox-edit";
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(HITBOX_WINDOW_SIZE)
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(HitboxApp::new(args.image)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run eframe: {e}"))
}
