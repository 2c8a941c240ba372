//! Command-line options and fixed editor constants.

use std::path::PathBuf;

use clap::Parser;

/// Side of the source image, in pixels. Only square images of this size open.
pub const IMAGE_SIDE: u32 = 100;

pub const DEFAULT_ZOOM: u32 = 4;
pub const MIN_ZOOM: u32 = 1;
pub const MAX_ZOOM: u32 = 20;

pub const GRID_SIZE_MIN: usize = 2;
pub const GRID_SIZE_MAX: usize = 1000;

/// On-screen side of one grid cell, in pixels.
pub const CELL_SIZE: f32 = 15.0;

pub const HITBOX_WINDOW_SIZE: [f32; 2] = [900.0, 600.0];
pub const LEVEL_WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

/// Paint rectangular hitboxes over a 100×100 px sprite.
#[derive(Parser, Debug)]
#[command(name = "hitbox-edit", version)]
pub struct HitboxArgs {
    /// Image to open at startup (png, jpg).
    pub image: Option<PathBuf>,
}

/// Paint an n×n level grid and export it as an array initializer.
#[derive(Parser, Debug)]
#[command(name = "level-edit", version)]
pub struct LevelArgs {
    /// Grid size n (the grid is n×n cells). Asked for at startup when omitted.
    #[arg(value_parser = clap::value_parser!(u16).range(GRID_SIZE_MIN as i64..=GRID_SIZE_MAX as i64))]
    pub size: Option<u16>,
}
