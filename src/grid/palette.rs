use egui::Color32;

use super::{CellCode, EMPTY, ENEMY_SPAWN, PLAYER_SPAWN, WALL};

/// A brush button: code, label and render color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    pub code: CellCode,
    pub name: &'static str,
    pub color: Color32,
}

pub const PALETTE: [Swatch; 4] = [
    Swatch {
        code: EMPTY,
        name: "White",
        color: Color32::WHITE,
    },
    Swatch {
        code: WALL,
        name: "Black",
        color: Color32::BLACK,
    },
    Swatch {
        code: PLAYER_SPAWN,
        name: "Blue",
        color: Color32::BLUE,
    },
    Swatch {
        code: ENEMY_SPAWN,
        name: "Red",
        color: Color32::RED,
    },
];

/// Drawn for codes with no palette entry.
pub const MISSING_COLOR: Color32 = Color32::from_rgb(255, 0, 255);

pub fn color_of(code: CellCode) -> Option<Color32> {
    PALETTE.iter().find(|s| s.code == code).map(|s| s.color)
}

pub(crate) fn swatch_of(code: CellCode) -> Option<&'static Swatch> {
    PALETTE.iter().find(|s| s.code == code)
}
