//! Level grid painter.
//!
//! An n×n grid of cell codes painted with a brush and dumped as an array
//! initializer. The grid never changes size once created.

mod app;
mod export;
mod palette;

pub use app::{LevelApp, LevelLauncher};
pub use export::{export, level_source, write_level};
pub use palette::{color_of, Swatch, MISSING_COLOR, PALETTE};

use std::path::PathBuf;

use crate::config::{CELL_SIZE, GRID_SIZE_MAX, GRID_SIZE_MIN};
use crate::error::{Error, Result};

/// Semantic category of a cell. Only the codes in [`PALETTE`] have a color.
pub type CellCode = i32;

pub const EMPTY: CellCode = 0;
pub const WALL: CellCode = 1;
pub const PLAYER_SPAWN: CellCode = 2;
pub const ENEMY_SPAWN: CellCode = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row-major square matrix of cell codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellCode>,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self> {
        if !(GRID_SIZE_MIN..=GRID_SIZE_MAX).contains(&size) {
            return Err(Error::GridSize(size));
        }
        Ok(Self {
            size,
            cells: vec![EMPTY; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, index: CellIndex) -> Option<CellCode> {
        self.offset(index).map(|i| self.cells[i])
    }

    /// Returns `false` when `index` is out of bounds.
    pub fn set(&mut self, index: CellIndex, code: CellCode) -> bool {
        match self.offset(index) {
            Some(i) => {
                self.cells[i] = code;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, code: CellCode) {
        self.cells.fill(code);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellCode]> + '_ {
        self.cells.chunks(self.size)
    }

    fn offset(&self, index: CellIndex) -> Option<usize> {
        (index.row < self.size && index.col < self.size).then(|| index.row * self.size + index.col)
    }

    /// Cell under a content-space pixel, if any.
    pub fn cell_at(&self, x: f32, y: f32, cell_size: f32) -> Option<CellIndex> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let index = CellIndex::new((y / cell_size) as usize, (x / cell_size) as usize);
        self.offset(index).map(|_| index)
    }
}

/// Reads a grid size typed at the startup prompt.
pub fn parse_grid_size(text: &str) -> Result<usize> {
    let text = text.trim();
    let size: usize = text
        .parse()
        .map_err(|_| Error::NotANumber(text.to_owned()))?;
    if !(GRID_SIZE_MIN..=GRID_SIZE_MAX).contains(&size) {
        return Err(Error::GridSize(size));
    }
    Ok(size)
}

/// Everything the level window can ask the editor to do.
#[derive(Clone, Debug, PartialEq)]
pub enum GridCommand {
    SetBrush(CellCode),
    Clear,
    Export(PathBuf),
    /// Click or drag sample at content-space pixel coordinates (scroll offset
    /// already applied).
    Paint { x: f32, y: f32 },
}

/// Which cells the view has to recolor after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repaint {
    Nothing,
    Cell(CellIndex),
    All,
}

/// Grid plus the current brush.
#[derive(Debug)]
pub struct GridEditor {
    grid: Grid,
    brush: CellCode,
    cell_size: f32,
}

impl GridEditor {
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(size)?,
            brush: WALL,
            cell_size: CELL_SIZE,
        })
    }

    pub fn apply(&mut self, command: GridCommand) -> Result<Repaint> {
        match command {
            GridCommand::SetBrush(code) => {
                self.set_brush(code);
                Ok(Repaint::Nothing)
            }
            GridCommand::Clear => {
                self.clear();
                Ok(Repaint::All)
            }
            GridCommand::Export(path) => {
                export(&self.grid, &path)?;
                log::info!("exported {0}×{0} level to {1}", self.grid.size(), path.display());
                Ok(Repaint::Nothing)
            }
            GridCommand::Paint { x, y } => Ok(self
                .paint_at(x, y)
                .map_or(Repaint::Nothing, Repaint::Cell)),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn brush(&self) -> CellCode {
        self.brush
    }

    /// Any code is accepted; codes outside [`PALETTE`] render as
    /// [`MISSING_COLOR`].
    pub fn set_brush(&mut self, code: CellCode) {
        self.brush = code;
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Paints the cell under the pixel with the brush and returns it.
    pub fn paint_at(&mut self, x: f32, y: f32) -> Option<CellIndex> {
        let index = self.grid.cell_at(x, y, self.cell_size)?;
        self.grid.set(index, self.brush);
        Some(index)
    }

    pub fn clear(&mut self) {
        self.grid.fill(EMPTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_bounds() {
        assert!(matches!(Grid::new(1), Err(Error::GridSize(1))));
        assert!(matches!(Grid::new(1001), Err(Error::GridSize(1001))));
        assert_eq!(Grid::new(2).unwrap().size(), 2);
        assert_eq!(Grid::new(1000).unwrap().rows().count(), 1000);
    }

    #[test]
    fn prompt_input_is_validated() {
        assert_eq!(parse_grid_size("2").unwrap(), 2);
        assert_eq!(parse_grid_size(" 1000\n").unwrap(), 1000);
        assert!(matches!(parse_grid_size("1"), Err(Error::GridSize(1))));
        assert!(matches!(parse_grid_size("1001"), Err(Error::GridSize(1001))));
        assert!(matches!(parse_grid_size(""), Err(Error::NotANumber(s)) if s.is_empty()));
        assert!(matches!(parse_grid_size("12.5"), Err(Error::NotANumber(_))));
        assert!(matches!(parse_grid_size("-4"), Err(Error::NotANumber(_))));
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(5).unwrap();
        assert!(grid.rows().flatten().all(|&c| c == EMPTY));
        assert_eq!(grid.get(CellIndex::new(5, 0)), None);
    }

    #[test]
    fn cell_at_floors_and_bounds() {
        let grid = Grid::new(4).unwrap();
        assert_eq!(grid.cell_at(0.0, 0.0, 15.0), Some(CellIndex::new(0, 0)));
        assert_eq!(grid.cell_at(14.9, 15.0, 15.0), Some(CellIndex::new(1, 0)));
        assert_eq!(grid.cell_at(59.9, 59.9, 15.0), Some(CellIndex::new(3, 3)));
        assert_eq!(grid.cell_at(60.0, 0.0, 15.0), None);
        assert_eq!(grid.cell_at(0.0, -0.1, 15.0), None);
        assert_eq!(grid.cell_at(f32::NAN, 0.0, 15.0), None);
    }

    #[test]
    fn paint_touches_one_cell() {
        let mut editor = GridEditor::new(10).unwrap();
        assert_eq!(editor.brush(), WALL);

        // row 2 (y 30..45), col 7 (x 105..120)
        let repaint = editor.apply(GridCommand::Paint { x: 110.0, y: 44.0 }).unwrap();
        assert_eq!(repaint, Repaint::Cell(CellIndex::new(2, 7)));

        for (r, row) in editor.grid().rows().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                let expected = if (r, c) == (2, 7) { WALL } else { EMPTY };
                assert_eq!(code, expected, "cell ({r}, {c})");
            }
        }
    }

    #[test]
    fn paint_outside_is_ignored() {
        let mut editor = GridEditor::new(3).unwrap();
        let repaint = editor.apply(GridCommand::Paint { x: 45.0, y: 1.0 }).unwrap();
        assert_eq!(repaint, Repaint::Nothing);
        assert_eq!(editor.grid(), &Grid::new(3).unwrap());
    }

    #[test]
    fn last_write_wins() {
        let mut editor = GridEditor::new(3).unwrap();
        editor.paint_at(1.0, 1.0);
        editor.apply(GridCommand::SetBrush(ENEMY_SPAWN)).unwrap();
        editor.paint_at(2.0, 2.0);
        assert_eq!(editor.grid().get(CellIndex::new(0, 0)), Some(ENEMY_SPAWN));
    }

    #[test]
    fn any_brush_code_is_accepted() {
        let mut editor = GridEditor::new(2).unwrap();
        editor.set_brush(42);
        editor.paint_at(0.0, 0.0);
        assert_eq!(editor.grid().get(CellIndex::new(0, 0)), Some(42));
    }

    #[test]
    fn clear_resets_everything() {
        let n = 6;
        let mut editor = GridEditor::new(n).unwrap();
        editor.set_brush(PLAYER_SPAWN);
        let step = editor.cell_size();
        for r in 0..n {
            for c in 0..n {
                editor.paint_at(c as f32 * step + 1.0, r as f32 * step + 1.0);
            }
        }
        assert!(editor.grid().rows().flatten().all(|&c| c == PLAYER_SPAWN));

        assert_eq!(editor.apply(GridCommand::Clear).unwrap(), Repaint::All);
        assert!(editor.grid().rows().flatten().all(|&c| c == EMPTY));
        // clearing keeps the brush
        assert_eq!(editor.brush(), PLAYER_SPAWN);
    }

    #[test]
    fn export_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.txt");
        let mut editor = GridEditor::new(2).unwrap();
        editor.paint_at(16.0, 0.0);
        editor.apply(GridCommand::Export(path.clone())).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("new int[2] {0, 1},"));
    }

    #[test]
    fn export_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = GridEditor::new(2).unwrap();
        let err = editor
            .apply(GridCommand::Export(dir.path().join("no/such/level.txt")))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
