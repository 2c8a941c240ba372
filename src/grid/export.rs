use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::Grid;
use crate::error::Result;

/// Writes the grid as a C++ `int**` initializer, one row per line.
pub fn write_level<W: Write>(grid: &Grid, out: &mut W) -> io::Result<()> {
    let n = grid.size();
    writeln!(out, "int** level = new int*[{n}] {{")?;
    for (i, row) in grid.rows().enumerate() {
        write!(out, "    new int[{n}] {{")?;
        for (j, code) in row.iter().enumerate() {
            if j > 0 {
                out.write_all(b", ")?;
            }
            write!(out, "{code}")?;
        }
        out.write_all(b"}")?;
        if i + 1 < n {
            out.write_all(b",")?;
        }
        out.write_all(b"\n")?;
    }
    writeln!(out, "}};")
}

pub fn level_source(grid: &Grid) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_level(grid, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn export(grid: &Grid, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_level(grid, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellIndex, ENEMY_SPAWN, PLAYER_SPAWN, WALL};

    #[test]
    fn template_for_three_by_three() {
        let mut grid = Grid::new(3).unwrap();
        grid.set(CellIndex::new(0, 0), WALL);
        grid.set(CellIndex::new(1, 1), PLAYER_SPAWN);
        grid.set(CellIndex::new(2, 2), ENEMY_SPAWN);

        let expected = "\
int** level = new int*[3] {
    new int[3] {1, 0, 0},
    new int[3] {0, 2, 0},
    new int[3] {0, 0, 3}
};
";
        assert_eq!(level_source(&grid), expected);
    }

    #[test]
    fn export_writes_same_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.txt");
        let mut grid = Grid::new(4).unwrap();
        grid.set(CellIndex::new(3, 0), WALL);

        export(&grid, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, level_source(&grid));
        assert_eq!(text.lines().count(), 4 + 2);
        assert_eq!(text.lines().nth(4), Some("    new int[4] {1, 0, 0, 0}"));
    }
}
