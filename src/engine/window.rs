use crate::{
    grid::Grid,
    pos::{Coord, Dims},
};

/// A rectangular view onto part of a [`Grid`]
///
/// The view is clipped to the grid, so a surface larger than the grid
/// simply shows the whole grid.
pub struct GridWindow<'a> {
    tl: Coord,
    br: Coord,
    grid: &'a Grid,
    cell_width: usize,
}
impl<'a> GridWindow<'a> {
    pub fn new(grid: &'a Grid, top_left: Coord, dims: Dims) -> Self {
        let grid_dims = grid.dims();
        let br = Coord {
            row: (top_left.row + dims.rows).min(grid_dims.rows),
            col: (top_left.col + dims.cols).min(grid_dims.cols),
        };
        Self {
            tl: Coord {
                row: top_left.row.min(br.row),
                col: top_left.col.min(br.col),
            },
            br,
            grid,
            cell_width: 1,
        }
    }

    /// Number of characters each cell occupies when displayed
    pub fn with_cell_width(mut self, cell_width: usize) -> Self {
        self.cell_width = cell_width.max(1);
        self
    }

    /// Visible size after clipping
    #[inline]
    pub fn dims(&self) -> Dims {
        Dims::new(self.br.row - self.tl.row, self.br.col - self.tl.col)
    }

    /// Alive cells inside the window, relative to its top-left corner
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        let rows = self.tl.row..self.br.row;
        let cols = self.tl.col..self.br.col;
        let tl = self.tl;
        self.grid
            .iter_alive()
            .filter(move |pos| rows.contains(&pos.row) && cols.contains(&pos.col))
            .map(move |pos| Coord::new(pos.row - tl.row, pos.col - tl.col))
    }

    /// One text line per visible row
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (self.tl.row..self.br.row).map(|row| {
            let cells = &self.grid.row(row)[self.tl.col..self.br.col];
            let mut line = String::with_capacity(cells.len() * self.cell_width * 3);
            for cell in cells {
                let glyph = if cell.is_alive() { '█' } else { ' ' };
                line.extend(std::iter::repeat_n(glyph, self.cell_width));
            }
            line
        })
    }
}

impl std::fmt::Display for GridWindow<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
