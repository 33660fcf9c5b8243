use std::cmp::Ordering;

/// A cell position on the grid, row-major
///
/// `row` grows downward and `col` grows rightward. A drawing surface maps
/// its `y` axis to `row` and its `x` axis to `col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}
impl Coord {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    #[inline]
    pub fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
}
impl PartialOrd for Coord {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Coord {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // compare row first, then col
        // i.e. if rows are equal, then compare columns
        Ord::cmp(&self.row, &other.row).then(Ord::cmp(&self.col, &other.col))
    }
}

/// The fixed size of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
}
impl Dims {
    #[inline]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
    #[inline]
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Pulls `coord` back onto the last row/col if it lies past an edge
    ///
    /// Dims with zero rows or columns have no valid coordinate; the result
    /// is then pinned to 0 on that axis.
    pub fn clamp(&self, coord: Coord) -> Coord {
        Coord {
            row: coord.row.min(self.rows.saturating_sub(1)),
            col: coord.col.min(self.cols.saturating_sub(1)),
        }
    }

    /// Row-major offset of `coord` in a flat buffer
    #[inline]
    pub(crate) fn index(&self, coord: Coord) -> usize {
        assert!(self.contains(coord), "{coord:?} out of bounds for {self:?}");
        coord.row * self.cols + coord.col
    }

    /// Iterates every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Coord { row, col }))
    }
}
