use crate::pos::{Coord, Dims};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}
impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }
}
impl From<bool> for Cell {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}

/// A fixed-size, row-major grid of cells
///
/// The dimensions are set at construction and never change. Every cell
/// holds a value; there are no sparse entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dims,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn dead(dims: Dims) -> Self {
        Self {
            dims,
            cells: vec![Cell::Dead; dims.len()],
        }
    }

    /// Seeds every cell independently: alive iff a uniform draw in `[0, 1)`
    /// is below `alive_probability`
    ///
    /// The probability is not range checked. Anything `<= 0` yields an
    /// all-dead grid and anything `>= 1` an all-alive one.
    pub fn random<R: Rng>(dims: Dims, alive_probability: f64, rng: &mut R) -> Self {
        let cells = (0..dims.len())
            .map(|_| Cell::from(rng.random::<f64>() < alive_probability))
            .collect();
        Self { dims, cells }
    }

    /// Builds a grid where exactly the given coordinates are alive
    ///
    /// # Panics
    /// If any coordinate lies outside `dims`
    pub fn from_alive<I: IntoIterator<Item = Coord>>(dims: Dims, alive: I) -> Self {
        let mut grid = Self::dead(dims);
        for coord in alive {
            assert!(dims.contains(coord), "{coord:?} out of bounds for {dims:?}");
            grid.set(coord, Cell::Alive);
        }
        grid
    }

    /// Builds a grid from a closure evaluated at every coordinate
    pub(crate) fn from_fn<F: FnMut(Coord) -> Cell>(dims: Dims, f: F) -> Self {
        Self {
            dims,
            cells: dims.coords().map(f).collect(),
        }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// # Panics
    /// If `coord` lies outside the grid
    #[inline]
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[self.dims.index(coord)]
    }
    #[inline]
    pub fn is_alive(&self, coord: Coord) -> bool {
        self.get(coord).is_alive()
    }

    /// # Panics
    /// If `coord` lies outside the grid
    #[inline]
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        let idx = self.dims.index(coord);
        self.cells[idx] = cell;
    }

    /// Flips a single cell in place
    ///
    /// The caller guarantees `coord` is in range.
    ///
    /// # Panics
    /// If `coord` lies outside the grid
    pub fn toggle(&mut self, coord: Coord) {
        let idx = self.dims.index(coord);
        self.cells[idx] = self.cells[idx].toggled();
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Alive coordinates in row-major order
    pub fn iter_alive(&self) -> impl Iterator<Item = Coord> + '_ {
        self.dims
            .coords()
            .zip(self.cells.iter())
            .filter_map(|(coord, cell)| cell.is_alive().then_some(coord))
    }

    /// Cells of a single row
    ///
    /// # Panics
    /// If `row` lies outside the grid
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.dims.cols;
        &self.cells[start..start + self.dims.cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn zero_probability_is_all_dead() {
        let grid = Grid::random(Dims::new(12, 9), 0.0, &mut rng());

        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn full_probability_is_all_alive() {
        let dims = Dims::new(12, 9);
        let grid = Grid::random(dims, 1.0, &mut rng());

        assert_eq!(grid.alive_count(), dims.len());
    }

    #[test]
    fn out_of_range_probability_is_not_rejected() {
        let dims = Dims::square(6);

        assert_eq!(Grid::random(dims, -0.5, &mut rng()).alive_count(), 0);
        assert_eq!(Grid::random(dims, 3.0, &mut rng()).alive_count(), dims.len());
    }

    #[test]
    fn random_keeps_dimensions() {
        let dims = Dims::new(5, 11);
        let grid = Grid::random(dims, 0.3, &mut rng());

        assert_eq!(grid.dims(), dims);
        assert!(grid.iter_alive().all(|c| dims.contains(c)));
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let dims = Dims::new(4, 5);
        let original = Grid::random(dims, 0.5, &mut rng());
        let target = Coord::new(2, 3);

        let mut toggled = original.clone();
        toggled.toggle(target);

        for coord in dims.coords() {
            if coord == target {
                assert_ne!(toggled.get(coord), original.get(coord));
            } else {
                assert_eq!(toggled.get(coord), original.get(coord));
            }
        }
    }

    #[test]
    fn toggle_twice_is_identity() {
        let original = Grid::random(Dims::square(6), 0.5, &mut rng());

        let mut grid = original.clone();
        grid.toggle(Coord::new(0, 5));
        grid.toggle(Coord::new(0, 5));

        assert_eq!(grid, original);
    }

    #[test]
    #[should_panic]
    fn toggle_out_of_range_panics() {
        let mut grid = Grid::dead(Dims::square(3));
        grid.toggle(Coord::new(3, 0));
    }

    #[test]
    fn iter_alive_is_row_major() {
        let alive = [Coord::new(2, 0), Coord::new(0, 1), Coord::new(1, 2)];
        let grid = Grid::from_alive(Dims::square(3), alive);

        let listed: Vec<_> = grid.iter_alive().collect();
        assert_eq!(
            listed,
            vec![Coord::new(0, 1), Coord::new(1, 2), Coord::new(2, 0)]
        );
    }
}
