mod index;
mod window;

pub use self::window::GridWindow;
use crate::{
    grid::{Cell, Grid},
    pos::{Coord, Dims},
};
use rand::Rng;

/// How neighbor lookups treat the grid edges
///
/// The policy is fixed for one simulation; it changes how edge and corner
/// cells evolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Edges wrap around to the opposite side
    #[default]
    Toroidal,
    /// Neighbors past an edge are skipped (count as dead)
    Bounded,
}

impl Boundary {
    /// Resolves `pos + delta` along an axis of length `len`
    #[inline]
    fn step(self, pos: usize, delta: isize, len: usize) -> Option<usize> {
        match self {
            Self::Toroidal => {
                Some((pos as isize + delta).rem_euclid(len as isize) as usize)
            }
            Self::Bounded => pos.checked_add_signed(delta).filter(|&p| p < len),
        }
    }

    /// The in-grid position of the neighbor at `(d_row, d_col)` from `coord`
    #[inline]
    fn neighbor(self, dims: Dims, coord: Coord, d_row: isize, d_col: isize) -> Option<Coord> {
        Some(Coord {
            row: self.step(coord.row, d_row, dims.rows)?,
            col: self.step(coord.col, d_col, dims.cols)?,
        })
    }
}

/// Offsets of the Moore neighborhood, excluding the center
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Number of alive cells among the 8 around `coord`, in `0..=8`
///
/// On a toroidal grid narrower than 3 cells the same cell can be reached
/// through more than one offset; each offset is counted.
///
/// # Panics
/// If `coord` lies outside the grid
pub fn count_live_neighbors(grid: &Grid, coord: Coord, boundary: Boundary) -> u8 {
    let dims = grid.dims();
    assert!(dims.contains(coord), "{coord:?} out of bounds for {dims:?}");

    NEIGHBORHOOD
        .iter()
        .filter_map(|&(dr, dc)| boundary.neighbor(dims, coord, dr, dc))
        .filter(|&n| grid.is_alive(n))
        .count() as u8
}

/// Computes the successor of `grid`
///
/// Only reads `grid`; the result is a wholly new grid of the same size.
pub fn next_generation(grid: &Grid, boundary: Boundary) -> Grid {
    let rules = index::get_rule_index();
    Grid::from_fn(grid.dims(), |coord| {
        let alive = grid.is_alive(coord);
        let neighbors = count_live_neighbors(grid, coord, boundary);
        Cell::from(rules[usize::from(alive)][neighbors as usize])
    })
}

#[derive(Debug, Clone)]
pub struct GameOfLife {
    grid: Grid,
    boundary: Boundary,
    generation: u64,
}

impl GameOfLife {
    #[inline]
    pub fn new(grid: Grid, boundary: Boundary) -> Self {
        Self {
            grid,
            boundary,
            generation: 0,
        }
    }

    pub fn random<R: Rng>(dims: Dims, alive_probability: f64, boundary: Boundary, rng: &mut R) -> Self {
        Self::new(Grid::random(dims, alive_probability, rng), boundary)
    }

    pub fn next_generation(&mut self) {
        let next = next_generation(&self.grid, self.boundary);
        debug_assert_eq!(next.dims(), self.grid.dims(), "dimensions changed");
        self.grid = next;
        self.generation += 1;
    }

    /// Flips one cell in place, outside the generation cadence
    pub fn toggle(&mut self, coord: Coord) {
        self.grid.toggle(coord);
    }

    /// Replaces the grid with a fresh random seed and restarts the count
    pub fn reseed<R: Rng>(&mut self, alive_probability: f64, rng: &mut R) {
        self.grid = Grid::random(self.grid.dims(), alive_probability, rng);
        self.generation = 0;
    }

    pub fn window(&self, top_left: Coord, dims: Dims) -> GridWindow<'_> {
        GridWindow::new(&self.grid, top_left, dims)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    #[inline]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn alive_count(&self) -> usize {
        self.grid.alive_count()
    }
}
