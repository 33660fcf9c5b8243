//! Core library for Conway's Game of Life on a fixed-size grid.
//!
//! Coordinates are `(row, col)`, row-major. A drawing surface maps its `x`
//! axis to `col` and its `y` axis to `row`.

pub mod engine;
pub mod error;
pub mod grid;
pub mod pos;
pub mod runner;

pub use engine::{Boundary, GameOfLife, GridWindow};
pub use error::{Error, Result};
pub use grid::{Cell, Grid};
pub use pos::{Coord, Dims};
pub use runner::{CellSize, Controls, RunState, Runner, RunnerConfig};
