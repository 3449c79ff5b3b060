//! MathDoku puzzles

pub use self::cage::{Cage, Operator};
pub use self::cell::Cell;
pub use self::grid::Grid;

mod cage;
mod cell;
mod definition;
mod grid;

use crate::collections::square::Square;

pub type CageId = usize;
pub type CellId = usize;
pub type Value = i32;
pub type Solution = Square<Value>;
