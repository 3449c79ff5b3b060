//! Checks whether a grid admits exactly one solution.

pub use self::search::BacktrackingSolver;

mod search;

use crate::puzzle::Cage;

/// Decides whether a set of cages over a grid admits exactly one solution
///
/// The generator rejects grids with multiple solutions, so anything
/// implementing this trait gates what it emits.
pub trait UniquenessSolver {
    fn has_unique_solution(&self, grid_size: usize, cages: &[Cage]) -> bool;
}
