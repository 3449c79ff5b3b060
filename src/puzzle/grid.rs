use std::fmt;
use std::fmt::Display;

use crate::collections::square::{Coord, Square};
use crate::error::InvalidGrid;
use crate::generate::GeneratingParameters;
use crate::puzzle::definition::definition;
use crate::puzzle::{Cage, CageId, Cell, CellId, Solution};

/// A generated MathDoku grid
///
/// The grid owns its cells and cages; cells and cages refer to each other
/// by index only. A grid is immutable once built.
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    cages: Vec<Cage>,
    cage_map: Square<CageId>,
    parameters: GeneratingParameters,
}

impl Grid {
    /// Creates a grid from a complete set of cells and cages
    pub fn new(
        size: usize,
        cells: Vec<Cell>,
        cages: Vec<Cage>,
        parameters: GeneratingParameters,
    ) -> Result<Self, InvalidGrid> {
        let cage_map = cage_map(size, &cells, &cages)?;
        Ok(Self {
            size,
            cells,
            cages,
            cage_map,
            parameters,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size.pow(2)
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cage(&self, id: CageId) -> &Cage {
        &self.cages[id]
    }

    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    /// A square of values where each value is the index of the cage
    /// containing that position
    pub fn cage_map(&self) -> &Square<CageId> {
        &self.cage_map
    }

    pub fn generating_parameters(&self) -> &GeneratingParameters {
        &self.parameters
    }

    /// The solution matrix of the grid
    pub fn solution(&self) -> Solution {
        let mut solution = Square::with_width_and_value(self.size, 0);
        for cell in &self.cells {
            solution[cell.id()] = cell.correct_value();
        }
        solution
    }

    /// The canonical definition string of the grid, used to detect
    /// duplicate puzzles
    pub fn definition(&self) -> String {
        definition(&self.cells, &self.cages, &self.parameters)
    }
}

fn cage_map(size: usize, cells: &[Cell], cages: &[Cage]) -> Result<Square<CageId>, InvalidGrid> {
    if cells.len() != size.pow(2) {
        return Err(InvalidGrid::new(format!(
            "expected {} cells, found {}",
            size.pow(2),
            cells.len()
        )));
    }
    let mut cage_map = Square::with_width_and_value(size, usize::max_value());
    for (i, cage) in cages.iter().enumerate() {
        for &j in cage.cell_ids() {
            if j >= cells.len() {
                return Err(InvalidGrid::new(format!("cell id {} out of bounds", j)));
            }
            if cage_map[j] != usize::max_value() {
                return Err(InvalidGrid::new(format!(
                    "cell {} is in more than one cage",
                    j
                )));
            }
            cage_map[j] = i;
        }
    }
    for (j, cell) in cells.iter().enumerate() {
        if cage_map[j] == usize::max_value() {
            return Err(InvalidGrid::new(format!("cell {} is not in any cage", j)));
        }
        if cage_map[j] != cell.cage_id() {
            return Err(InvalidGrid::new(format!(
                "cell {} disagrees with its cage about membership",
                j
            )));
        }
    }
    Ok(cage_map)
}

/// Renders the cage membership of each cell as a letter grid
impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.size)?;
        for row in 0..self.size {
            for col in 0..self.size {
                let byte = b'A' + self.cage_map[Coord::new(col, row)] as u8;
                write!(f, "{}", byte as char)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
