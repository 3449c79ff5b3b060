pub use self::operator::Operator;

mod operator;

use once_cell::sync::OnceCell;

use crate::collections::square::{IsSquare, UnitSquare};
use crate::error::InvalidGrid;
use crate::generate::ComboGenerator;
use crate::puzzle::{CellId, Value};

/// A cage in a MathDoku puzzle
///
/// Every cell in a puzzle belongs to exactly one cage.
/// Every multi-cell cage has an operator and a result; applying the operator
/// to the correct values of the cage's cells yields the result.
#[derive(Debug)]
pub struct Cage {
    /// The ids of the cells in this cage, in placement order
    cell_ids: Vec<CellId>,

    /// The math operator that must be used with the numbers in the cage
    /// to produce the result
    operator: Operator,

    /// The number that must be produced using the numbers in this cage
    result: Value,

    /// Whether the clue shown for this cage omits the operator
    hide_operator: bool,

    /// All value permutations satisfying the cage, computed on first use
    combos: OnceCell<Vec<Vec<Value>>>,
}

impl Cage {
    pub fn new(
        cell_ids: Vec<CellId>,
        operator: Operator,
        result: Value,
        hide_operator: bool,
    ) -> Result<Self, InvalidGrid> {
        let cage = Cage {
            cell_ids,
            operator,
            result,
            hide_operator,
            combos: OnceCell::new(),
        };
        validate(&cage)?;
        Ok(cage)
    }

    /// The number on the cage
    pub fn result(&self) -> Value {
        self.result
    }

    /// The math operator on the cage
    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn hide_operator(&self) -> bool {
        self.hide_operator
    }

    /// The ids of the cells in the cage
    pub fn cell_ids(&self) -> &[CellId] {
        &self.cell_ids
    }

    pub fn cell_count(&self) -> usize {
        self.cell_ids.len()
    }

    /// All permutations of values which satisfy this cage in a grid of the
    /// given size. The values of each permutation correspond to the cells
    /// in `cell_ids` order. Cached after the first call.
    pub fn possible_combos(&self, grid_size: usize) -> &[Vec<Value>] {
        self.combos.get_or_init(|| {
            let square = UnitSquare::new(grid_size);
            let coords = self
                .cell_ids
                .iter()
                .map(|&id| square.coord_at(id))
                .collect::<Vec<_>>();
            ComboGenerator::new(grid_size, &coords).combos(
                self.operator,
                self.result,
                self.hide_operator,
            )
        })
    }
}

fn validate(cage: &Cage) -> Result<(), InvalidGrid> {
    match cage.cell_ids().len() {
        0 => return Err(InvalidGrid::new("cage cell_ids must not be empty".into())),
        1 => match cage.operator {
            Operator::Nop => (),
            operator => {
                return Err(InvalidGrid::new(format!(
                    "cage operator ({}) must have more than one cell",
                    operator.symbol().unwrap()
                )))
            }
        },
        _ => {
            if cage.operator == Operator::Nop {
                return Err(InvalidGrid::new(
                    "cage with multiple cells must have an operator".into(),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cage, Operator};

    #[test]
    fn single_cell_cage_must_have_no_operator() {
        assert!(Cage::new(vec![0], Operator::Add, 3, false).is_err());
        assert!(Cage::new(vec![0], Operator::Nop, 3, false).is_ok());
    }

    #[test]
    fn multi_cell_cage_must_have_operator() {
        assert!(Cage::new(vec![0, 1], Operator::Nop, 3, false).is_err());
        assert!(Cage::new(vec![0, 1], Operator::Add, 3, false).is_ok());
    }

    #[test]
    fn empty_cage_is_invalid() {
        assert!(Cage::new(vec![], Operator::Nop, 0, false).is_err());
    }
}
