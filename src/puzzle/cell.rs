use crate::puzzle::{CageId, CellId, Value};

/// A single cell of a grid
///
/// The correct value is the value the cell holds in the generated solution,
/// not a value entered by a player.
#[derive(Clone, Debug)]
pub struct Cell {
    id: CellId,
    correct_value: Value,
    cage_id: CageId,
}

impl Cell {
    pub fn new(id: CellId, correct_value: Value, cage_id: CageId) -> Self {
        Self {
            id,
            correct_value,
            cage_id,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn correct_value(&self) -> Value {
        self.correct_value
    }

    pub fn cage_id(&self) -> CageId {
        self.cage_id
    }
}
