use std::fmt::Write;

use crate::generate::GeneratingParameters;
use crate::puzzle::{Cage, CageId, Cell, Operator};

/// Builds the canonical definition string of a grid.
///
/// The definition only holds the information needed to rebuild the puzzle,
/// so two identical puzzles generated with different seeds map to the same
/// string. Cage ids are renumbered in order of first appearance over the
/// cells so that grids differing only in cage numbering compare equal.
pub(crate) fn definition(
    cells: &[Cell],
    cages: &[Cage],
    parameters: &GeneratingParameters,
) -> String {
    let cage_id_mapping = cage_id_mapping(cells);
    let mut definition = parameters.complexity.id().to_string();
    definition.push(':');
    for cell in cells {
        let new_id = new_cage_id(&cage_id_mapping, cell.cage_id());
        write!(definition, "{:02}", new_id).unwrap();
    }
    for &cage_id in &cage_id_mapping {
        let cage = &cages[cage_id];
        let operator = if cage.hide_operator() {
            Operator::Nop
        } else {
            cage.operator()
        };
        write!(
            definition,
            ":{},{},{}",
            new_cage_id(&cage_id_mapping, cage_id),
            cage.result(),
            operator.id()
        )
        .unwrap();
    }
    definition
}

fn cage_id_mapping(cells: &[Cell]) -> Vec<CageId> {
    let mut mapping = Vec::new();
    for cell in cells {
        if !mapping.contains(&cell.cage_id()) {
            mapping.push(cell.cage_id());
        }
    }
    mapping
}

fn new_cage_id(mapping: &[CageId], old_cage_id: CageId) -> usize {
    mapping.iter().position(|&id| id == old_cage_id).unwrap()
}

#[cfg(test)]
mod tests {
    use super::definition;
    use crate::generate::{Complexity, GeneratingParameters};
    use crate::puzzle::{Cage, Cell, Operator};

    fn cells_for(cages: &[Cage], size: usize, values: &[i32]) -> Vec<Cell> {
        (0..size * size)
            .map(|id| {
                let cage_id = cages
                    .iter()
                    .position(|cage| cage.cell_ids().contains(&id))
                    .unwrap();
                Cell::new(id, values[id], cage_id)
            })
            .collect()
    }

    #[test]
    fn cage_ids_renumbered_by_first_appearance() {
        // cage 1 covers the top-left cell, so it becomes cage 0
        let cages = vec![
            Cage::new(vec![3], Operator::Nop, 2, false).unwrap(),
            Cage::new(vec![0, 1], Operator::Add, 3, false).unwrap(),
            Cage::new(vec![2], Operator::Nop, 2, false).unwrap(),
        ];
        let cells = cells_for(&cages, 2, &[1, 2, 2, 2]);
        let parameters = GeneratingParameters::new(3, Complexity::Normal, false, 0);
        assert_eq!("3:00000102:0,3,1:1,2,0:2,2,0", definition(&cells, &cages, &parameters));
    }

    #[test]
    fn hidden_operators_are_masked() {
        let cages = vec![
            Cage::new(vec![0, 1], Operator::Add, 3, true).unwrap(),
            Cage::new(vec![2, 3], Operator::Subtract, 1, true).unwrap(),
        ];
        let cells = cells_for(&cages, 2, &[1, 2, 2, 1]);
        let parameters = GeneratingParameters::new(3, Complexity::Easy, true, 0);
        assert_eq!("2:00000101:0,3,0:1,1,0", definition(&cells, &cages, &parameters));
    }
}
