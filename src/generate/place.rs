use rand::rngs::StdRng;
use rand::Rng;

use crate::collections::square::Square;
use crate::generate::arithmetic::{assign_operator, cage_result};
use crate::generate::shape::{CageShape, ShapeCatalog, MAX_SHAPE_SIZE};
use crate::generate::GeneratingParameters;
use crate::puzzle::{Cage, CageId, CellId, Operator, Solution, Value};

const FIRST_CAGE_ATTEMPTS: u32 = 10;

/// The outcome of carving a solution into cages
pub(crate) enum PlaceResult {
    /// Every cell was assigned to a cage
    Placed(Vec<Cage>),

    /// Placement painted itself into a corner; the caller should refill
    /// and try again
    Restart,
}

/// Carves the grid into cages covering every cell exactly once
pub(crate) fn place_cages(
    solution: &Solution,
    parameters: &GeneratingParameters,
    rng: &mut StdRng,
) -> PlaceResult {
    CagePlacer::new(solution, parameters).place(rng)
}

struct CagePlacer<'a> {
    solution: &'a Solution,
    parameters: &'a GeneratingParameters,
    cage_map: Square<Option<CageId>>,
    cages: Vec<Cage>,
    single_cell_cages: usize,
}

impl<'a> CagePlacer<'a> {
    fn new(solution: &'a Solution, parameters: &'a GeneratingParameters) -> Self {
        Self {
            solution,
            parameters,
            cage_map: Square::with_width(parameters.grid_size),
            cages: Vec::new(),
            single_cell_cages: 0,
        }
    }

    fn place(mut self, rng: &mut StdRng) -> PlaceResult {
        self.place_first_big_cage(rng);
        while let Some(origin) = self.next_uncaged_cell() {
            if !self.place_cage_at(origin, rng) {
                return PlaceResult::Restart;
            }
        }
        PlaceResult::Placed(self.cages)
    }

    /// Seeds the grid with one maximum-size cage at a random position,
    /// but only when the parameters allow cages at least as big as the
    /// largest cataloged shape
    ///
    /// This cage alone is exempt from the permutation limit. Failing to
    /// place it is not an error, the grid just proceeds without one.
    fn place_first_big_cage(&mut self, rng: &mut StdRng) {
        let size = self.parameters.grid_size;
        if self.parameters.max_cage_size < MAX_SHAPE_SIZE {
            return;
        }
        for _ in 0..FIRST_CAGE_ATTEMPTS {
            let shape = ShapeCatalog::instance().random_shape(
                self.parameters.max_cage_size,
                Some(size),
                Some(size),
                rng,
            );
            let row = rng.gen_range(0, size) as i32;
            let col = rng.gen_range(0, size) as i32;
            if let Some(cell_ids) = self.validate_coords(&shape, row, col) {
                if let Some(cage) = self.try_create_cage(cell_ids, None, rng) {
                    self.register(cage);
                    return;
                }
            }
        }
    }

    /// Places a cage whose origin is the given cell, trying catalog shapes
    /// in random order and falling back to a single-cell cage
    ///
    /// Returns false when the single-cell quota is spent.
    fn place_cage_at(&mut self, origin: CellId, rng: &mut StdRng) -> bool {
        let catalog = ShapeCatalog::instance();
        let row = (origin / self.parameters.grid_size) as i32;
        let col = (origin % self.parameters.grid_size) as i32;
        let mut available: Vec<usize> =
            (1..catalog.catalog_size(self.parameters.max_cage_size)).collect();
        while !available.is_empty() {
            let index = available.remove(rng.gen_range(0, available.len()));
            let shape = catalog.shape_at(index);
            let cell_ids = match self.validate_coords(shape, row, col) {
                Some(cell_ids) => cell_ids,
                None => continue,
            };
            if self.has_duplicate_risk(&cell_ids) {
                continue;
            }
            if let Some(cage) =
                self.try_create_cage(cell_ids, Some(self.parameters.max_cage_permutations), rng)
            {
                self.register(cage);
                return true;
            }
        }
        if self.single_cell_cages >= self.parameters.max_single_cell_cages {
            debug!(
                "single-cell cage limit ({}) reached, restarting placement",
                self.parameters.max_single_cell_cages
            );
            return false;
        }
        let value = self.solution[origin];
        let cage = Cage::new(vec![origin], Operator::Nop, value, false).unwrap();
        self.register(cage);
        self.single_cell_cages += 1;
        true
    }

    /// Maps a shape anchored at (row, col) to cell ids, or `None` if any
    /// cell falls outside the grid or is already caged
    fn validate_coords(&self, shape: &CageShape, row: i32, col: i32) -> Option<Vec<CellId>> {
        let size = self.parameters.grid_size as i32;
        let mut cell_ids = Vec::with_capacity(shape.size());
        for (r, c) in shape.cells_at(row, col) {
            if r < 0 || r >= size || c < 0 || c >= size {
                return None;
            }
            let id = (r * size + c) as CellId;
            if self.cage_map[id].is_some() {
                return None;
            }
            cell_ids.push(id);
        }
        Some(cell_ids)
    }

    /// A new cage must not form a swappable subset with any existing cage:
    /// if the candidate's cells in one column and another cage's cells in a
    /// different column occupy the same rows and the two columns hold more
    /// than one value in common there, those values can be swapped between
    /// the columns without breaking either clue, giving a second solution.
    /// The same applies with rows and columns exchanged.
    fn has_duplicate_risk(&self, cell_ids: &[CellId]) -> bool {
        self.has_swappable_subset(cell_ids, false) || self.has_swappable_subset(cell_ids, true)
    }

    /// One direction of the duplicate-risk check; `by_rows` transposes it
    fn has_swappable_subset(&self, cell_ids: &[CellId], by_rows: bool) -> bool {
        let size = self.parameters.grid_size;
        let id_at = |line: usize, pos: usize| -> CellId {
            if by_rows {
                line * size + pos
            } else {
                pos * size + line
            }
        };
        let line_of = |id: CellId| if by_rows { id / size } else { id % size };
        for source_line in 0..size {
            let positions: Vec<usize> = cell_ids
                .iter()
                .filter(|&&id| line_of(id) == source_line)
                .map(|&id| if by_rows { id % size } else { id / size })
                .collect();
            if positions.len() < 2 {
                continue;
            }
            for target_line in (0..size).filter(|&line| line != source_line) {
                let mut checked: Vec<CageId> = Vec::new();
                for &pos in &positions {
                    let other_cage = match self.cage_map[id_at(target_line, pos)] {
                        Some(id) if !checked.contains(&id) => id,
                        _ => continue,
                    };
                    checked.push(other_cage);
                    // count each value seen in the overlapping positions of
                    // either line; two hits means both lines hold it
                    let mut counts = vec![0u32; size + 1];
                    for &p in &positions {
                        if self.cage_map[id_at(target_line, p)] == Some(other_cage) {
                            counts[self.solution[id_at(source_line, p)] as usize] += 1;
                            counts[self.solution[id_at(target_line, p)] as usize] += 1;
                        }
                    }
                    if counts.iter().filter(|&&n| n > 1).count() > 1 {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Builds a cage over the given cells, or `None` when the cage would
    /// admit more permutations than allowed
    fn try_create_cage(
        &self,
        cell_ids: Vec<CellId>,
        max_permutations: Option<usize>,
        rng: &mut StdRng,
    ) -> Option<Cage> {
        let values: Vec<Value> = cell_ids.iter().map(|&id| self.solution[id]).collect();
        let operator = assign_operator(&values, self.parameters, rng);
        let result = cage_result(operator, &values);
        let hide_operator = self.parameters.hide_operators;
        let cage = Cage::new(cell_ids, operator, result, hide_operator).unwrap();
        if let Some(max) = max_permutations {
            if cage.possible_combos(self.parameters.grid_size).len() > max {
                return None;
            }
        }
        Some(cage)
    }

    fn register(&mut self, cage: Cage) {
        let id = self.cages.len();
        for &cell_id in cage.cell_ids() {
            self.cage_map[cell_id] = Some(id);
        }
        self.cages.push(cage);
    }

    fn next_uncaged_cell(&self) -> Option<CellId> {
        self.cage_map.iter().position(|cage| cage.is_none())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{place_cages, CagePlacer, PlaceResult};
    use crate::collections::square::Square;
    use crate::generate::fill::fill_solution;
    use crate::generate::{Complexity, GeneratingParameters};
    use crate::puzzle::{Cage, Operator, Solution};

    fn latin_square_4() -> Solution {
        let values = [1, 2, 3, 4, 2, 1, 4, 3, 3, 4, 1, 2, 4, 3, 2, 1];
        let mut solution = Square::with_width_and_value(4, 0);
        for (i, &value) in values.iter().enumerate() {
            solution[i] = value;
        }
        solution
    }

    #[test]
    fn places_a_full_partition() {
        let parameters = GeneratingParameters::new(5, Complexity::Normal, false, 0);
        let mut rng = StdRng::seed_from_u64(3);
        let solution = fill_solution(5, &mut rng);
        let mut attempts = 0;
        loop {
            match place_cages(&solution, &parameters, &mut rng) {
                PlaceResult::Placed(cages) => {
                    let mut covered = vec![0; 25];
                    for cage in &cages {
                        assert!(cage.cell_count() <= parameters.max_cage_size);
                        for &id in cage.cell_ids() {
                            covered[id] += 1;
                        }
                    }
                    assert!(covered.iter().all(|&n| n == 1));
                    break;
                }
                PlaceResult::Restart => {
                    attempts += 1;
                    assert!(attempts < 100);
                }
            }
        }
    }

    #[test]
    fn rejects_candidate_allowing_a_column_swap() {
        // cage over column 0, rows 0-1 holds {1, 2}; a candidate over
        // column 1, rows 0-1 holds {2, 1} - the columns could swap those
        // values without breaking either clue
        let parameters = GeneratingParameters::new(4, Complexity::Normal, false, 0);
        let solution = latin_square_4();
        let mut placer = CagePlacer::new(&solution, &parameters);
        placer.register(Cage::new(vec![0, 4], Operator::Subtract, 1, false).unwrap());
        assert!(placer.has_duplicate_risk(&[1, 5]));
    }

    #[test]
    fn rejects_candidate_allowing_a_row_swap() {
        let parameters = GeneratingParameters::new(4, Complexity::Normal, false, 0);
        let solution = latin_square_4();
        let mut placer = CagePlacer::new(&solution, &parameters);
        placer.register(Cage::new(vec![0, 1], Operator::Subtract, 1, false).unwrap());
        assert!(placer.has_duplicate_risk(&[4, 5]));
    }

    #[test]
    fn accepts_candidate_sharing_at_most_one_value() {
        // column 2, rows 0-1 holds {3, 4}, disjoint from the cage's {1, 2}
        let parameters = GeneratingParameters::new(4, Complexity::Normal, false, 0);
        let solution = latin_square_4();
        let mut placer = CagePlacer::new(&solution, &parameters);
        placer.register(Cage::new(vec![0, 4], Operator::Subtract, 1, false).unwrap());
        assert!(!placer.has_duplicate_risk(&[2, 6]));
    }

    #[test]
    fn single_cell_quota_forces_a_restart() {
        let mut parameters = GeneratingParameters::new(4, Complexity::VeryEasy, false, 0);
        parameters.max_cage_size = 1;
        let mut rng = StdRng::seed_from_u64(0);
        let solution = fill_solution(4, &mut rng);
        match place_cages(&solution, &parameters, &mut rng) {
            PlaceResult::Restart => (),
            PlaceResult::Placed(_) => panic!("expected a restart"),
        }
    }
}
