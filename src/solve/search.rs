use crate::puzzle::Cage;
use crate::solve::UniquenessSolver;

/// Counts solutions by backtracking over cage permutations
///
/// Cages with few permutations are tried first, which keeps the search
/// shallow where it branches the most.
pub struct BacktrackingSolver;

impl UniquenessSolver for BacktrackingSolver {
    fn has_unique_solution(&self, grid_size: usize, cages: &[Cage]) -> bool {
        count_solutions(grid_size, cages, 2) == 1
    }
}

/// Counts solutions, stopping as soon as `limit` are found
pub(crate) fn count_solutions(grid_size: usize, cages: &[Cage], limit: usize) -> usize {
    let mut order: Vec<usize> = (0..cages.len()).collect();
    order.sort_by_key(|&i| cages[i].possible_combos(grid_size).len());
    let mut search = Search {
        grid_size,
        cages,
        order,
        row_used: vec![0; grid_size],
        col_used: vec![0; grid_size],
        limit,
        count: 0,
    };
    search.next_cage(0);
    search.count
}

struct Search<'a> {
    grid_size: usize,
    cages: &'a [Cage],
    order: Vec<usize>,
    /// Bitmask of values placed in each row
    row_used: Vec<u32>,
    /// Bitmask of values placed in each column
    col_used: Vec<u32>,
    limit: usize,
    count: usize,
}

impl Search<'_> {
    fn next_cage(&mut self, depth: usize) {
        if self.count >= self.limit {
            return;
        }
        if depth == self.order.len() {
            self.count += 1;
            return;
        }
        let cage = &self.cages[self.order[depth]];
        let combos = cage.possible_combos(self.grid_size);
        for combo in combos {
            if self.try_combo(cage, combo) {
                self.next_cage(depth + 1);
                self.undo_combo(cage, combo);
            }
        }
    }

    /// Applies a permutation if it does not collide with values already
    /// placed in the same rows and columns
    fn try_combo(&mut self, cage: &Cage, combo: &[i32]) -> bool {
        for (&id, &value) in cage.cell_ids().iter().zip(combo) {
            let bit = 1 << value;
            if self.row_used[id / self.grid_size] & bit != 0
                || self.col_used[id % self.grid_size] & bit != 0
            {
                return false;
            }
        }
        for (&id, &value) in cage.cell_ids().iter().zip(combo) {
            let bit = 1 << value;
            self.row_used[id / self.grid_size] |= bit;
            self.col_used[id % self.grid_size] |= bit;
        }
        true
    }

    fn undo_combo(&mut self, cage: &Cage, combo: &[i32]) {
        for (&id, &value) in cage.cell_ids().iter().zip(combo) {
            let bit = 1 << value;
            self.row_used[id / self.grid_size] &= !bit;
            self.col_used[id % self.grid_size] &= !bit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::count_solutions;
    use crate::puzzle::{Cage, Operator};
    use crate::solve::{BacktrackingSolver, UniquenessSolver};

    #[test]
    fn pinned_corner_makes_a_two_by_two_unique() {
        let cages = vec![
            Cage::new(vec![0], Operator::Nop, 1, false).unwrap(),
            Cage::new(vec![1, 2, 3], Operator::Add, 5, false).unwrap(),
        ];
        assert_eq!(1, count_solutions(2, &cages, 2));
        assert!(BacktrackingSolver.has_unique_solution(2, &cages));
    }

    #[test]
    fn symmetric_cage_admits_both_latin_squares() {
        let cages = vec![Cage::new(vec![0, 1, 2, 3], Operator::Add, 6, false).unwrap()];
        assert_eq!(2, count_solutions(2, &cages, 2));
        assert!(!BacktrackingSolver.has_unique_solution(2, &cages));
    }

    #[test]
    fn limit_stops_the_search_early() {
        let cages = vec![Cage::new(vec![0, 1, 2, 3], Operator::Add, 6, false).unwrap()];
        assert_eq!(1, count_solutions(2, &cages, 1));
    }

    #[test]
    fn all_singles_are_unique() {
        let cages = (0..9)
            .map(|id| {
                let value = 1 + (id % 3 + id / 3) as i32 % 3;
                Cage::new(vec![id], Operator::Nop, value, false).unwrap()
            })
            .collect::<Vec<_>>();
        assert!(BacktrackingSolver.has_unique_solution(3, &cages));
    }
}
