use itertools::Itertools;

use crate::collections::square::Coord;
use crate::puzzle::{Operator, Value};

/// Enumerates the value permutations satisfying one cage
///
/// A permutation assigns one value to each cage cell, in cell order. Two
/// cells of the cage sharing a row or column must not hold the same value;
/// cells of other cages are not considered here.
pub struct ComboGenerator<'a> {
    grid_size: usize,
    coords: &'a [Coord],
}

impl<'a> ComboGenerator<'a> {
    pub fn new(grid_size: usize, coords: &'a [Coord]) -> Self {
        Self { grid_size, coords }
    }

    pub fn combos(&self, operator: Operator, result: Value, hide_operator: bool) -> Vec<Vec<Value>> {
        if self.coords.len() == 1 {
            return vec![vec![result]];
        }
        if hide_operator {
            return self.hidden_combos(result);
        }
        match operator {
            Operator::Add => self.add_combos(result),
            Operator::Multiply => self.multiply_combos(result),
            Operator::Subtract => {
                self.pair_combos(|a, b| (a - b).abs() == result)
            }
            Operator::Divide => self.pair_combos(|a, b| {
                (a % b == 0 && a / b == result) || (b % a == 0 && b / a == result)
            }),
            Operator::Nop => vec![vec![result]],
        }
    }

    /// Without a visible operator, any operator could produce the clue
    fn hidden_combos(&self, result: Value) -> Vec<Vec<Value>> {
        if self.coords.len() == 2 {
            return self.pair_combos(|a, b| {
                a + b == result
                    || a * b == result
                    || (a - b).abs() == result
                    || (a % b == 0 && a / b == result)
                    || (b % a == 0 && b / a == result)
            });
        }
        self.add_combos(result)
            .into_iter()
            .chain(self.multiply_combos(result))
            .unique()
            .collect()
    }

    fn pair_combos(&self, predicate: impl Fn(Value, Value) -> bool) -> Vec<Vec<Value>> {
        let mut combos = Vec::new();
        for a in 1..=self.grid_size as Value {
            for b in 1..=self.grid_size as Value {
                if predicate(a, b) && self.satisfies_constraints(&[a, b]) {
                    combos.push(vec![a, b]);
                }
            }
        }
        combos
    }

    fn add_combos(&self, result: Value) -> Vec<Vec<Value>> {
        let mut combos = Vec::new();
        self.add_next(0, result, &mut Vec::new(), &mut combos);
        combos
    }

    fn add_next(
        &self,
        index: usize,
        remaining: Value,
        acc: &mut Vec<Value>,
        combos: &mut Vec<Vec<Value>>,
    ) {
        if index == self.coords.len() {
            if remaining == 0 && self.satisfies_constraints(acc) {
                combos.push(acc.clone());
            }
            return;
        }
        // every later cell needs at least 1
        let cells_left = (self.coords.len() - index - 1) as Value;
        for n in 1..=self.grid_size as Value {
            if n > remaining - cells_left {
                break;
            }
            acc.push(n);
            self.add_next(index + 1, remaining - n, acc, combos);
            acc.pop();
        }
    }

    fn multiply_combos(&self, result: Value) -> Vec<Vec<Value>> {
        let mut combos = Vec::new();
        self.multiply_next(0, result, &mut Vec::new(), &mut combos);
        combos
    }

    fn multiply_next(
        &self,
        index: usize,
        remaining: Value,
        acc: &mut Vec<Value>,
        combos: &mut Vec<Vec<Value>>,
    ) {
        if index == self.coords.len() {
            if remaining == 1 && self.satisfies_constraints(acc) {
                combos.push(acc.clone());
            }
            return;
        }
        for n in 1..=self.grid_size as Value {
            if remaining % n != 0 {
                continue;
            }
            acc.push(n);
            self.multiply_next(index + 1, remaining / n, acc, combos);
            acc.pop();
        }
    }

    fn satisfies_constraints(&self, values: &[Value]) -> bool {
        for i in 0..values.len() {
            for j in i + 1..values.len() {
                if values[i] == values[j]
                    && (self.coords[i].row() == self.coords[j].row()
                        || self.coords[i].col() == self.coords[j].col())
                {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::ComboGenerator;
    use crate::collections::square::Coord;
    use crate::puzzle::Operator;

    #[test]
    fn subtract_pairs() {
        let coords = [Coord::new(0, 0), Coord::new(1, 0)];
        let combos = ComboGenerator::new(4, &coords).combos(Operator::Subtract, 2, false);
        assert_eq!(vec![vec![1, 3], vec![2, 4], vec![3, 1], vec![4, 2]], combos);
    }

    #[test]
    fn divide_pairs_must_divide_evenly() {
        let coords = [Coord::new(0, 0), Coord::new(0, 1)];
        let combos = ComboGenerator::new(6, &coords).combos(Operator::Divide, 3, false);
        assert_eq!(vec![vec![1, 3], vec![2, 6], vec![3, 1], vec![6, 2]], combos);
    }

    #[test]
    fn single_cell_has_one_combo() {
        let coords = [Coord::new(2, 2)];
        let combos = ComboGenerator::new(4, &coords).combos(Operator::Nop, 3, false);
        assert_eq!(vec![vec![3]], combos);
    }

    #[test]
    fn add_combos_in_a_row_exclude_repeats() {
        let coords = [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)];
        let combos = ComboGenerator::new(4, &coords).combos(Operator::Add, 6, false);
        assert!(combos.iter().all(|c| c[0] != c[1] && c[1] != c[2] && c[0] != c[2]));
        assert_eq!(6, combos.len());
    }

    #[test]
    fn l_shaped_cage_allows_repeat_on_the_diagonal() {
        // cells (0,0) and (1,1) share neither row nor column
        let coords = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)];
        let combos = ComboGenerator::new(4, &coords).combos(Operator::Add, 6, false);
        assert!(!combos.contains(&vec![2, 2, 2]));
        assert!(combos.contains(&vec![1, 4, 1]));
    }

    #[test]
    fn hidden_pair_admits_every_operator() {
        let coords = [Coord::new(0, 0), Coord::new(1, 0)];
        let combos = ComboGenerator::new(4, &coords).combos(Operator::Add, 4, true);
        // 1+3, 3+1 (add); 1*4, 4*1, 2*2 out by constraint (multiply); none subtract; 4/1 (divide)
        assert!(combos.contains(&vec![1, 3]));
        assert!(combos.contains(&vec![1, 4]));
        assert!(combos.contains(&vec![4, 1]));
        assert!(!combos.contains(&vec![2, 2]));
    }
}
