use rand::rngs::StdRng;
use rand::Rng;

use crate::collections::square::{Coord, Square};
use crate::puzzle::{Solution, Value};

/// Fills a grid with a random Latin square of the values `1..=size`.
///
/// Values are placed one at a time, a full row-set per value. Each row gets
/// a limited number of random column draws; when a value cannot be placed in
/// some row, every placement of that value is wiped and the value starts
/// over. The procedure always terminates because a value that occupies one
/// cell per row and column always leaves a completion for itself.
pub(crate) fn fill_solution(size: usize, rng: &mut StdRng) -> Solution {
    let mut solution = Square::with_width_and_value(size, 0);
    for value in 1..=size as Value {
        let mut row = 0;
        while row < size {
            match random_open_column(&solution, size, value, row, rng) {
                Some(col) => {
                    solution[Coord::new(col, row)] = value;
                    row += 1;
                }
                None => {
                    clear_value(&mut solution, value);
                    row = 0;
                }
            }
        }
    }
    solution
}

/// Draws random columns for `value` in `row` until one fits or the
/// attempt budget runs out
fn random_open_column(
    solution: &Solution,
    size: usize,
    value: Value,
    row: usize,
    rng: &mut StdRng,
) -> Option<usize> {
    let mut attempts = 20;
    loop {
        let col = rng.gen_range(0, size);
        attempts -= 1;
        if attempts == 0 {
            return None;
        }
        if solution[Coord::new(col, row)] != 0 {
            continue;
        }
        if (0..size).any(|r| solution[Coord::new(col, r)] == value) {
            continue;
        }
        return Some(col);
    }
}

fn clear_value(solution: &mut Solution, value: Value) {
    for v in solution.iter_mut() {
        if *v == value {
            *v = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::fill_solution;
    use crate::collections::square::Coord;

    #[test]
    fn fills_a_latin_square() {
        for size in 3..=9 {
            let mut rng = StdRng::seed_from_u64(size as u64);
            let solution = fill_solution(size, &mut rng);
            for row in 0..size {
                for col in 0..size {
                    let value = solution[Coord::new(col, row)];
                    assert!(value >= 1 && value <= size as i32);
                    for other in 0..size {
                        if other != col {
                            assert_ne!(value, solution[Coord::new(other, row)]);
                        }
                        if other != row {
                            assert_ne!(value, solution[Coord::new(col, other)]);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_fills_the_same_square() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(*fill_solution(5, &mut a), *fill_solution(5, &mut b));
    }
}
