use itertools::Itertools;
use rand::rngs::StdRng;
use rand::Rng;

use crate::generate::GeneratingParameters;
use crate::puzzle::{Operator, Value};

/// Relative likelihood of each operator for one cage
///
/// Two-cell cages favor division when the values divide evenly, otherwise
/// subtraction. Larger cages only ever use addition or multiplication.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OperatorWeights {
    divide: u32,
    subtract: u32,
    multiply: u32,
    add: u32,
}

impl OperatorWeights {
    pub fn for_values(values: &[Value]) -> Self {
        debug_assert!(values.len() > 1);
        if values.len() == 2 {
            let (min, max) = min_max(values);
            Self {
                divide: if max % min == 0 { 50 } else { 0 },
                subtract: 30,
                multiply: 15,
                add: 15,
            }
        } else {
            Self {
                divide: 0,
                subtract: 0,
                multiply: 50,
                add: 50,
            }
        }
    }

    fn total(&self) -> u32 {
        self.divide + self.subtract + self.multiply + self.add
    }
}

/// Picks an operator for a cage holding the given values
pub(crate) fn assign_operator(
    values: &[Value],
    parameters: &GeneratingParameters,
    rng: &mut StdRng,
) -> Operator {
    let weights = OperatorWeights::for_values(values);
    let draw = rng.gen_range(0, weights.total());
    pick_operator(values, parameters.max_cage_result, &weights, draw)
}

/// Maps a uniform draw in `[0, total)` to an operator
///
/// The bands are laid out in the order divide, subtract, multiply, add.
/// A multiplication whose product exceeds `max_cage_result` degrades to
/// addition.
pub(crate) fn pick_operator(
    values: &[Value],
    max_cage_result: Value,
    weights: &OperatorWeights,
    draw: u32,
) -> Operator {
    let mut bound = weights.divide;
    if draw < bound {
        return Operator::Divide;
    }
    bound += weights.subtract;
    if draw < bound {
        return Operator::Subtract;
    }
    bound += weights.multiply;
    if draw < bound && cage_result(Operator::Multiply, values) <= max_cage_result {
        return Operator::Multiply;
    }
    Operator::Add
}

/// The clue number produced by applying the operator to the values
pub(crate) fn cage_result(operator: Operator, values: &[Value]) -> Value {
    match operator {
        Operator::Add => values.iter().sum(),
        Operator::Multiply => values.iter().product(),
        Operator::Subtract => {
            let (min, max) = min_max(values);
            max - min
        }
        Operator::Divide => {
            let (min, max) = min_max(values);
            max / min
        }
        Operator::Nop => values[0],
    }
}

fn min_max(values: &[Value]) -> (Value, Value) {
    values.iter().copied().minmax().into_option().unwrap()
}

#[cfg(test)]
mod tests {
    use super::{cage_result, pick_operator, OperatorWeights};
    use crate::puzzle::Operator;

    #[test]
    fn two_cell_weight_bands() {
        let values = [2, 4];
        let weights = OperatorWeights::for_values(&values);
        assert_eq!(110, weights.total());
        assert_eq!(Operator::Divide, pick_operator(&values, 9999, &weights, 0));
        assert_eq!(Operator::Divide, pick_operator(&values, 9999, &weights, 49));
        assert_eq!(Operator::Subtract, pick_operator(&values, 9999, &weights, 50));
        assert_eq!(Operator::Subtract, pick_operator(&values, 9999, &weights, 79));
        assert_eq!(Operator::Multiply, pick_operator(&values, 9999, &weights, 80));
        assert_eq!(Operator::Multiply, pick_operator(&values, 9999, &weights, 94));
        assert_eq!(Operator::Add, pick_operator(&values, 9999, &weights, 95));
        assert_eq!(Operator::Add, pick_operator(&values, 9999, &weights, 109));
    }

    #[test]
    fn indivisible_pair_gets_no_divide_band() {
        let weights = OperatorWeights::for_values(&[3, 4]);
        assert_eq!(60, weights.total());
        assert_eq!(Operator::Subtract, pick_operator(&[3, 4], 9999, &weights, 0));
    }

    #[test]
    fn large_cage_only_adds_or_multiplies() {
        let weights = OperatorWeights::for_values(&[1, 2, 3]);
        assert_eq!(100, weights.total());
        assert_eq!(Operator::Multiply, pick_operator(&[1, 2, 3], 9999, &weights, 0));
        assert_eq!(Operator::Add, pick_operator(&[1, 2, 3], 9999, &weights, 50));
    }

    #[test]
    fn oversized_product_degrades_to_addition() {
        let values = [8, 9, 9, 9];
        let weights = OperatorWeights::for_values(&values);
        assert_eq!(Operator::Add, pick_operator(&values, 2500, &weights, 0));
    }

    #[test]
    fn results() {
        assert_eq!(6, cage_result(Operator::Add, &[1, 2, 3]));
        assert_eq!(24, cage_result(Operator::Multiply, &[2, 3, 4]));
        assert_eq!(3, cage_result(Operator::Subtract, &[2, 5]));
        assert_eq!(3, cage_result(Operator::Divide, &[2, 6]));
        assert_eq!(7, cage_result(Operator::Nop, &[7]));
    }
}
