use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use crate::puzzle::Value;

/// Bumped whenever a change to the generator makes previously stored
/// definition strings incomparable with new ones
pub const GENERATOR_VERSION: u32 = 2;

/// How hard the generated puzzle should be to solve
///
/// The complexity bounds the size of cages, the magnitude of cage results
/// and the number of value permutations a single cage may admit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Complexity {
    VeryEasy,
    Easy,
    Normal,
    Difficult,
    VeryDifficult,
}

impl Complexity {
    /// A stable numeric id, used in grid definition strings
    pub fn id(self) -> u32 {
        match self {
            Complexity::VeryEasy => 1,
            Complexity::Easy => 2,
            Complexity::Normal => 3,
            Complexity::Difficult => 4,
            Complexity::VeryDifficult => 5,
        }
    }

    /// (max cage size, max cage result, max cage permutations)
    fn tier(self) -> (usize, Value, usize) {
        match self {
            Complexity::VeryEasy => (2, 72, 20),
            Complexity::Easy => (3, 648, 20),
            Complexity::Normal => (4, 2500, 40),
            Complexity::Difficult => (5, 9999, 80),
            Complexity::VeryDifficult => (6, 99999, 120),
        }
    }
}

impl Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Complexity::VeryEasy => "very-easy",
            Complexity::Easy => "easy",
            Complexity::Normal => "normal",
            Complexity::Difficult => "difficult",
            Complexity::VeryDifficult => "very-difficult",
        };
        f.write_str(s)
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let complexity = match s {
            "very-easy" => Complexity::VeryEasy,
            "easy" => Complexity::Easy,
            "normal" => Complexity::Normal,
            "difficult" => Complexity::Difficult,
            "very-difficult" => Complexity::VeryDifficult,
            _ => return Err(format!("invalid complexity: {}", s)),
        };
        Ok(complexity)
    }
}

/// Everything the generator needs to know to produce one grid
///
/// The tier-derived limits are stored rather than recomputed so that a grid
/// records the exact parameters it was generated with.
#[derive(Clone, Debug)]
pub struct GeneratingParameters {
    pub grid_size: usize,
    pub complexity: Complexity,
    pub hide_operators: bool,
    pub seed: u64,
    pub generator_version: u32,

    /// The maximum number of cells in one cage
    pub max_cage_size: usize,

    /// The maximum result of a cage, mainly bounding multiplication cages
    pub max_cage_result: Value,

    /// A cage admitting more value permutations than this is rejected
    pub max_cage_permutations: usize,

    /// The maximum number of single-cell cages in one grid
    pub max_single_cell_cages: usize,
}

impl GeneratingParameters {
    pub fn new(grid_size: usize, complexity: Complexity, hide_operators: bool, seed: u64) -> Self {
        let (max_cage_size, max_cage_result, max_cage_permutations) = complexity.tier();
        Self {
            grid_size,
            complexity,
            hide_operators,
            seed,
            generator_version: GENERATOR_VERSION,
            max_cage_size: max_cage_size.min(grid_size.pow(2)),
            max_cage_result,
            max_cage_permutations,
            max_single_cell_cages: 2.max(grid_size / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Complexity, GeneratingParameters};

    #[test]
    fn tier_limits() {
        let parameters = GeneratingParameters::new(6, Complexity::Normal, false, 0);
        assert_eq!(4, parameters.max_cage_size);
        assert_eq!(2500, parameters.max_cage_result);
        assert_eq!(40, parameters.max_cage_permutations);
        assert_eq!(3, parameters.max_single_cell_cages);
    }

    #[test]
    fn small_grids_keep_at_least_two_single_cell_cages() {
        let parameters = GeneratingParameters::new(3, Complexity::VeryEasy, false, 0);
        assert_eq!(2, parameters.max_single_cell_cages);
    }

    #[test]
    fn complexity_from_str_round_trip() {
        for &complexity in &[
            Complexity::VeryEasy,
            Complexity::Easy,
            Complexity::Normal,
            Complexity::Difficult,
            Complexity::VeryDifficult,
        ] {
            assert_eq!(Ok(complexity), complexity.to_string().parse());
        }
        assert!("hard".parse::<Complexity>().is_err());
    }
}
