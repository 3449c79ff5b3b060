//! Generates MathDoku grids.
//!
//! Generation fills a random Latin square, carves it into cages, assigns
//! each cage an operator and clue, and keeps the result only if it has
//! exactly one solution and has not been produced before. The whole
//! pipeline is retried from scratch until a grid passes or the attempt
//! budget runs out.

pub use self::combos::ComboGenerator;
pub use self::params::{Complexity, GeneratingParameters, GENERATOR_VERSION};

mod arithmetic;
mod combos;
mod fill;
mod params;
mod place;
mod shape;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use self::place::PlaceResult;
use crate::error::GenerateError;
use crate::puzzle::{Cage, Cell, Grid, Solution};
use crate::solve::{BacktrackingSolver, UniquenessSolver};
use crate::HashSet;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// A grid size below this cannot produce an interesting puzzle
pub const MIN_GRID_SIZE: usize = 3;

/// Larger grids are rejected; values stay single digits and the solver's
/// row and column bitmasks stay well within `u32`
pub const MAX_GRID_SIZE: usize = 9;

/// Cooperatively cancels a running generation
///
/// Cloning the token shares the flag, so one clone can cancel a generation
/// blocked on another thread.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Remembers the definitions of grids generated so far so that the
/// generator never emits the same puzzle twice
pub trait DefinitionStore {
    fn contains(&self, definition: &str) -> bool;

    fn insert(&mut self, definition: String);
}

/// An in-memory definition store, scoped to one generator
#[derive(Default)]
pub struct MemoryStore {
    definitions: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DefinitionStore for MemoryStore {
    fn contains(&self, definition: &str) -> bool {
        self.definitions.contains(definition)
    }

    fn insert(&mut self, definition: String) {
        self.definitions.insert(definition);
    }
}

/// Generates grids for one set of parameters
pub struct Generator {
    parameters: GeneratingParameters,
    max_attempts: u32,
    solver: Box<dyn UniquenessSolver>,
    store: Box<dyn DefinitionStore>,
}

impl Generator {
    pub fn new(parameters: GeneratingParameters) -> Self {
        Self {
            parameters,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            solver: Box::new(BacktrackingSolver),
            store: Box::new(MemoryStore::new()),
        }
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn solver(mut self, solver: Box<dyn UniquenessSolver>) -> Self {
        self.solver = solver;
        self
    }

    pub fn definition_store(mut self, store: Box<dyn DefinitionStore>) -> Self {
        self.store = store;
        self
    }

    pub fn generate(&mut self) -> Result<Grid, GenerateError> {
        self.generate_with_cancel(&CancelToken::new())
    }

    /// Generates one grid, retrying failed attempts up to the attempt budget
    ///
    /// An attempt fails when cage placement dead-ends, when the grid was
    /// generated before, or when it has more than one solution.
    pub fn generate_with_cancel(&mut self, cancel: &CancelToken) -> Result<Grid, GenerateError> {
        let size = self.parameters.grid_size;
        if size < MIN_GRID_SIZE {
            return Err(GenerateError::GridTooSmall(size));
        }
        if size > MAX_GRID_SIZE {
            return Err(GenerateError::GridTooLarge(size));
        }
        let mut rng = StdRng::seed_from_u64(self.parameters.seed);
        for attempt in 1..=self.max_attempts {
            if cancel.is_cancelled() {
                return Err(GenerateError::Cancelled);
            }
            let solution = fill::fill_solution(size, &mut rng);
            let cages = match place::place_cages(&solution, &self.parameters, &mut rng) {
                PlaceResult::Placed(cages) => cages,
                PlaceResult::Restart => continue,
            };
            let cells = build_cells(&solution, &cages);
            let grid = Grid::new(size, cells, cages, self.parameters.clone())
                .expect("placed cages cover the grid");
            let definition = grid.definition();
            if self.store.contains(&definition) {
                debug!("attempt {}: duplicate of an earlier grid", attempt);
                continue;
            }
            if !self.solver.has_unique_solution(size, grid.cages()) {
                debug!("attempt {}: more than one solution", attempt);
                continue;
            }
            self.store.insert(definition);
            debug!("grid generated on attempt {}", attempt);
            return Ok(grid);
        }
        Err(GenerateError::AttemptsExhausted(self.max_attempts))
    }
}

fn build_cells(solution: &Solution, cages: &[Cage]) -> Vec<Cell> {
    let mut cells: Vec<Option<Cell>> = vec![None; solution.len()];
    for (cage_id, cage) in cages.iter().enumerate() {
        for &id in cage.cell_ids() {
            cells[id] = Some(Cell::new(id, solution[id], cage_id));
        }
    }
    cells.into_iter().map(|cell| cell.unwrap()).collect()
}
