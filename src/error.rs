use thiserror::Error;

#[derive(Error, Debug)]
#[error("invalid grid: {}", msg)]
pub struct InvalidGrid {
    msg: String,
}

impl InvalidGrid {
    pub(crate) fn new(msg: String) -> Self {
        Self { msg }
    }
}

#[derive(Error, Debug)]
pub enum GenerateError {
    /// Grids smaller than 3x3 cannot be generated
    #[error("grid size {0} is too small to generate a puzzle")]
    GridTooSmall(usize),
    /// Grids larger than 9x9 are not supported
    #[error("grid size {0} is too large to generate a puzzle")]
    GridTooLarge(usize),
    #[error("grid generation was cancelled")]
    Cancelled,
    /// No candidate grid passed the uniqueness check within the attempt bound
    #[error("no puzzle with a unique solution found in {0} attempts")]
    AttemptsExhausted(u32),
}
