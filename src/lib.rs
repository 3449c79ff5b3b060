//! Generate MathDoku puzzles with a guaranteed unique solution

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

pub mod collections;
pub mod error;
pub mod generate;
pub mod puzzle;
pub mod solve;

pub(crate) type HashSet<T> = std::collections::HashSet<T, ahash::RandomState>;
