#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use anyhow::Result;
use itertools::Itertools;
use mathdoku::generate::{GeneratingParameters, Generator};
use mathdoku::puzzle::Grid;

use crate::options::Options;

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let seed = options.seed.unwrap_or_else(rand::random);
    let parameters = GeneratingParameters::new(
        options.size,
        options.complexity,
        options.hide_operators,
        seed,
    );
    let mut generator = Generator::new(parameters);
    for i in 1..=options.count {
        println!("Generating puzzle {}/{}", i, options.count);
        let grid = generator.generate()?;
        print_grid(&grid);
        if options.show_solution {
            println!("{}", grid.solution());
        }
    }
    Ok(())
}

fn print_grid(grid: &Grid) {
    let cages = grid
        .cages()
        .iter()
        .enumerate()
        .map(|(i, cage)| {
            let symbol = if cage.hide_operator() {
                None
            } else {
                cage.operator().symbol()
            };
            format!(" {:>2}: {}{}", i, symbol.unwrap_or(' '), cage.result())
        })
        .join("\n");
    println!("{}{}", grid, cages);
}
