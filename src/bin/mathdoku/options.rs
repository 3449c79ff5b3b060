use anyhow::{Context, Result};
use clap::ArgMatches;
use mathdoku::generate::Complexity;

const DEFAULT_GRID_SIZE: usize = 6;

#[derive(Clone)]
pub(crate) struct Options {
    pub size: usize,
    pub count: u32,
    pub complexity: Complexity,
    pub hide_operators: bool,
    pub seed: Option<u64>,
    pub show_solution: bool,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        Ok(Self {
            size: matches.value_of("size").map_or(Ok(DEFAULT_GRID_SIZE), |s| {
                s.parse::<usize>().context("invalid size")
            })?,
            count: matches
                .value_of("count")
                .map_or(Ok(1), |s| s.parse::<u32>().context("invalid count"))?,
            complexity: matches
                .value_of("complexity")
                .unwrap()
                .parse()
                .map_err(anyhow::Error::msg)?,
            hide_operators: matches.is_present("hide_operators"),
            seed: matches
                .value_of("seed")
                .map(|s| s.parse::<u64>().context("invalid seed"))
                .transpose()?,
            show_solution: matches.is_present("show_solution"),
        })
    }
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, Arg};

    App::new("mathdoku")
        .help_message("Generate MathDoku puzzles")
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .takes_value(true)
                .value_name("SIZE")
                .help("set the width and height of the generated grid (3-9)"),
        )
        .arg(
            Arg::with_name("count")
                .short("c")
                .long("count")
                .takes_value(true)
                .help("the number of puzzles to generate"),
        )
        .arg(
            Arg::with_name("complexity")
                .long("complexity")
                .takes_value(true)
                .possible_values(&[
                    "very-easy",
                    "easy",
                    "normal",
                    "difficult",
                    "very-difficult",
                ])
                .default_value("normal")
                .help("how hard the generated puzzles should be"),
        )
        .arg(
            Arg::with_name("hide_operators")
                .long("hide-operators")
                .help("omit the operator from multi-cell cage clues"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("seed for deterministic generation"),
        )
        .arg(
            Arg::with_name("show_solution")
                .long("show-solution")
                .help("print the solution below each puzzle"),
        )
}
