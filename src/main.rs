use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use minesweeper_agent::{create_full_solver, Board, Position, SolverConfig};
use std::error::Error;
use std::str::FromStr;

fn main() {
    let matches = App::new("minesweeper-agent")
        .about("Plays a random minesweeper board to the end without help")
        .arg(Arg::with_name("rows").long("rows").takes_value(true).default_value("16"))
        .arg(Arg::with_name("cols").long("cols").takes_value(true).default_value("16"))
        .arg(Arg::with_name("mines").long("mines").takes_value(true).default_value("40"))
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for board layout and guesses"),
        )
        .arg(Arg::with_name("start-row").long("start-row").takes_value(true).default_value("0"))
        .arg(Arg::with_name("start-col").long("start-col").takes_value(true).default_value("0"))
        .arg(
            Arg::with_name("passes")
                .long("max-passes")
                .takes_value(true)
                .help("Upper bound on reduction passes per inference round"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more; repeat for more detail"),
        )
        .get_matches();

    match run(&matches) {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Error + 'static,
{
    match matches.value_of(name) {
        Some(raw) => Ok(Some(raw.parse::<T>().map_err(|e| {
            format!("invalid value '{}' for --{}: {}", raw, name, e)
        })?)),
        None => Ok(None),
    }
}

fn setup_logging(verbosity: u64) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    setup_logging(matches.occurrences_of("verbose"))?;

    let rows: u32 = parse(matches, "rows")?.unwrap_or(16);
    let cols: u32 = parse(matches, "cols")?.unwrap_or(16);
    let mines: u32 = parse(matches, "mines")?.unwrap_or(40);
    let seed: Option<u64> = parse(matches, "seed")?;
    let start = Position::new(
        parse(matches, "start-row")?.unwrap_or(0),
        parse(matches, "start-col")?.unwrap_or(0),
    );

    let mut config = SolverConfig {
        seed,
        ..SolverConfig::default()
    };
    if let Some(passes) = parse(matches, "passes")? {
        config.max_reduction_passes = passes;
    }

    let mut board = match seed {
        Some(seed) => {
            use rand::SeedableRng;
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            Board::with_rng(rows, cols, mines, &mut rng)?
        }
        None => Board::new(rows, cols, mines)?,
    };

    let mut solver = create_full_solver(&config);
    let report = solver.solve(&mut board, start)?;

    println!("{}", board);
    println!("Score: {} of {} mines flagged", report.score, board.mines_count());
    println!("Guesses: {}", report.guesses.len());
    println!("Mines opened: {}", report.mines_opened.len());
    println!("Iterations: {}", report.steps);

    let misflagged = board.misflagged();
    if !misflagged.is_empty() {
        println!("Wrong flags: {:?}", misflagged);
    }

    Ok(())
}
