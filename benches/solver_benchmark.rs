use criterion::{criterion_group, criterion_main, Criterion};
use minesweeper_agent::{
    solver::{DeterministicSolver, LocalChecker, ReductionEngine, Solver},
    AgentSolver, Board, Position, SolverConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Default)]
struct GameStats {
    won: bool,
    score: u32,
    guesses: usize,
    mines_hit: usize,
    steps: usize,
}

#[derive(Debug, Default)]
struct AggregateStats {
    games: Vec<GameStats>,
}

impl AggregateStats {
    fn games_played(&self) -> usize {
        self.games.len()
    }

    /// Share of games finished without opening a mine
    fn success_rate(&self) -> f64 {
        if self.games_played() == 0 {
            return 0.0;
        }
        self.games.iter().filter(|g| g.won).count() as f64 / self.games_played() as f64 * 100.0
    }

    fn average_score(&self) -> f64 {
        if self.games_played() == 0 {
            return 0.0;
        }
        self.games.iter().map(|g| g.score).sum::<u32>() as f64 / self.games_played() as f64
    }

    fn average_guesses(&self) -> f64 {
        if self.games_played() == 0 {
            return 0.0;
        }
        self.games.iter().map(|g| g.guesses).sum::<usize>() as f64 / self.games_played() as f64
    }

    fn average_steps(&self) -> f64 {
        if self.games_played() == 0 {
            return 0.0;
        }
        self.games.iter().map(|g| g.steps).sum::<usize>() as f64 / self.games_played() as f64
    }

    fn total_mines_hit(&self) -> usize {
        self.games.iter().map(|g| g.mines_hit).sum()
    }
}

fn solve_single_game(board: &mut Board, seed: u64) -> GameStats {
    let (rows, cols) = board.dimensions();
    let start = Position::new(rows as i32 / 2, cols as i32 / 2);
    let mut solver = AgentSolver::new(&SolverConfig {
        seed: Some(seed),
        ..SolverConfig::default()
    });

    match solver.solve(board, start) {
        Ok(report) => GameStats {
            won: report.mines_opened.is_empty(),
            score: report.score,
            guesses: report.guesses.len(),
            mines_hit: report.mines_opened.len(),
            steps: report.steps,
        },
        Err(e) => {
            println!("Solve failed: {}", e);
            GameStats::default()
        }
    }
}

fn benchmark_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solver");

    let test_configs = vec![
        (8, 8, 10),   // Beginner
        (16, 16, 40), // Intermediate
        (16, 30, 99), // Expert
    ];

    for (rows, cols, mines) in test_configs {
        group.bench_function(format!("Full solve {}x{}", rows, cols), |b| {
            let mut seed = 0u64;
            b.iter_with_setup(
                || {
                    seed += 1;
                    let mut rng = StdRng::seed_from_u64(seed);
                    (Board::with_rng(rows, cols, mines, &mut rng).unwrap(), seed)
                },
                |(mut board, seed)| {
                    let stats = solve_single_game(&mut board, seed);
                    criterion::black_box(stats)
                },
            );
        });

        // Effectiveness stats (50 iterations)
        let mut aggregate = AggregateStats::default();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::with_rng(rows, cols, mines, &mut rng).unwrap();
            aggregate.games.push(solve_single_game(&mut board, seed));
        }

        println!("\nFull solve on {}x{} board:", rows, cols);
        println!("Success rate: {:.1}%", aggregate.success_rate());
        println!("Average score: {:.1}", aggregate.average_score());
        println!("Average guesses per game: {:.1}", aggregate.average_guesses());
        println!("Average iterations per game: {:.1}", aggregate.average_steps());
        println!("Total mine hits: {}", aggregate.total_mines_hit());
        println!("Games played: {}", aggregate.games_played());
    }

    group.finish();
}

fn benchmark_deducers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Deducers");

    // Boards with a third of their safe cells opened
    let mut rng = StdRng::seed_from_u64(7);
    let boards: Vec<(Board, Vec<Position>)> = (0..20)
        .map(|_| {
            let mut board = Board::with_rng(16, 16, 40, &mut rng).unwrap();
            let safe: Vec<Position> = board
                .iter_positions()
                .filter(|&pos| !board.get_cell(pos).unwrap().is_mine())
                .step_by(3)
                .collect();
            for &pos in &safe {
                board.open(pos).unwrap();
            }
            let frontier = safe
                .into_iter()
                .filter(|&pos| {
                    board
                        .neighbors(pos)
                        .iter()
                        .any(|&n| !board.get_cell(n).unwrap().opened)
                })
                .collect();
            (board, frontier)
        })
        .collect();

    let checker = LocalChecker;
    let engine = ReductionEngine::default();

    group.bench_function(checker.name(), |b| {
        b.iter(|| {
            for (board, frontier) in &boards {
                criterion::black_box(checker.deduce(board, frontier).unwrap());
            }
        })
    });
    group.bench_function(engine.name(), |b| {
        b.iter(|| {
            for (board, frontier) in &boards {
                criterion::black_box(engine.deduce(board, frontier).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_solver, benchmark_deducers);
criterion_main!(benches);
