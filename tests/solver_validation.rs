#![cfg(feature = "test-utils")]

use minesweeper_agent::{
    solver::test_utils::{
        validate_deterministic_solver, validate_solve, TestBoardConfig, TestBoardGenerator,
    },
    AgentSolver, Board, LocalChecker, Position, ReductionEngine, SolverConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn expert_config() -> TestBoardConfig {
    TestBoardConfig {
        rows: 16,
        cols: 16,
        mine_density: 0.15,
        revealed_percentage: 0.3,
    }
}

#[test]
fn test_local_checker_extensive() {
    let mut generator = TestBoardGenerator::with_seed(expert_config(), 12345);
    let solver = LocalChecker;

    // Generate and test 2,000 boards
    let test_cases = generator.generate_batch(2_000);
    let mut failures = 0;

    for (idx, (board, mine_positions)) in test_cases.iter().enumerate() {
        if !validate_deterministic_solver(&solver, board, mine_positions) {
            println!("Failure on test case {}", idx);
            failures += 1;
        }
    }

    assert_eq!(
        failures, 0,
        "Local checker failed on {} out of 2,000 test cases",
        failures
    );
}

#[test]
fn test_reduction_engine_extensive() {
    let mut generator = TestBoardGenerator::with_seed(expert_config(), 12345);
    let solver = ReductionEngine::default();

    // Generate and test 2,000 boards
    let test_cases = generator.generate_batch(2_000);
    let mut failures = 0;

    for (idx, (board, mine_positions)) in test_cases.iter().enumerate() {
        if !validate_deterministic_solver(&solver, board, mine_positions) {
            println!("Failure on test case {}", idx);
            failures += 1;
        }
    }

    assert_eq!(
        failures, 0,
        "Reduction engine failed on {} out of 2,000 test cases",
        failures
    );
}

#[test]
fn test_full_solves_extensive() {
    let mut failures = 0;

    for seed in 0..500u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::with_rng(16, 16, 40, &mut rng).unwrap();
        let start = Position::new(8, 8);
        let mut solver = AgentSolver::new(&SolverConfig {
            seed: Some(seed),
            ..SolverConfig::default()
        });

        match solver.solve(&mut board, start) {
            Ok(report) if validate_solve(&board, &report, start) => {}
            Ok(_) => {
                println!("Invalid solve for seed {}", seed);
                failures += 1;
            }
            Err(e) => {
                println!("Solve for seed {} failed: {}", seed, e);
                failures += 1;
            }
        }
    }

    assert_eq!(failures, 0, "{} of 500 solves went wrong", failures);
}
