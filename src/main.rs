use cluegrid::game::{solver, Game};

fn init_logging() {
    env_logger::init();
}

fn optimize_disabled() -> bool {
    std::env::var("CLUEGRID_NO_OPTIMIZE")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn run(path: &str) -> cluegrid::Result<()> {
    let mut game = Game::load(path)?;
    if !optimize_disabled() {
        game.optimize_clues();
    }

    let report = solver::find_solutions(&mut game)?;
    if report.conflicts > 0 {
        eprintln!(
            "warning: {} trial(s) aborted on relationship conflicts",
            report.conflicts
        );
    }

    println!(
        "Found {} solution(s) in {} world(s).",
        report.solutions.len(),
        report.worlds_tested
    );
    for (i, solution) in report.solutions.iter().enumerate() {
        println!("\nSolution {}:\n{}", i + 1, game.format_solution(solution));
    }
    Ok(())
}

fn main() {
    init_logging();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: cluegrid <puzzle.json>");
        std::process::exit(2);
    };

    if let Err(error) = run(&path) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
