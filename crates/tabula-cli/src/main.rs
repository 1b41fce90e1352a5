use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tabula_solver::{
    InvalidProblem, LpProblem, Mode, SimplexSolver, Solution, SolutionStatus, Solver,
};

/// Tolerance for the constraint check printed after a solve
const CHECK_TOLERANCE: f64 = 1e-9;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(
    about = "Solve standard-form linear programs with the tableau simplex method",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and print the result
    Solve {
        /// JSON file with "mode", "objective" and "constraints"
        file: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Maximum number of pivots
        #[arg(long, default_value_t = 10000)]
        max_iterations: usize,
    },
    /// Validate a problem file without solving it
    Check {
        /// The file to check
        file: PathBuf,
    },
    /// Solve the two built-in sample problems
    Demo,
}

/// On-disk problem description
#[derive(Debug, Deserialize)]
struct ProblemFile {
    mode: String,
    objective: Vec<f64>,
    constraints: Vec<Vec<f64>>,
}

impl ProblemFile {
    fn into_problem(self) -> Result<LpProblem, InvalidProblem> {
        let mode: Mode = self.mode.parse()?;
        LpProblem::new(mode, self.objective, self.constraints)
    }
}

fn setup_logger(verbose: u8) {
    use fern::colors::{Color, ColoredLevelConfig};
    let colors = ColoredLevelConfig::new()
        .debug(Color::White)
        .info(Color::Green)
        .warn(Color::BrightYellow)
        .error(Color::BrightRed);

    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let result = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} | {:5} | {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
                colors.color(record.level()),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Could not set up logging: {}", e);
    }
}

fn load_problem(file: &Path) -> LpProblem {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    let parsed: ProblemFile = match serde_json::from_str(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    };

    match parsed.into_problem() {
        Ok(problem) => problem,
        Err(e) => exit_invalid(&e),
    }
}

fn exit_invalid(e: &InvalidProblem) -> ! {
    eprintln!("Invalid problem: {}", e);
    std::process::exit(i32::from(e.code()))
}

fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_solution(problem: &LpProblem, solution: &Solution) {
    match solution.status {
        SolutionStatus::Optimal => {
            println!("Status: OPTIMAL");
            println!("Objective ({}): {:.6}", problem.mode(), solution.objective_value);
            println!("Pivots: {}", solution.iterations);
            println!();
            println!("Variables:");
            for (j, value) in solution.values.iter().enumerate() {
                println!("  x{:<18} {:12.6}", j, value);
            }

            let violations = problem.violations(&solution.values, CHECK_TOLERANCE);
            if !violations.is_empty() {
                println!();
                println!("Constraint violations:");
                for v in &violations {
                    println!("  - {}", v.description);
                }
            }
        }
        SolutionStatus::Unbounded => {
            println!("Status: UNBOUNDED");
            println!("The problem has no finite optimal solution.");
        }
        SolutionStatus::IterationLimitExceeded => {
            println!("Status: ITERATION LIMIT");
            println!("No optimum was reached within {} pivots.", solution.iterations);
        }
        SolutionStatus::Inconclusive => {
            println!("Status: NO SOLUTION");
            println!("Pivoting stopped without a non-negative assignment.");
        }
    }
}

fn run_demo() {
    // Maximization problem
    let maximize = SimplexSolver::new(
        Mode::Maximize,
        vec![1.0, 2.0],
        vec![
            vec![2.0, 3.0, 34.0],
            vec![1.0, 5.0, 45.0],
            vec![1.0, 0.0, 15.0],
        ],
    );
    // Minimization problem
    let minimize = SimplexSolver::new(
        Mode::Minimize,
        vec![3.0, 4.0],
        vec![
            vec![2.0, 1.0, 8.0],
            vec![1.0, 2.0, 13.0],
            vec![1.0, 5.0, 16.0],
        ],
    );

    for (label, solver) in [("maximum", maximize), ("minimum", minimize)] {
        let solver = match solver {
            Ok(s) => s,
            Err(e) => exit_invalid(&e),
        };

        if solver.has_solution() {
            println!("The {} is: {}", label, solver.optimum());
            println!("The solution is: {}", format_values(solver.solution()));
        } else {
            println!("The linear problem has no solution.");
        }
        println!();
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logger(cli.verbose);

    match cli.command {
        Commands::Solve { file, format, max_iterations } => {
            let problem = load_problem(&file);
            log::info!(
                "solving {}: {} variables, {} constraints",
                file.display(),
                problem.num_variables(),
                problem.num_constraints()
            );

            let solver = Solver::new().with_max_iterations(max_iterations);
            let solution = solver.solve(&problem);

            if format == "json" {
                match serde_json::to_string_pretty(&solution) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing solution: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_solution(&problem, &solution);
            }

            if !solution.is_optimal() {
                std::process::exit(1);
            }
        }
        Commands::Check { file } => {
            let problem = load_problem(&file);
            println!("✓ {} is valid", file.display());
            println!("  mode: {}", problem.mode());
            println!("  {} variables", problem.num_variables());
            println!("  {} constraints", problem.num_constraints());
        }
        Commands::Demo => run_demo(),
    }
}
