use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use log::error;

use egalitarian_allocation::domain::{
    create_solver, solve_allocation, AllocationError, SolverType, ValuationMatrix,
};
use egalitarian_allocation::report::{render_matrix, render_report, StylePreset, TableStyle};

/// Print egalitarian allocations for a set of valuation matrices
#[derive(Parser, Debug)]
#[command(name = "allocation-demo")]
struct Args {
    /// Table labels: "agents" (Agent/Resource) or "participants" (Participant/Item)
    #[arg(long, default_value_t = StylePreset::Agents)]
    style: StylePreset,

    /// Decimal places, overriding the style's default
    #[arg(long)]
    precision: Option<usize>,

    /// LP backend
    #[arg(long, env = "SOLVER", default_value = "microlp")]
    solver: String,

    /// JSON file holding a list of valuation matrices
    #[arg(long)]
    input: Option<PathBuf>,
}

fn builtin_matrices() -> Vec<Vec<Vec<f64>>> {
    vec![
        vec![vec![81.0, 19.0, 1.0], vec![70.0, 1.0, 29.0]],
        vec![
            vec![10.0, 20.0, 15.0],
            vec![20.0, 10.0, 15.0],
            vec![15.0, 20.0, 10.0],
            vec![5.0, 10.0, 25.0],
        ],
        vec![
            vec![12.0, 15.0, 10.0],
            vec![9.0, 25.0, 20.0],
            vec![10.0, 10.0, 30.0],
        ],
    ]
}

fn load_matrices(path: &Path) -> Result<Vec<Vec<Vec<f64>>>, String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    serde_json::from_str(&text)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn solve_and_render(
    rows: Vec<Vec<f64>>,
    solver_type: SolverType,
    style: &TableStyle,
) -> Result<String, AllocationError> {
    let valuations = ValuationMatrix::from_rows(rows)?;
    let solver = create_solver(solver_type, None);
    let allocation = solve_allocation(&valuations, solver.as_ref())?;
    Ok(render_report(&allocation, style))
}

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let Some(solver_type) = SolverType::from_name(&args.solver) else {
        eprintln!("Unknown solver {}", args.solver);
        return ExitCode::FAILURE;
    };

    let mut style = TableStyle::from(args.style);
    if let Some(precision) = args.precision {
        style = style.with_precision(precision);
    }

    let matrices = match &args.input {
        Some(path) => match load_matrices(path) {
            Ok(matrices) => matrices,
            Err(message) => {
                eprintln!("{}", message);
                return ExitCode::FAILURE;
            }
        },
        None => builtin_matrices(),
    };

    let mut failed = false;
    for (index, rows) in matrices.into_iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("Valuation Matrix #{}:", index + 1);
        println!("{}", render_matrix(&rows));
        println!();

        match solve_and_render(rows, solver_type, &style) {
            Ok(report) => println!("{}", report),
            Err(err) => {
                error!("Matrix #{} failed: {}", index + 1, err);
                println!("Allocation failed: {}", err);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
