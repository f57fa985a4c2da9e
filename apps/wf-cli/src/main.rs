use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wf_farm::{PlaneKind, Point};
use wf_solver::{CaseSolution, WakeProblem};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] wf_project::ProjectError),

    #[error(transparent)]
    Solver(#[from] wf_solver::SolverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}:{line}: {message}")]
    PointsFile {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "wf-cli")]
#[command(about = "WindFlow CLI - wind farm wake steady-state solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Solve every flow case and print per-turbine results
    Run {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Solve a single case instead of all of them
        #[arg(long)]
        case: Option<usize>,
    },
    /// Sample the flow at arbitrary points
    Sample {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// CSV file with x,y,z rows in world coordinates [m]
        #[arg(long)]
        points: Option<PathBuf>,
        /// Single point as x,y,z (repeatable)
        #[arg(long = "point", value_parser = parse_point)]
        point: Vec<Point>,
        /// Flow case index
        #[arg(long, default_value_t = 0)]
        case: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sample the flow on a cut plane spanning the farm
    Plane {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        #[command(subcommand)]
        kind: PlaneCommands,
        /// Resolution along the first plane axis
        #[arg(long, default_value_t = 200)]
        n1: usize,
        /// Resolution along the second plane axis
        #[arg(long, default_value_t = 100)]
        n2: usize,
        /// Flow case index
        #[arg(long, default_value_t = 0)]
        case: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum PlaneCommands {
    /// Plane parallel to the ground
    Horizontal {
        /// Height above ground [m]
        #[arg(long)]
        height: f64,
    },
    /// Vertical plane along the wind
    Streamwise {
        /// Cross-stream offset from the origin [m]
        #[arg(long, default_value_t = 0.0)]
        cross_stream: f64,
    },
    /// Vertical plane across the wind
    Cross {
        /// Downstream distance from the origin [m]
        #[arg(long)]
        downstream: f64,
    },
}

impl From<PlaneCommands> for PlaneKind {
    fn from(cmd: PlaneCommands) -> Self {
        match cmd {
            PlaneCommands::Horizontal { height } => PlaneKind::Horizontal { height },
            PlaneCommands::Streamwise { cross_stream } => PlaneKind::Streamwise { cross_stream },
            PlaneCommands::Cross { downstream } => PlaneKind::CrossStream { downstream },
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Run { project_path, case } => cmd_run(&project_path, case),
        Commands::Sample {
            project_path,
            points,
            point,
            case,
            output,
        } => cmd_sample(&project_path, points.as_deref(), point, case, output.as_deref()),
        Commands::Plane {
            project_path,
            kind,
            n1,
            n2,
            case,
            output,
        } => cmd_plane(&project_path, kind.into(), n1, n2, case, output.as_deref()),
    }
}

fn load_problem(project_path: &Path) -> CliResult<WakeProblem> {
    let project = wf_project::load(project_path)?;
    Ok(wf_project::build_simulation(&project)?)
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = wf_project::load(project_path)?;
    wf_project::build_simulation(&project)?;
    println!("✓ Project is valid");
    println!("  Turbines: {}", project.layout.len());
    println!("  Turbine types: {}", project.turbine_types.len());
    println!(
        "  Cases: {} directions x {} speeds",
        project.ambient.wind_directions_deg.len(),
        project.ambient.wind_speeds_mps.len()
    );
    Ok(())
}

fn cmd_run(project_path: &Path, case: Option<usize>) -> CliResult<()> {
    let problem = load_problem(project_path)?;
    println!(
        "Solving {} ({} turbines, {} cases)",
        project_path.display(),
        problem.farm.turbines().len(),
        problem.ambient.case_count()
    );

    let solutions = match case {
        Some(index) => vec![wf_solver::solve_case(&problem, index)?],
        None => wf_solver::solve(&problem)?,
    };

    let mut total_time = 0.0;
    for solution in &solutions {
        print_case(solution);
        total_time += solution.elapsed_s;
    }
    println!("\nSolved {} case(s) in {:.3}s", solutions.len(), total_time);
    Ok(())
}

fn print_case(solution: &CaseSolution) {
    let case = &solution.case;
    println!(
        "\nCase {}: direction {:.1}°, wind speed {:.2} m/s",
        case.index, case.direction_deg, case.wind_speed
    );
    println!(
        "  {:<12} {:>9} {:>7} {:>7} {:>7} {:>7} {:>12}",
        "turbine", "U [m/s]", "Ct", "Ct_eff", "a", "Cp", "P [kW]"
    );
    for t in &solution.turbines {
        println!(
            "  {:<12} {:>9.3} {:>7.4} {:>7.4} {:>7.4} {:>7.4} {:>12.1}",
            t.name,
            t.effective_speed,
            t.thrust_coefficient,
            t.effective_thrust,
            t.axial_induction,
            t.power_coefficient,
            t.power / 1.0e3
        );
    }
    println!("  Farm power: {:.1} kW", solution.farm_power() / 1.0e3);
    if !solution.anomalies.is_empty() {
        println!("  Anomalies: {}", solution.anomalies.len());
    }
}

fn cmd_sample(
    project_path: &Path,
    points_file: Option<&Path>,
    mut points: Vec<Point>,
    case: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    if let Some(path) = points_file {
        points.extend(read_points(path)?);
    }
    if points.is_empty() {
        return Err(CliError::InvalidInput(
            "no sample points given (use --points or --point)".to_string(),
        ));
    }

    let mut problem = load_problem(project_path)?;
    let solution = problem.sample_case(points, case)?;

    let mut csv = String::from("x_m,y_m,z_m,u_mps,vx_mps,vy_mps,vz_mps\n");
    for sample in &solution.points {
        let p = sample.position;
        match (sample.u, sample.velocity) {
            (Some(u), Some(v)) => csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                p.x, p.y, p.z, u, v.x, v.y, v.z
            )),
            _ => csv.push_str(&format!("{},{},{},NaN,NaN,NaN,NaN\n", p.x, p.y, p.z)),
        }
    }
    write_csv(csv, solution.points.len(), output)
}

fn cmd_plane(
    project_path: &Path,
    kind: PlaneKind,
    n1: usize,
    n2: usize,
    case: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    let mut problem = load_problem(project_path)?;
    let plane = wf_solver::sample_plane(&mut problem, case, kind, n1, n2)?;

    let header = match kind {
        PlaneKind::Horizontal { .. } => "x_m,y_m,u_mps\n",
        PlaneKind::Streamwise { .. } => "x_m,z_m,u_mps\n",
        PlaneKind::CrossStream { .. } => "y_m,z_m,u_mps\n",
    };
    let mut csv = String::from(header);
    for (a, b, u) in &plane.rows {
        csv.push_str(&format!("{},{},{}\n", a, b, u));
    }
    write_csv(csv, plane.rows.len(), output)
}

fn write_csv(csv: String, rows: usize, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} rows to {}", rows, path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn parse_point(s: &str) -> Result<Point, String> {
    let coords = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate in '{}': {}", s, e))?;
    match coords.as_slice() {
        [x, y, z] => Ok(Point::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z but got '{}'", s)),
    }
}

/// Read `x,y,z` rows; blank lines, `#` comments and a leading header are skipped.
fn read_points(path: &Path) -> CliResult<Vec<Point>> {
    let content = std::fs::read_to_string(path)?;
    let mut points = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_point(line) {
            Ok(p) => points.push(p),
            Err(_) if points.is_empty() && line.chars().any(|c| c.is_ascii_alphabetic()) => {}
            Err(message) => {
                return Err(CliError::PointsFile {
                    path: path.to_path_buf(),
                    line: i + 1,
                    message,
                });
            }
        }
    }
    Ok(points)
}
