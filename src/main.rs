use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use kmeanslab::{
    DEFAULT_K, DEFAULT_MAX_ITERATIONS, DEFAULT_NUM_POINTS, InitConfig, InitStrategy,
    InteractionController, Point, PointSet, SessionState, Snapshot, StepOutcome,
};

#[derive(Parser)]
#[command(
    name = "kmeanslab",
    about = "Watch Lloyd's algorithm converge one snapshot at a time"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a full clustering pass and print a per-step report
    Run(RunArgs),
    /// Run a full clustering pass and write the dataset plus snapshot
    /// history as JSON
    Export(ExportArgs),
    /// Drive the state machine interactively from stdin
    Walk(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Number of dataset points
    #[arg(long, default_value_t = DEFAULT_NUM_POINTS)]
    points: usize,

    /// Number of clusters (ignored for manual initialization)
    #[arg(long, default_value_t = DEFAULT_K)]
    k: usize,

    /// Centroid seeding strategy
    #[arg(long, value_enum, default_value = "random")]
    strategy: InitStrategy,

    /// Manual centroids as a JSON array of {"x": .., "y": ..} objects
    #[arg(long)]
    manual: Option<String>,

    /// RNG seed; identical seeds reproduce identical runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Lloyd iteration cap
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Output file
    #[arg(long, default_value = "history.json")]
    output: PathBuf,
}

#[derive(Serialize)]
struct HistoryExport<'a> {
    generator: String,
    created_at: String,
    seed: u64,
    strategy: InitStrategy,
    total_steps: usize,
    converged: bool,
    dataset: &'a PointSet,
    snapshots: &'a [Snapshot],
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => cmd_run(args),
        Command::Export(args) => cmd_export(args),
        Command::Walk(args) => cmd_walk(args),
    }
}

fn build_controller(args: &RunArgs) -> Result<InteractionController> {
    let controller =
        InteractionController::new(args.points, args.seed)?.with_max_iterations(args.max_iterations);
    Ok(controller)
}

fn init_config(args: &RunArgs) -> Result<InitConfig> {
    Ok(InitConfig {
        k: args.k,
        strategy: args.strategy,
        manual_centroids: parse_manual(args.manual.as_deref())?,
    })
}

fn parse_manual(raw: Option<&str>) -> Result<Option<Vec<Point>>> {
    match raw {
        Some(text) => {
            let points: Vec<Point> = serde_json::from_str(text)
                .context("manual centroids must be a JSON array of {\"x\": .., \"y\": ..} objects")?;
            Ok(Some(points))
        }
        None => Ok(None),
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let config = init_config(&args)?;
    let mut controller = build_controller(&args)?;

    let summary = controller.init(config)?;
    println!(
        "run {} over {} points: {} steps ahead\n",
        summary.run_id,
        controller.data_points().len(),
        summary.total_steps
    );

    loop {
        match controller.step()? {
            StepOutcome::Snapshot(snapshot) => print_snapshot(&snapshot, &controller),
            StepOutcome::AtEnd => break,
        }
    }

    let last = controller.run_to_end()?;
    print_snapshot(&last, &controller);

    println!(
        "\n✓ {} after {} steps",
        match controller.state() {
            SessionState::Converged => "converged",
            _ => "stopped at the iteration cap",
        },
        summary.total_steps
    );

    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let config = init_config(&args.run)?;
    let strategy = config.strategy;
    let mut controller = build_controller(&args.run)?;

    controller.init(config)?;
    controller.run_to_end()?;

    // run_to_end always leaves a live run behind
    let run = controller.run().unwrap();
    let export = HistoryExport {
        generator: format!("kmeanslab v{}", env!("CARGO_PKG_VERSION")),
        created_at: Utc::now().to_rfc3339(),
        seed: args.run.seed,
        strategy,
        total_steps: run.total_steps(),
        converged: run.history().converged,
        dataset: controller.data_points(),
        snapshots: &run.history().snapshots,
    };

    let json = serde_json::to_string_pretty(&export).context("Failed to serialize history")?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "wrote {} snapshots to {}",
        run.history().len(),
        args.output.display()
    );
    Ok(())
}

fn cmd_walk(args: RunArgs) -> Result<()> {
    let config = init_config(&args)?;
    let mut controller = build_controller(&args)?;

    println!(
        "{} points loaded; commands: init, step, end, reset, new <n>, points, state, quit",
        controller.data_points().len()
    );

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("init") => match controller.init(config.clone()) {
                Ok(summary) => {
                    println!("run {}: {} steps ahead", summary.run_id, summary.total_steps)
                }
                Err(e) => println!("rejected: {}", e),
            },
            Some("step") => match controller.step()? {
                StepOutcome::Snapshot(snapshot) => print_snapshot(&snapshot, &controller),
                StepOutcome::AtEnd => println!("already converged"),
            },
            Some("end") => {
                let snapshot = controller.run_to_end()?;
                print_snapshot(&snapshot, &controller);
            }
            Some("reset") => {
                controller.reset();
                println!("run discarded, dataset kept");
            }
            Some("new") => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
                Some(n) => match controller.new_dataset(n) {
                    Ok(points) => println!("fresh dataset with {} points", points.len()),
                    Err(e) => println!("rejected: {}", e),
                },
                None => println!("usage: new <num_points>"),
            },
            Some("points") => {
                let points = controller.data_points();
                for point in points.iter().take(5) {
                    println!("  ({:.3}, {:.3})", point.x, point.y);
                }
                if points.len() > 5 {
                    println!("  ... {} total", points.len());
                }
            }
            Some("state") => {
                let cursor = controller.run().map(|run| run.cursor());
                println!("{:?}, cursor {:?}", controller.state(), cursor);
            }
            Some("quit") | Some("q") => break,
            Some(other) => println!("unknown command: {}", other),
            None => {}
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, controller: &InteractionController) {
    let sizes = snapshot.cluster_sizes();
    println!(
        "  step {:>3}: inertia {:>10.4}, cluster sizes {:?}",
        snapshot.iteration,
        snapshot.inertia(controller.data_points()),
        sizes
    );
}
