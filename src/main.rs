use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stochastic_steppers::io::{config, input, reporting};
use stochastic_steppers::{
    simulate_ctmc, InventorySimulation, ProfitSummary, Result, ScenarioFile, TimeBoundary,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "steppers", version, about = "Fixed-step CTMC and (S,s) inventory simulators")]
struct Cli {
    /// TOML scenario with [inventory] and/or [ctmc] sections.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Integrate a continuous-time Markov chain.
    Ctmc {
        /// Header-less CSV generator matrix.
        #[arg(long, value_name = "FILE")]
        generator: PathBuf,
        /// Initial distribution, e.g. `1,0,0`.
        #[arg(long)]
        initial: String,
        #[arg(long)]
        horizon: f64,
        /// Overrides the scenario's time step.
        #[arg(long)]
        dt: Option<f64>,
        /// Stop at the last grid time within the horizon.
        #[arg(long)]
        inclusive: bool,
        #[arg(long, value_name = "FILE", default_value = "ctmc_trajectory.csv")]
        out: PathBuf,
    },
    /// Monte-Carlo profits of an (S,s) inventory policy.
    Inventory {
        #[arg(long, allow_negative_numbers = true)]
        capacity: i64,
        #[arg(long, allow_negative_numbers = true)]
        reorder_level: i64,
        #[arg(long, default_value_t = 1)]
        reps: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_name = "FILE", default_value = "inventory_profits.csv")]
        out: PathBuf,
        /// Also export every simulated day.
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let scenario = match &cli.config {
        Some(path) => config::load_scenario(path)?,
        None => ScenarioFile::default(),
    };

    match cli.command {
        Command::Ctmc {
            generator,
            initial,
            horizon,
            dt,
            inclusive,
            out,
        } => {
            let q = input::read_generator_csv(&generator)?;
            let p0 = input::parse_distribution(&initial)?;

            let mut ctmc = scenario.ctmc;
            if let Some(dt) = dt {
                ctmc.dt = dt;
            }
            if inclusive {
                ctmc.boundary = TimeBoundary::Inclusive;
            }

            info!(states = q.dim(), horizon, dt = ctmc.dt, "integrating chain");
            let trajectory = simulate_ctmc(horizon, &p0, &q, &ctmc)?;
            if let Some(last) = trajectory.final_distribution() {
                info!(?last, "final distribution");
            }
            reporting::to_file(&out, trajectory.len(), |f| {
                reporting::write_trajectory_csv(f, &trajectory)
            })
        }
        Command::Inventory {
            capacity,
            reorder_level,
            reps,
            seed,
            out,
            history,
        } => {
            let sim = InventorySimulation::new(scenario.inventory, capacity, reorder_level)?;
            info!(capacity, reorder_level, reps, ?seed, "running replications");

            let (profits, days) = match &history {
                Some(_) => {
                    let output = sim.run_with_history(reps, seed)?;
                    (output.profits, Some(output.history))
                }
                None => (sim.run(reps, seed)?, None),
            };
            if let Some(summary) = ProfitSummary::from_samples(&profits) {
                info!(
                    mean = summary.mean,
                    std_dev = summary.std_dev,
                    min = summary.min,
                    max = summary.max,
                    p_loss = summary.probability_of_loss,
                    "profit summary"
                );
            }

            reporting::to_file(&out, profits.len(), |f| {
                reporting::write_profits_csv(f, &profits)
            })?;
            if let (Some(path), Some(days)) = (history, days) {
                reporting::to_file(&path, days.len(), |f| {
                    reporting::write_history_csv(f, &days)
                })?;
            }
            Ok(())
        }
    }
}
