//! `make-change` - find the fewest coins for an amount by evolutionary search.
//!
//! ```text
//! make-change 88
//! make-change 88 --population 1000 --generations 25 --seed 7 --progress
//! make-change 88 --config euro.toml -v
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use u_makechange::change::{ChangeReport, MakeChangeSettings};
use u_makechange::ga::Evolution;

/// Find the fewest coins that make an amount, by genetic search.
#[derive(Parser, Debug)]
#[command(name = "make-change")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Amount to make, in minor currency units (e.g. cents)
    target: u64,

    /// Population size (overrides the config file)
    #[arg(short, long)]
    population: Option<usize>,

    /// Number of generations (overrides the config file)
    #[arg(short, long)]
    generations: Option<usize>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with coins and GA settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the best combination after every generation
    #[arg(long)]
    progress: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_settings(cli: &Cli) -> Result<MakeChangeSettings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            toml::from_str::<MakeChangeSettings>(&text)?
        }
        None => MakeChangeSettings::default(),
    };

    settings.target = cli.target;
    if let Some(n) = cli.population {
        settings.ga.population_size = n;
    }
    if let Some(n) = cli.generations {
        settings.ga.generations = n;
    }
    if let Some(seed) = cli.seed {
        settings.ga.seed = Some(seed);
    }
    Ok(settings)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(cli)?;
    let problem = settings.problem()?;
    let template = problem.template();

    let mut evolution = Evolution::new(&problem, &template, &settings.ga)?;
    for _ in 0..settings.ga.generations {
        let stats = evolution.step()?;
        if cli.progress {
            let report = problem.report(evolution.best().genes())?;
            println!(
                "generation {:>3}: {} cents in {} coins (score {})",
                stats.generation, report.total_value, report.coin_count, stats.best_fitness
            );
        }
    }

    let solution = problem.solution(evolution.into_result(false))?;
    print_report(&solution.report);
    Ok(())
}

fn print_report(report: &ChangeReport) {
    println!("The best solution contained the following:");
    for coin in &report.counts {
        println!("{} {}.", coin.count, coin.name);
    }
    println!(
        "For a total of {} cents in {} coins.",
        report.total_value, report.coin_count
    );
    if !report.exact {
        println!(
            "The target of {} cents was not reached exactly; this is the closest combination found.",
            report.target
        );
    }
}
